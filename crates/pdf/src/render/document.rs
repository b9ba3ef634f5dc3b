use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use md2pdf_core::Font;

use crate::encoding::encode_win_ansi;
use crate::render::canvas::resource_name;
use crate::types::{PageSetup, MM_TO_PT};
use crate::PdfError;

pub const PRODUCER: &str = "md2pdf";

const FONTS: [Font; 3] = [Font::Helvetica, Font::HelveticaBold, Font::Courier];

fn base_font(font: Font) -> &'static str {
    match font {
        Font::Helvetica => "Helvetica",
        Font::HelveticaBold => "Helvetica-Bold",
        Font::Courier => "Courier",
    }
}

/// Build a PDF from per-page content operations and serialize it.
///
/// The output carries no timestamps or random IDs, so identical input gives
/// identical bytes.
pub fn assemble(
    setup: &PageSetup,
    title: &str,
    pages: Vec<Vec<Operation>>,
) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in FONTS {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base_font(font),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(resource_name(font), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let count = pages.len();
    let mut kids: Vec<Object> = Vec::with_capacity(count);
    for operations in pages {
        let content = Content { operations }
            .encode()
            .map_err(|e| PdfError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(setup.width() * MM_TO_PT),
        Object::Real(setup.height() * MM_TO_PT),
    ];
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count as i64,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(title).bytes),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PdfError::Write(e.to_string()))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_op(text: &str) -> Vec<Operation> {
        vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), Object::Real(9.0)]),
            Operation::new("Td", vec![Object::Real(10.0), Object::Real(10.0)]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]
    }

    #[test]
    fn test_assembled_document_loads_back() {
        let bytes = assemble(
            &PageSetup::default(),
            "Doc",
            vec![text_op("one"), text_op("two")],
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));

        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 2);

        let second = doc.get_page_content(pages[&2]).unwrap();
        assert!(String::from_utf8_lossy(&second).contains("(two)"));
    }

    #[test]
    fn test_info_dictionary() {
        let bytes = assemble(&PageSetup::default(), "Report", vec![vec![]]).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_id).unwrap();
        assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Report");
        assert_eq!(info.get(b"Producer").unwrap().as_str().unwrap(), b"md2pdf");
    }

    #[test]
    fn test_standard_fonts_are_declared() {
        let bytes = assemble(&PageSetup::default(), "", vec![vec![]]).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let mut base_fonts: Vec<Vec<u8>> = doc
            .objects
            .values()
            .filter_map(|obj| obj.as_dict().ok())
            .filter(|dict| {
                dict.get(b"Type").and_then(|t| t.as_name()).ok() == Some(&b"Font"[..])
            })
            .filter_map(|dict| dict.get(b"BaseFont").and_then(|n| n.as_name()).ok())
            .map(|name| name.to_vec())
            .collect();
        base_fonts.sort();
        assert_eq!(
            base_fonts,
            vec![
                b"Courier".to_vec(),
                b"Helvetica".to_vec(),
                b"Helvetica-Bold".to_vec()
            ]
        );
    }

    #[test]
    fn test_output_is_deterministic() {
        let a = assemble(&PageSetup::default(), "T", vec![text_op("x")]).unwrap();
        let b = assemble(&PageSetup::default(), "T", vec![text_op("x")]).unwrap();
        assert_eq!(a, b);
    }
}
