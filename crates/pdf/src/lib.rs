use md2pdf_core::{render_document, RenderError, RenderSummary};
use thiserror::Error;

pub mod encoding;
pub mod metrics;
pub mod render;
pub mod types;

pub use render::canvas::PdfCanvas;
pub use types::*;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("PDF encoding error: {0}")]
    Encode(String),
    #[error("PDF write error: {0}")]
    Write(String),
}

/// A finished document and what went into it.
#[derive(Debug, Clone)]
pub struct PdfOutput {
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub summary: RenderSummary,
    /// Characters replaced with `?` because the standard fonts lack them.
    pub substituted_chars: usize,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render Markdown `source` into PDF bytes with `title` in every page header.
pub fn markdown_to_pdf(source: &str, title: &str, setup: PageSetup) -> Result<PdfOutput, PdfError> {
    let mut canvas = PdfCanvas::new(setup, title);
    let summary = render_document(source, &mut canvas)?;
    let pages = canvas.page_count();
    let substituted_chars = canvas.substituted_chars();
    let bytes = canvas.finish()?;

    Ok(PdfOutput {
        bytes,
        pages,
        summary,
        substituted_chars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Document;

    const SAMPLE: &str = "# Report\n\
        \n\
        Intro with **bold** and a \u{2014} dash.\n\
        \n\
        - first\n\
        - second\n\
        1. numbered\n\
        \n\
        | Col | Other |\n\
        |-----|-------|\n\
        | a | b |\n\
        \n\
        ```\n\
        let x = *ptr;\n\
        ```\n\
        ---\n\
        ## End\n";

    fn page_text(doc: &Document, page: u32) -> String {
        let page_id = doc.get_pages()[&page];
        String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
    }

    #[test]
    fn test_markdown_to_pdf_single_page() {
        let output = markdown_to_pdf(SAMPLE, "Report", PageSetup::default()).unwrap();
        assert_eq!(output.pages, 1);
        assert_eq!(output.summary.blocks, 13);
        assert_eq!(output.substituted_chars, 0);

        let doc = Document::load_mem(&output.bytes).unwrap();
        let text = page_text(&doc, 1);
        assert!(text.contains("(Report)"));
        assert!(text.contains("(Intro with bold and a -- dash.)"));
        assert!(text.contains("(1. numbered)"));
        assert!(text.contains("(let x = *ptr;)"));
        assert!(text.contains("(Page 1/1)"));
    }

    #[test]
    fn test_footer_uses_final_page_count() {
        let source = "paragraph line\n".repeat(150);
        let output = markdown_to_pdf(&source, "Long", PageSetup::default()).unwrap();
        assert_eq!(output.pages, 3);

        let doc = Document::load_mem(&output.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
        for page in 1..=3u32 {
            let text = page_text(&doc, page);
            assert!(text.contains(&format!("(Page {page}/3)")));
            assert!(text.contains("(Long)"));
        }
    }

    #[test]
    fn test_identical_input_gives_identical_bytes() {
        let a = markdown_to_pdf(SAMPLE, "Report", PageSetup::default()).unwrap();
        let b = markdown_to_pdf(SAMPLE, "Report", PageSetup::default()).unwrap();
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn test_letter_page_size() {
        let setup = PageSetup::with_size(PageSize::Letter);
        let output = markdown_to_pdf("text", "t", setup).unwrap();
        let doc = Document::load_mem(&output.bytes).unwrap();
        let (_, pages_id) = doc
            .objects
            .iter()
            .find(|(_, obj)| {
                obj.as_dict()
                    .and_then(|d| d.get(b"Type"))
                    .and_then(|t| t.as_name())
                    .ok()
                    == Some(&b"Pages"[..])
            })
            .unwrap();
        let media_box = pages_id
            .as_dict()
            .unwrap()
            .get(b"MediaBox")
            .unwrap()
            .as_array()
            .unwrap();
        let height = media_box[3].as_float().unwrap();
        assert!((height - 792.0).abs() < 0.1);
    }

    #[test]
    fn test_render_error_propagates() {
        let err = markdown_to_pdf("|\n|x|", "t", PageSetup::default()).unwrap_err();
        assert!(matches!(
            err,
            PdfError::Render(RenderError::EmptyTableHeader { line: 1 })
        ));
        assert_eq!(err.to_string(), "table starting at line 1 has no header columns");
    }
}
