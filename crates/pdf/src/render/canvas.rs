use lopdf::content::Operation;
use lopdf::{Object, StringFormat};
use md2pdf_core::{Advance, Align, Canvas, Cell, CellWidth, Font, Shade, TextStyle};

use crate::encoding::encode_win_ansi;
use crate::metrics::{byte_width_mm, size_mm, string_width};
use crate::render::document;
use crate::render::wrap::wrap_bytes;
use crate::types::{PageSetup, MM_TO_PT};
use crate::PdfError;

const HEADER_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 8.0;
const MARGINALIA_SHADE: Shade = Shade(128);
const BORDER_SHADE: Shade = Shade::BLACK;

/// Resource name of each font in the shared page resources.
pub fn resource_name(font: Font) -> &'static str {
    match font {
        Font::Helvetica => "F1",
        Font::HelveticaBold => "F2",
        Font::Courier => "F3",
    }
}

pub fn footer_text(page: usize, total: usize) -> String {
    format!("Page {page}/{total}")
}

/// An axis-aligned box in page millimetres, origin at the top-left corner.
#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

/// Appends PDF content operators for one page, converting from top-left
/// millimetres to bottom-left points.
struct Painter<'a> {
    setup: &'a PageSetup,
    ops: &'a mut Vec<Operation>,
}

impl Painter<'_> {
    fn x(&self, mm: f32) -> Object {
        Object::Real(mm * MM_TO_PT)
    }

    fn y(&self, mm: f32) -> Object {
        Object::Real((self.setup.height() - mm) * MM_TO_PT)
    }

    fn gray(shade: Shade) -> Object {
        Object::Real(f32::from(shade.0) / 255.0)
    }

    fn rect_operands(&self, rect: Rect) -> Vec<Object> {
        vec![
            self.x(rect.x),
            self.y(rect.y + rect.h),
            Object::Real(rect.w * MM_TO_PT),
            Object::Real(rect.h * MM_TO_PT),
        ]
    }

    fn fill(&mut self, rect: Rect, shade: Shade) {
        let operands = self.rect_operands(rect);
        self.ops.extend([
            Operation::new("q", vec![]),
            Operation::new("g", vec![Self::gray(shade)]),
            Operation::new("re", operands),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    fn stroke_rect(&mut self, rect: Rect) {
        let operands = self.rect_operands(rect);
        let line_width = Object::Real(self.setup.line_width * MM_TO_PT);
        self.ops.extend([
            Operation::new("q", vec![]),
            Operation::new("w", vec![line_width]),
            Operation::new("G", vec![Self::gray(BORDER_SHADE)]),
            Operation::new("re", operands),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    fn line(&mut self, x1: f32, x2: f32, y: f32, shade: Shade) {
        let line_width = Object::Real(self.setup.line_width * MM_TO_PT);
        self.ops.extend([
            Operation::new("q", vec![]),
            Operation::new("w", vec![line_width]),
            Operation::new("G", vec![Self::gray(shade)]),
            Operation::new("m", vec![self.x(x1), self.y(y)]),
            Operation::new("l", vec![self.x(x2), self.y(y)]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// Text inside `rect`, vertically centred on the cell.
    fn text(&mut self, rect: Rect, style: TextStyle, align: Align, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let tx = match align {
            Align::Left => rect.x + self.setup.cell_margin,
            Align::Center => rect.x + (rect.w - string_width(style, bytes)) / 2.0,
        };
        let ty = rect.y + 0.5 * rect.h + 0.3 * size_mm(style);
        let font = Object::Name(resource_name(style.font).as_bytes().to_vec());

        self.ops.extend([
            Operation::new("q", vec![]),
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font, Object::Real(style.size)]),
            Operation::new("g", vec![Self::gray(style.color)]),
            Operation::new("Td", vec![self.x(tx), self.y(ty)]),
            Operation::new(
                "Tj",
                vec![Object::String(bytes.to_vec(), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    fn cell(&mut self, rect: Rect, cell: &Cell<'_>, bytes: &[u8]) {
        if let Some(shade) = cell.fill {
            self.fill(rect, shade);
        }
        if cell.border {
            self.stroke_rect(rect);
        }
        self.text(rect, cell.style, cell.align, bytes);
    }
}

/// A [`Canvas`] that lays content out on fixed-size pages and turns it into
/// PDF content streams.
///
/// Every page starts with the document title as a header. Footers carrying
/// `Page X/Total` are added by [`PdfCanvas::finish`], once the total is known.
pub struct PdfCanvas {
    setup: PageSetup,
    title: String,
    /// Closed pages, in order.
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    x: f32,
    y: f32,
    substituted: usize,
}

impl PdfCanvas {
    /// Create a canvas with its first page open.
    pub fn new(setup: PageSetup, title: &str) -> Self {
        let mut canvas = Self {
            setup,
            title: title.to_string(),
            pages: Vec::new(),
            current: Vec::new(),
            x: setup.left_margin,
            y: setup.top_margin,
            substituted: encode_win_ansi(title).substituted,
        };
        canvas.start_page();
        canvas
    }

    pub fn page_count(&self) -> usize {
        self.pages.len() + 1
    }

    /// Characters drawn as `?` because the fonts cannot encode them.
    pub fn substituted_chars(&self) -> usize {
        self.substituted
    }

    /// Current cursor position in page millimetres.
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn encode(&mut self, text: &str) -> Vec<u8> {
        let encoded = encode_win_ansi(text);
        self.substituted += encoded.substituted;
        encoded.bytes
    }

    fn painter(&mut self) -> Painter<'_> {
        Painter {
            setup: &self.setup,
            ops: &mut self.current,
        }
    }

    fn add_page(&mut self) {
        let closed = std::mem::take(&mut self.current);
        self.pages.push(closed);
        self.start_page();
    }

    /// Reset the cursor and draw the header on the (empty) current page.
    fn start_page(&mut self) {
        self.x = self.setup.left_margin;
        self.y = self.setup.top_margin;

        // Substitutions in the title are counted once, in `new`.
        let bytes = encode_win_ansi(&self.title).bytes;
        let style = TextStyle::new(Font::HelveticaBold, HEADER_SIZE).with_color(MARGINALIA_SHADE);
        let rect = Rect {
            x: self.setup.left_margin,
            y: self.setup.top_margin,
            w: self.setup.content_width(),
            h: self.setup.header_height,
        };
        self.painter().text(rect, style, Align::Center, &bytes);

        self.y = self.setup.content_top();
    }

    /// Open a new page if a box of `height` would cross the bottom margin.
    /// The horizontal position carries over to the new page.
    fn break_if_needed(&mut self, height: f32) {
        let at_page_top = self.y <= self.setup.content_top();
        if self.y + height > self.setup.break_trigger() && !at_page_top {
            let x = self.x;
            self.add_page();
            self.x = x;
        }
    }

    /// Add footers and serialize the document.
    pub fn finish(mut self) -> Result<Vec<u8>, PdfError> {
        let last = std::mem::take(&mut self.current);
        self.pages.push(last);
        let total = self.pages.len();
        let style = TextStyle::new(Font::Helvetica, FOOTER_SIZE).with_color(MARGINALIA_SHADE);
        let rect = Rect {
            x: self.setup.left_margin,
            y: self.setup.height() - self.setup.footer_offset,
            w: self.setup.content_width(),
            h: self.setup.footer_height,
        };

        for (index, ops) in self.pages.iter_mut().enumerate() {
            let bytes = encode_win_ansi(&footer_text(index + 1, total)).bytes;
            let mut painter = Painter {
                setup: &self.setup,
                ops,
            };
            painter.text(rect, style, Align::Center, &bytes);
        }

        document::assemble(&self.setup, &self.title, self.pages)
    }
}

impl Canvas for PdfCanvas {
    fn content_width(&self) -> f32 {
        self.setup.content_width()
    }

    fn set_x(&mut self, offset: f32) {
        self.x = self.setup.left_margin + offset;
    }

    fn emit_cell(&mut self, cell: &Cell<'_>) {
        self.break_if_needed(cell.height);

        let width = match cell.width {
            CellWidth::Fixed(w) => w,
            CellWidth::Remaining => self.setup.right_edge() - self.x,
        };
        let rect = Rect {
            x: self.x,
            y: self.y,
            w: width,
            h: cell.height,
        };
        let bytes = self.encode(cell.text);
        self.painter().cell(rect, cell, &bytes);

        match cell.advance {
            Advance::Right => self.x += width,
            Advance::NextLine => {
                self.x = self.setup.left_margin;
                self.y += cell.height;
            }
        }
    }

    fn emit_text(&mut self, style: TextStyle, line_height: f32, text: &str) {
        let start_x = self.x;
        let width = self.setup.right_edge() - start_x;
        let max_width = width - 2.0 * self.setup.cell_margin;
        let bytes = self.encode(text);

        for line in wrap_bytes(&bytes, max_width, |b| byte_width_mm(style, b)) {
            self.break_if_needed(line_height);
            let rect = Rect {
                x: start_x,
                y: self.y,
                w: width,
                h: line_height,
            };
            self.painter().text(rect, style, Align::Left, line);
            self.y += line_height;
        }

        self.x = self.setup.left_margin;
    }

    fn emit_rule(&mut self, shade: Shade) {
        let (left, right, y) = (self.setup.left_margin, self.setup.right_edge(), self.y);
        self.painter().line(left, right, y, shade);
    }

    fn new_line(&mut self, height: f32) {
        self.x = self.setup.left_margin;
        self.y += height;
    }
}
