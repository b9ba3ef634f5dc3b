//! The drawing capability the renderer depends on.
//!
//! Units are millimetres for positions and sizes and points for font sizes.
//! The canvas owns the cursor position, margins and pagination; the renderer
//! only says what to draw next.

/// A grey level, 0 is black and 255 is white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shade(pub u8);

impl Shade {
    pub const BLACK: Self = Shade(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    Courier,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    /// Size in points.
    pub size: f32,
    pub color: Shade,
}

impl TextStyle {
    pub fn new(font: Font, size: f32) -> Self {
        Self {
            font,
            size,
            color: Shade::BLACK,
        }
    }

    pub fn with_color(self, color: Shade) -> Self {
        Self { color, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellWidth {
    Fixed(f32),
    /// Everything from the current x to the right margin.
    Remaining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Where the cursor goes after a cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Right,
    NextLine,
}

/// A single-line box of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<'a> {
    pub text: &'a str,
    pub style: TextStyle,
    pub width: CellWidth,
    pub height: f32,
    pub align: Align,
    pub border: bool,
    pub fill: Option<Shade>,
    pub advance: Advance,
}

impl<'a> Cell<'a> {
    pub fn new(text: &'a str, style: TextStyle, width: CellWidth, height: f32) -> Self {
        Self {
            text,
            style,
            width,
            height,
            align: Align::Left,
            border: false,
            fill: None,
            advance: Advance::Right,
        }
    }

    pub fn bordered(self) -> Self {
        Self {
            border: true,
            ..self
        }
    }

    pub fn filled(self, shade: Shade) -> Self {
        Self {
            fill: Some(shade),
            ..self
        }
    }

    pub fn aligned(self, align: Align) -> Self {
        Self { align, ..self }
    }

    pub fn then(self, advance: Advance) -> Self {
        Self { advance, ..self }
    }
}

/// Page-drawing abstraction with automatic pagination.
///
/// Implementations break to a new page whenever a cell or a wrapped line
/// would cross the bottom margin. Gaps from [`Canvas::new_line`] never break.
pub trait Canvas {
    /// Usable width between the left and right margins.
    fn content_width(&self) -> f32;

    /// Move the cursor to `offset` from the left margin.
    fn set_x(&mut self, offset: f32);

    fn emit_cell(&mut self, cell: &Cell<'_>);

    /// Draw `text` wrapped between the current x and the right margin, one
    /// `line_height` per line, then return to the left margin below it.
    fn emit_text(&mut self, style: TextStyle, line_height: f32, text: &str);

    /// Draw a horizontal line across the content area at the current y.
    fn emit_rule(&mut self, shade: Shade);

    /// Return to the left margin and move down by `height`.
    fn new_line(&mut self, height: f32);
}
