use std::fmt;

/// Points per millimetre.
pub const MM_TO_PT: f32 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in millimetres.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::A4 => write!(f, "a4"),
            PageSize::Letter => write!(f, "letter"),
        }
    }
}

/// Page geometry, all in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub size: PageSize,
    pub left_margin: f32,
    pub right_margin: f32,
    pub top_margin: f32,
    /// Content that would end closer than this to the bottom edge goes to a
    /// new page.
    pub bottom_margin: f32,
    pub header_height: f32,
    /// Gap between the header and the first line of content.
    pub header_gap: f32,
    /// Distance from the bottom edge to the top of the footer cell.
    pub footer_offset: f32,
    pub footer_height: f32,
    /// Horizontal padding between a cell's edge and its text.
    pub cell_margin: f32,
    pub line_width: f32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            left_margin: 10.0,
            right_margin: 10.0,
            top_margin: 10.0,
            bottom_margin: 15.0,
            header_height: 8.0,
            header_gap: 2.0,
            footer_offset: 15.0,
            footer_height: 10.0,
            cell_margin: 1.0,
            line_width: 0.2,
        }
    }
}

impl PageSetup {
    pub fn with_size(size: PageSize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn width(&self) -> f32 {
        self.size.dimensions().0
    }

    pub fn height(&self) -> f32 {
        self.size.dimensions().1
    }

    pub fn content_width(&self) -> f32 {
        self.width() - self.left_margin - self.right_margin
    }

    /// X coordinate of the right margin.
    pub fn right_edge(&self) -> f32 {
        self.width() - self.right_margin
    }

    /// Lowest y a line may reach before the page breaks.
    pub fn break_trigger(&self) -> f32 {
        self.height() - self.bottom_margin
    }

    /// Y coordinate where content starts below the header.
    pub fn content_top(&self) -> f32 {
        self.top_margin + self.header_height + self.header_gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_a4_with_ten_mm_margins() {
        let setup = PageSetup::default();
        assert_eq!(setup.size, PageSize::A4);
        assert!((setup.content_width() - 190.0).abs() < 0.001);
        assert!((setup.break_trigger() - 282.0).abs() < 0.001);
        assert!((setup.content_top() - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_letter_dimensions() {
        let setup = PageSetup::with_size(PageSize::Letter);
        assert!((setup.width() - 215.9).abs() < 0.001);
        assert!((setup.right_edge() - 205.9).abs() < 0.001);
    }

    #[test]
    fn test_page_size_display() {
        assert_eq!(PageSize::A4.to_string(), "a4");
        assert_eq!(PageSize::Letter.to_string(), "letter");
    }
}
