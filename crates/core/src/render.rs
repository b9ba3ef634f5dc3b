use crate::block::{parse_blocks, Block, HeadingLevel};
use crate::canvas::{Advance, Canvas, Cell, CellWidth, Font, Shade, TextStyle};
use crate::normalize::normalize;
use crate::table::{fit_row, truncate_chars};
use crate::RenderError;

const BODY_SIZE: f32 = 9.0;
const BODY_LINE_HEIGHT: f32 = 5.0;
const BULLET_MARKER: &str = "*";
const BULLET_MARKER_WIDTH: f32 = 5.0;
const BLANK_LINE_GAP: f32 = 2.0;

const RULE_SHADE: Shade = Shade(200);
const RULE_GAP_BEFORE: f32 = 2.0;
const RULE_GAP_AFTER: f32 = 4.0;

const TABLE_FONT_SIZE: f32 = 8.0;
const TABLE_HEADER_HEIGHT: f32 = 6.0;
const TABLE_ROW_HEIGHT: f32 = 5.0;
const TABLE_HEADER_FILL: Shade = Shade(220);
const TABLE_CELL_MAX_CHARS: usize = 28;
const TABLE_GAP_AFTER: f32 = 3.0;

const CODE_SIZE: f32 = 8.0;
const CODE_LINE_HEIGHT: f32 = 4.0;
const CODE_INDENT: f32 = 2.0;
const CODE_FILL: Shade = Shade(245);
const CODE_MAX_CHARS: usize = 90;
const CODE_ELLIPSIS: &str = "...";
const CODE_GAP_AFTER: f32 = 3.0;

/// Font size and spacing for one heading level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingMetrics {
    pub size: f32,
    pub line_height: f32,
    pub gap_before: f32,
    pub gap_after: f32,
}

impl HeadingMetrics {
    pub fn for_level(level: HeadingLevel) -> Self {
        let (size, line_height, gap_before, gap_after) = match level.as_u8() {
            1 => (16.0, 10.0, 5.0, 3.0),
            2 => (13.0, 8.0, 4.0, 2.5),
            3 => (11.0, 7.0, 3.0, 2.0),
            _ => (10.0, 6.0, 2.0, 1.0),
        };
        Self {
            size,
            line_height,
            gap_before,
            gap_after,
        }
    }
}

/// What a render pass saw, for the caller to report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub blocks: usize,
    /// Zero-based line of a code fence that was never closed. Its lines are
    /// not rendered.
    pub unclosed_fence: Option<usize>,
}

/// Classify `source` line by line and draw every block onto `canvas`.
pub fn render_document<C: Canvas + ?Sized>(
    source: &str,
    canvas: &mut C,
) -> Result<RenderSummary, RenderError> {
    let lines: Vec<&str> = source.lines().collect();
    let (blocks, unclosed_fence) = parse_blocks(&lines);

    for block in &blocks {
        canvas.set_x(0.0);
        render_block(block, canvas)?;
    }

    Ok(RenderSummary {
        blocks: blocks.len(),
        unclosed_fence,
    })
}

/// Draw a single block.
pub fn render_block<C: Canvas + ?Sized>(block: &Block, canvas: &mut C) -> Result<(), RenderError> {
    let body = TextStyle::new(Font::Helvetica, BODY_SIZE);

    match block {
        Block::Heading { level, text } => {
            let metrics = HeadingMetrics::for_level(*level);
            canvas.new_line(metrics.gap_before);
            canvas.emit_text(
                TextStyle::new(Font::HelveticaBold, metrics.size),
                metrics.line_height,
                &normalize(text),
            );
            canvas.new_line(metrics.gap_after);
        }
        Block::HorizontalRule => {
            canvas.new_line(RULE_GAP_BEFORE);
            canvas.emit_rule(RULE_SHADE);
            canvas.new_line(RULE_GAP_AFTER);
        }
        Block::BulletItem(text) => {
            let marker = Cell::new(
                BULLET_MARKER,
                body,
                CellWidth::Fixed(BULLET_MARKER_WIDTH),
                BODY_LINE_HEIGHT,
            );
            canvas.emit_cell(&marker);
            canvas.emit_text(body, BODY_LINE_HEIGHT, &normalize(text));
        }
        Block::NumberedItem(line) => {
            canvas.emit_text(body, BODY_LINE_HEIGHT, &normalize(line));
        }
        Block::Paragraph(line) => {
            let text = normalize(line);
            if !text.trim().is_empty() {
                canvas.emit_text(body, BODY_LINE_HEIGHT, &text);
            }
        }
        Block::BlankLine => canvas.new_line(BLANK_LINE_GAP),
        Block::Table { line, rows } => render_table(*line, rows, canvas)?,
        Block::CodeBlock(lines) => render_code(lines, canvas),
    }

    Ok(())
}

fn render_table<C: Canvas + ?Sized>(
    line: usize,
    rows: &[Vec<String>],
    canvas: &mut C,
) -> Result<(), RenderError> {
    // A table made only of separator rows draws nothing.
    let Some((header, body)) = rows.split_first() else {
        return Ok(());
    };
    if header.is_empty() {
        return Err(RenderError::EmptyTableHeader { line: line + 1 });
    }

    let columns = header.len();
    let width = CellWidth::Fixed(canvas.content_width() / columns as f32);

    let header_style = TextStyle::new(Font::HelveticaBold, TABLE_FONT_SIZE);
    for cell in header {
        let text = table_cell_text(cell);
        let cell = Cell::new(&text, header_style, width, TABLE_HEADER_HEIGHT)
            .bordered()
            .filled(TABLE_HEADER_FILL);
        canvas.emit_cell(&cell);
    }
    canvas.new_line(TABLE_HEADER_HEIGHT);

    let row_style = TextStyle::new(Font::Helvetica, TABLE_FONT_SIZE);
    for row in body {
        for cell in fit_row(row, columns) {
            let text = table_cell_text(&cell);
            canvas.emit_cell(&Cell::new(&text, row_style, width, TABLE_ROW_HEIGHT).bordered());
        }
        canvas.new_line(TABLE_ROW_HEIGHT);
    }

    canvas.new_line(TABLE_GAP_AFTER);
    Ok(())
}

fn table_cell_text(cell: &str) -> String {
    normalize(truncate_chars(cell, TABLE_CELL_MAX_CHARS))
}

fn render_code<C: Canvas + ?Sized>(lines: &[String], canvas: &mut C) {
    let style = TextStyle::new(Font::Courier, CODE_SIZE);
    for line in lines {
        let display = code_display_line(line);
        canvas.set_x(CODE_INDENT);
        let cell = Cell::new(&display, style, CellWidth::Remaining, CODE_LINE_HEIGHT)
            .filled(CODE_FILL)
            .then(Advance::NextLine);
        canvas.emit_cell(&cell);
    }
    canvas.new_line(CODE_GAP_AFTER);
}

/// Code is drawn verbatim, cut at a fixed width with an ellipsis marker.
pub fn code_display_line(line: &str) -> String {
    let kept = truncate_chars(line, CODE_MAX_CHARS);
    if kept.len() < line.len() {
        format!("{kept}{CODE_ELLIPSIS}")
    } else {
        line.to_string()
    }
}
