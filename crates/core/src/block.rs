use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::table::parse_table;

pub const FENCE: &str = "```";

#[derive(Debug, Error)]
#[error("Invalid heading level (must be 1-4)")]
pub struct InvalidHeadingLevel;

/// Heading depth, restricted to the four levels the renderer styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = InvalidHeadingLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=4).contains(&value) {
            Ok(HeadingLevel(value))
        } else {
            Err(InvalidHeadingLevel)
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// A run of source lines that gets one rendering treatment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: HeadingLevel, text: String },
    HorizontalRule,
    BulletItem(String),
    /// The whole source line, numeral prefix included.
    NumberedItem(String),
    Table { line: usize, rows: Vec<Vec<String>> },
    CodeBlock(Vec<String>),
    Paragraph(String),
    BlankLine,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Default,
    /// Inside a fence; holds the raw lines seen so far and the fence's line.
    InCodeBlock { start: usize, lines: Vec<String> },
}

/// Cursor plus block mode, threaded through [`step`] one block at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    pub cursor: usize,
    pub mode: Mode,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once every line has been consumed.
    pub fn is_done(&self, lines: &[&str]) -> bool {
        self.cursor >= lines.len()
    }
}

fn is_numbered_item(line: &str) -> bool {
    static RE_NUMBERED: OnceLock<Regex> = OnceLock::new();
    let re = RE_NUMBERED.get_or_init(|| Regex::new(r"^\d+\. ").unwrap());
    re.is_match(line)
}

/// Classify a single line outside of code and table blocks.
///
/// Patterns are tried in precedence order and the first match wins.
pub fn classify_line(line: &str) -> Block {
    const HEADINGS: [(&str, u8); 4] = [("# ", 1), ("## ", 2), ("### ", 3), ("#### ", 4)];

    for (prefix, level) in HEADINGS {
        if let Some(text) = line.strip_prefix(prefix) {
            return Block::Heading {
                level: HeadingLevel(level),
                text: text.to_string(),
            };
        }
    }

    if line.starts_with("---") {
        Block::HorizontalRule
    } else if let Some(text) = line.strip_prefix("- ") {
        Block::BulletItem(text.to_string())
    } else if is_numbered_item(line) {
        Block::NumberedItem(line.to_string())
    } else if !line.trim().is_empty() {
        Block::Paragraph(line.to_string())
    } else {
        Block::BlankLine
    }
}

/// Advance the state machine by one step.
///
/// Returns the block completed by this step, if any, and the next state.
/// Fence lines and buffered code lines complete no block on their own. The
/// cursor always moves forward by at least one line while input remains.
pub fn step(lines: &[&str], state: RenderState) -> (Option<Block>, RenderState) {
    let RenderState { cursor, mode } = state;
    let Some(line) = lines.get(cursor) else {
        return (None, RenderState { cursor, mode });
    };

    match mode {
        Mode::InCodeBlock {
            start,
            lines: mut buffered,
        } => {
            if line.starts_with(FENCE) {
                let state = RenderState {
                    cursor: cursor + 1,
                    mode: Mode::Default,
                };
                (Some(Block::CodeBlock(buffered)), state)
            } else {
                buffered.push(line.to_string());
                let state = RenderState {
                    cursor: cursor + 1,
                    mode: Mode::InCodeBlock {
                        start,
                        lines: buffered,
                    },
                };
                (None, state)
            }
        }
        Mode::Default => {
            if line.starts_with(FENCE) {
                let state = RenderState {
                    cursor: cursor + 1,
                    mode: Mode::InCodeBlock {
                        start: cursor,
                        lines: Vec::new(),
                    },
                };
                return (None, state);
            }

            if line.starts_with('|') {
                let end = lines[cursor..]
                    .iter()
                    .position(|l| !l.starts_with('|'))
                    .map_or(lines.len(), |offset| cursor + offset);
                let block = Block::Table {
                    line: cursor,
                    rows: parse_table(&lines[cursor..end]),
                };
                let state = RenderState {
                    cursor: end,
                    mode: Mode::Default,
                };
                return (Some(block), state);
            }

            let state = RenderState {
                cursor: cursor + 1,
                mode: Mode::Default,
            };
            (Some(classify_line(line)), state)
        }
    }
}

/// Collect every block of a document, along with the line of a fence that
/// was never closed.
pub fn parse_blocks(lines: &[&str]) -> (Vec<Block>, Option<usize>) {
    let mut blocks = Vec::new();
    let mut state = RenderState::new();

    while !state.is_done(lines) {
        let (block, next) = step(lines, state);
        blocks.extend(block);
        state = next;
    }

    (blocks, unclosed_fence(&state))
}

/// Line index of the opening fence if the state ended inside a code block.
pub fn unclosed_fence(state: &RenderState) -> Option<usize> {
    match state.mode {
        Mode::InCodeBlock { start, .. } => Some(start),
        Mode::Default => None,
    }
}
