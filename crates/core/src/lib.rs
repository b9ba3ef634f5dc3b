//! Core library for md2pdf
//!
//! This crate implements the **Functional Core** of the md2pdf application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The md2pdf project splits its work across three crates:
//!
//! - **`md2pdf_core`** (this crate): Line classification and rendering logic with zero I/O
//! - **`pdf`**: A [`canvas::Canvas`] implementation that lays pages out and writes PDF bytes
//! - **`md2pdf`**: File I/O, CLI parsing and error reporting (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: The renderer only talks to the canvas it is handed
//! - **Testable**: The renderer is exercised against a recording canvas, no PDF required
//!
//! # Module Organization
//!
//! - [`normalize`]: Markdown emphasis stripping and typographic character substitution
//! - [`table`]: Pipe table parsing and the ragged-row policy
//! - [`block`]: Line classification and the explicit [`block::RenderState`] machine
//! - [`title`]: Document title derivation
//! - [`canvas`]: The drawing capability the renderer depends on
//! - [`render`]: Block rendering onto a [`canvas::Canvas`]
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use md2pdf_core::render::render_document;
//!
//! let mut canvas = MyCanvas::default();
//! let summary = render_document("# Hello\n\nWorld", &mut canvas)?;
//! assert_eq!(summary.blocks, 3);
//! ```

use thiserror::Error;

pub mod block;
pub mod canvas;
pub mod normalize;
pub mod render;
pub mod table;
pub mod title;

pub use block::{Block, HeadingLevel, Mode, RenderState};
pub use canvas::{Advance, Align, Canvas, Cell, CellWidth, Font, Shade, TextStyle};
pub use normalize::normalize;
pub use render::{render_document, RenderSummary};
pub use table::parse_table;
pub use title::derive_title;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("table starting at line {line} has no header columns")]
    EmptyTableHeader { line: usize },
}
