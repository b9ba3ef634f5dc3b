use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use md2pdf_core::derive_title;
use pdf::{markdown_to_pdf, PageSetup, PageSize};

use crate::prelude::*;

/// Resolved command-line options for a single conversion.
#[derive(Debug, Clone)]
pub struct Options {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub title: Option<String>,
    pub page_size: PageSize,
}

/// `notes.md` becomes `notes.pdf` next to it.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

/// Convert the input file and write the PDF, returning where it was written.
pub fn run(options: &Options) -> Result<PathBuf, Error> {
    let input = &options.input;
    if !input.exists() {
        return Err(Error::NotFound(input.display().to_string()));
    }

    let source = fs::read_to_string(input)
        .map_err(|e| Error::RenderFailure(format!("failed to read {}: {e}", input.display())))?;

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input));
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = derive_title(&source, options.title.as_deref(), &stem);

    log::debug!("input: {}", input.display());
    log::debug!("output: {}", output.display());
    log::debug!("title: {title:?}, page size: {}", options.page_size);

    let document = markdown_to_pdf(&source, &title, PageSetup::with_size(options.page_size))
        .map_err(|e| Error::RenderFailure(e.to_string()))?;

    if let Some(line) = document.summary.unclosed_fence {
        log::warn!(
            "code fence opened on line {} is never closed; its contents were skipped",
            line + 1
        );
    }
    if document.substituted_chars > 0 {
        log::warn!(
            "{} character(s) have no glyph in the standard PDF fonts and were replaced with '?'",
            document.substituted_chars
        );
    }
    log::debug!(
        "rendered {} blocks onto {} page(s), {} bytes",
        document.summary.blocks,
        document.pages,
        document.bytes.len()
    );

    write_output(&output, &document.bytes)?;
    Ok(output)
}

/// Write into a temporary file next to `path`, then move it into place.
///
/// On failure the temporary file is dropped and anything already at `path`
/// is left untouched.
fn write_output(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let fail = |err: std::io::Error| {
        Error::RenderFailure(format!("failed to write {}: {err}", path.display()))
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(fail)?;
    file.write_all(bytes).map_err(fail)?;
    file.persist(path).map_err(|e| fail(e.error))?;
    Ok(())
}
