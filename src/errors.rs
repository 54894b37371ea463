//! Error types for report generation.
//!
//! Only conditions that must stop a report surface here. A key that is absent
//! from a results document is not an error: it renders as a blank cell.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// The single error type for the crate.
#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    /// The results document is not valid JSON.
    #[error("{name} is not a valid results document: {message}")]
    #[diagnostic(
        code(sanity_report::parse),
        help("the results document must be a JSON object written by the sanity runner")
    )]
    Parse {
        name: String,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("failed to read {}", path.display())]
    #[diagnostic(code(sanity_report::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    #[diagnostic(code(sanity_report::io))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report would be written over the results document it is rendered from.
    #[error("refusing to write report over its results document {}", path.display())]
    #[diagnostic(
        code(sanity_report::output_path),
        help("choose an output name other than report_data.json")
    )]
    OutputOverwritesInput { path: PathBuf },

    #[error("invalid report file name `{name}`")]
    #[diagnostic(
        code(sanity_report::output_name),
        help("the output name is a plain file name written beside each results document")
    )]
    OutputName { name: String },

    #[error("failed to write to stdout")]
    #[diagnostic(code(sanity_report::io))]
    Stdout {
        #[source]
        source: std::io::Error,
    },

    /// A catalog was loaded but describes an unusable report layout.
    #[error("invalid report catalog: {message}")]
    #[diagnostic(code(sanity_report::catalog))]
    Catalog { message: String },

    #[error("could not read catalog {}: {message}", path.display())]
    #[diagnostic(
        code(sanity_report::catalog_format),
        help("catalog files must be .yaml, .yml or .json")
    )]
    CatalogFormat { path: PathBuf, message: String },

    #[error("failed to walk report directory: {message}")]
    #[diagnostic(code(sanity_report::walk))]
    Walk { message: String },
}

impl ReportError {
    /// Builds a parse error from a serde_json failure, pointing at the
    /// location serde_json reports inside `source`.
    pub fn parse(name: &str, source: &str, err: &serde_json::Error) -> Self {
        let offset = byte_offset(source, err.line(), err.column());
        let len = if offset < source.len() { 1 } else { 0 };
        ReportError::Parse {
            name: name.to_string(),
            message: err.to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: (offset, len).into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        ReportError::Catalog {
            message: message.into(),
        }
    }
}

/// Converts serde_json's one-based line and column into a byte offset,
/// clamped to the end of `source`.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0;
    for (idx, text) in source.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let col = column.saturating_sub(1).min(text.len());
            return floor_char_boundary(source, offset + col);
        }
        offset += text.len();
    }
    source.len()
}

fn floor_char_boundary(source: &str, mut idx: usize) -> usize {
    idx = idx.min(source.len());
    while !source.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
