//! Rendering every run under a reports directory.
//!
//! The nightly runner writes one directory per run, each holding a
//! `report_data.json`. A batch render writes the HTML report next to each
//! results document, labelled with the run directory's name.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::catalog::ReportCatalog;
use crate::document::ResultsDocument;
use crate::errors::ReportError;
use crate::render::{HtmlRenderer, Renderer};

/// File name the runner gives each results document.
pub const RESULTS_FILE_NAME: &str = "report_data.json";
pub const DEFAULT_OUTPUT_NAME: &str = "report.html";

/// Outcome of rendering one run.
#[derive(Debug)]
pub enum RunOutcome {
    Rendered { input: PathBuf, output: PathBuf },
    Failed { input: PathBuf, error: ReportError },
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<RunOutcome>,
}

impl BatchSummary {
    pub fn rendered(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RunOutcome::Rendered { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.rendered()
    }
}

/// Recursively finds results documents under `root`, sorted by path.
pub fn discover_results<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, ReportError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| ReportError::Walk {
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name() == RESULTS_FILE_NAME {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// The run label for a results document: its parent directory's name.
pub fn label_for(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Renders one results document to `output`.
///
/// The report is written to a temporary file beside `output` and renamed into
/// place, so a failed write leaves any previous report untouched. Refuses to
/// write over `input`.
pub fn render_file(
    input: &Path,
    output: &Path,
    catalog: &ReportCatalog,
    label: &str,
) -> Result<(), ReportError> {
    if same_file(input, output) {
        return Err(ReportError::OutputOverwritesInput {
            path: output.to_path_buf(),
        });
    }
    let doc = ResultsDocument::load(input)?;
    let html = HtmlRenderer::new().render(&doc, catalog, label);
    write_atomic(output, html.as_bytes())
}

fn write_atomic(output: &Path, contents: &[u8]) -> Result<(), ReportError> {
    let write_err = |source| ReportError::Write {
        path: output.to_path_buf(),
        source,
    };
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.persist(output).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Whether `a` and `b` name the same file. `b` need not exist yet.
fn same_file(a: &Path, b: &Path) -> bool {
    match (resolve(a), resolve(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(p) = path.canonicalize() {
        return Some(p);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|p| p.join(name))
}

/// Checks that `name` is a plain file name that does not collide with the
/// results documents.
pub fn validate_output_name(name: &str) -> Result<(), ReportError> {
    let plain = Path::new(name).file_name().map(|n| n == name).unwrap_or(false);
    if !plain || name.contains(|c: char| c == '/' || c == '\\') {
        return Err(ReportError::OutputName {
            name: name.to_string(),
        });
    }
    if name == RESULTS_FILE_NAME {
        return Err(ReportError::OutputOverwritesInput {
            path: PathBuf::from(name),
        });
    }
    Ok(())
}

/// Renders every run under `root`. A failing run is recorded in the summary
/// and does not stop the others; no output is written for it.
pub fn render_all(
    root: &Path,
    catalog: &ReportCatalog,
    output_name: &str,
) -> Result<BatchSummary, ReportError> {
    validate_output_name(output_name)?;
    let mut summary = BatchSummary::default();
    for input in discover_results(root)? {
        let output = input.with_file_name(output_name);
        let label = label_for(&input);
        debug!("rendering run `{}` from {}", label, input.display());
        match render_file(&input, &output, catalog, &label) {
            Ok(()) => summary.outcomes.push(RunOutcome::Rendered { input, output }),
            Err(error) => {
                warn!("skipping {}: {}", input.display(), error);
                summary.outcomes.push(RunOutcome::Failed { input, error });
            }
        }
    }
    Ok(summary)
}
