//! The report command-line interface.
//!
//! Parses arguments, loads the catalog, and dispatches to the library.

use std::borrow::Cow;
use std::io::{self, Write};
use std::process;

use clap::Parser;
use log::debug;

use crate::batch::{self, label_for};
use crate::catalog::ReportCatalog;
use crate::cli::args::{Command, ReportArgs};
use crate::document::ResultsDocument;
use crate::errors::ReportError;
use crate::render::render_report;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = ReportArgs::parse();
    match dispatch(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            process::exit(1);
        }
    }
}

/// Runs a command. `Ok(false)` means the command finished but something in
/// it failed (a batch with failed runs).
fn dispatch(args: ReportArgs) -> Result<bool, ReportError> {
    let catalog: Cow<'_, ReportCatalog> = match &args.catalog {
        Some(path) => Cow::Owned(ReportCatalog::load(path)?),
        None => Cow::Borrowed(ReportCatalog::standard()),
    };

    match args.command {
        Command::Render {
            file,
            output: destination,
            label,
        } => {
            let label = label.unwrap_or_else(|| {
                let resolved = file.canonicalize().unwrap_or_else(|_| file.clone());
                label_for(&resolved)
            });
            match destination {
                Some(out) => {
                    batch::render_file(&file, &out, &catalog, &label)?;
                    output::print_rendered(&file, &out);
                }
                None => {
                    let doc = ResultsDocument::load(&file)?;
                    let html = render_report(&doc, &catalog, &label);
                    write_stdout(io::stdout().lock(), &html)?;
                }
            }
            Ok(true)
        }
        Command::Batch { root, output_name } => {
            debug!("batch rendering under {}", root.display());
            let summary = batch::render_all(&root, &catalog, &output_name)?;
            output::print_batch(&summary);
            Ok(summary.failed() == 0)
        }
        Command::Catalog => {
            write_stdout(io::stdout().lock(), &catalog.to_yaml()?)?;
            Ok(true)
        }
    }
}

/// Writes `text` to `out`. A reader that went away (`| head`) is not an error.
fn write_stdout<W: Write>(mut out: W, text: &str) -> Result<(), ReportError> {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(ReportError::Stdout { source: e }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingWriter(io::ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(self.0))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closed_pipe_is_not_an_error() {
        assert!(write_stdout(FailingWriter(io::ErrorKind::BrokenPipe), "<html>").is_ok());
    }

    #[test]
    fn other_write_failures_are_reported() {
        let err = write_stdout(FailingWriter(io::ErrorKind::PermissionDenied), "<html>");
        assert!(matches!(err, Err(ReportError::Stdout { .. })));
    }

    #[test]
    fn writes_whole_text() {
        let mut buf = Vec::new();
        write_stdout(&mut buf, "<html>\n").unwrap();
        assert_eq!(buf, b"<html>\n");
    }
}
