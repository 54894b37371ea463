//! Handles user-facing status output for the CLI.

use std::io::Write;
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::batch::{BatchSummary, RunOutcome};

/// Prints a coloured tag followed by a message on stderr.
fn print_status(tag: &str, color: Color, message: &str) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stderr, "{:>9}", tag);
    let _ = stderr.reset();
    let _ = writeln!(stderr, " {}", message);
}

pub fn print_rendered(input: &Path, output: &Path) {
    print_status(
        "Rendered",
        Color::Green,
        &format!("{} -> {}", input.display(), output.display()),
    );
}

pub fn print_failed(input: &Path, error: &dyn std::fmt::Display) {
    print_status("Failed", Color::Red, &format!("{}: {}", input.display(), error));
}

/// Prints one line per run and a closing count.
pub fn print_batch(summary: &BatchSummary) {
    for outcome in &summary.outcomes {
        match outcome {
            RunOutcome::Rendered { input, output } => print_rendered(input, output),
            RunOutcome::Failed { input, error } => print_failed(input, error),
        }
    }
    let color = if summary.failed() > 0 {
        Color::Yellow
    } else {
        Color::Green
    };
    print_status(
        "Finished",
        color,
        &format!("{} rendered, {} failed", summary.rendered(), summary.failed()),
    );
}
