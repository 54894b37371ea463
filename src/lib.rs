//! Renders nightly sanity test results for access point models into a
//! static HTML report.

pub use crate::errors::ReportError;

pub mod batch;
pub mod catalog;
pub mod cli;
pub mod document;
pub mod errors;
pub mod render;
