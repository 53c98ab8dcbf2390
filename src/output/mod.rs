//! File outputs: staged rate CSV, result CSV and chart
//!
//! Every writer logs a failed write at error level before returning the
//! error, so the failure is recorded even if the caller discards it.

pub mod chart;
pub mod csv_writer;
pub mod staging;

pub use chart::ChartWriter;
pub use csv_writer::CsvWriter;
pub use staging::stage_rates;

use crate::error::PipelineError;
use std::path::Path;

pub(crate) fn log_write_failure(what: &str, path: &Path, err: std::io::Error) -> PipelineError {
    log::error!("Failed to write {} to {}: {}", what, path.display(), err);
    PipelineError::write(path, err)
}
