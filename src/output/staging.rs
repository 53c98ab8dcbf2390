//! Staging of the raw rate CSV

use super::log_write_failure;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Write the raw rate response to `path`, replacing any previous content
pub fn stage_rates(path: &Path, csv_text: &str) -> Result<()> {
    fs::write(path, csv_text).map_err(|e| log_write_failure("rate data", path, e))?;
    log::debug!("Staged {} bytes of rate data at {}", csv_text.len(), path.display());
    Ok(())
}
