//! External data source integrations
//!
//! This module provides the two remote series the pipeline combines:
//! - CoinDesk: Bitcoin Price Index daily closes (USD)
//! - ECB: daily euro foreign exchange reference rates (CSV)

pub mod coindesk;
pub mod ecb;

pub use coindesk::CoindeskSource;
pub use ecb::{EcbSource, RateResponse};

use crate::calendar::DateWindow;
use crate::error::{PipelineError, Result};
use reqwest::blocking::{Client, Response};
use std::time::Duration;

/// Trait for external data sources
pub trait ExternalDataSource {
    /// What one fetch yields
    type Output;

    /// Fetch the series covering `window`. One request, no retry.
    fn fetch(&self, window: &DateWindow) -> Result<Self::Output>;

    /// Get the source name
    fn name(&self) -> &str;
}

impl<S: ExternalDataSource + ?Sized> ExternalDataSource for &S {
    type Output = S::Output;

    fn fetch(&self, window: &DateWindow) -> Result<Self::Output> {
        (**self).fetch(window)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| PipelineError::DataError(format!("Failed to create HTTP client: {}", e)))
}

/// Turn a non-success status into an error
pub(crate) fn check_status(source_name: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        log::debug!("{} responded with {}", source_name, status);
        return Err(PipelineError::HttpStatus {
            source_name: source_name.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://a.b/", "/c/d"), "https://a.b/c/d");
        assert_eq!(join_url("https://a.b", "c"), "https://a.b/c");
    }

    #[test]
    fn test_client_creation() {
        assert!(build_client(None).is_ok());
        assert!(build_client(Some(Duration::from_secs(5))).is_ok());
    }
}
