//! ECB statistical data warehouse source
//!
//! Requests one exchange-rate series as CSV. The series key encodes the
//! frequency, currency pair, rate type and series variation; the default
//! `D.USD.EUR.SP00.A` is the daily USD/EUR reference rate.

use super::{build_client, check_status, join_url, ExternalDataSource};
use crate::calendar::DateWindow;
use crate::config::{timeout, RateSourceConfig};
use crate::data::rates::RateSeries;
use crate::error::Result;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

const CSV_CONTENT_TYPE: &str = "text/csv";

/// Raw CSV body as delivered by the rate provider
#[derive(Debug, Clone, PartialEq)]
pub struct RateResponse {
    pub csv: String,
}

impl RateResponse {
    pub fn new(csv: impl Into<String>) -> Self {
        Self { csv: csv.into() }
    }

    /// Parse the body into a rate series
    pub fn parse(&self) -> Result<RateSeries> {
        RateSeries::from_csv_str(&self.csv)
    }
}

/// ECB exchange rate source
pub struct EcbSource {
    config: RateSourceConfig,
    client: Client,
}

impl EcbSource {
    pub fn new(config: RateSourceConfig) -> Result<Self> {
        let client = build_client(timeout(config.timeout_secs))?;
        Ok(Self { config, client })
    }

    pub fn url(&self) -> String {
        join_url(
            &self.config.base_url,
            &format!(
                "service/data/{}/{}",
                self.config.dataflow, self.config.series_key
            ),
        )
    }

    /// Fetch the raw CSV for `window`
    pub fn fetch_csv(&self, window: &DateWindow) -> Result<RateResponse> {
        let url = self.url();
        log::info!(
            "Fetching {} series {} for {}",
            self.name(),
            self.config.series_key,
            window
        );

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, CSV_CONTENT_TYPE)
            .query(&[
                ("startPeriod", window.start_param()),
                ("endPeriod", window.end_param()),
                ("detail", self.config.detail.clone()),
            ])
            .send()?;
        let response = check_status(self.name(), response)?;

        let csv = response.text()?;
        log::debug!("Received {} bytes of rate CSV", csv.len());
        Ok(RateResponse { csv })
    }
}

impl ExternalDataSource for EcbSource {
    type Output = RateResponse;

    fn fetch(&self, window: &DateWindow) -> Result<RateResponse> {
        self.fetch_csv(window)
    }

    fn name(&self) -> &str {
        "ecb"
    }
}
