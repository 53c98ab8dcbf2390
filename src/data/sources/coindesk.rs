//! CoinDesk Bitcoin Price Index source
//!
//! Fetches daily closing prices in USD from the historical close endpoint.
//! The response carries the series under a price-index field as a JSON
//! object mapping `YYYY-MM-DD` to a price.

use super::{build_client, check_status, join_url, ExternalDataSource};
use crate::calendar::DateWindow;
use crate::config::{timeout, PriceSourceConfig};
use crate::error::{PipelineError, Result};
use crate::types::{parse_date, Price, PriceSeries};
use reqwest::blocking::Client;
use serde_json::Value;

/// CoinDesk price index source (no API key required)
pub struct CoindeskSource {
    config: PriceSourceConfig,
    client: Client,
}

impl CoindeskSource {
    pub fn new(config: PriceSourceConfig) -> Result<Self> {
        let client = build_client(timeout(config.timeout_secs))?;
        Ok(Self { config, client })
    }

    pub fn url(&self) -> String {
        join_url(&self.config.base_url, &self.config.endpoint)
    }

    /// Fetch closes for `window` and extract the price index
    pub fn fetch_prices(&self, window: &DateWindow) -> Result<PriceSeries> {
        let url = self.url();
        log::info!("Fetching {} prices for {}", self.name(), window);

        let response = self
            .client
            .get(&url)
            .query(&[("start", window.start_param()), ("end", window.end_param())])
            .send()?;
        let response = check_status(self.name(), response)?;

        let body: Value = response.json()?;
        let prices = parse_price_index(&body, &self.config.price_field)?;
        log::debug!("Received {} prices", prices.len());
        Ok(prices)
    }
}

impl ExternalDataSource for CoindeskSource {
    type Output = PriceSeries;

    fn fetch(&self, window: &DateWindow) -> Result<PriceSeries> {
        self.fetch_prices(window)
    }

    fn name(&self) -> &str {
        "coindesk"
    }
}

/// Extract the date -> price mapping stored under `field`
pub fn parse_price_index(body: &Value, field: &str) -> Result<PriceSeries> {
    let index = body
        .get(field)
        .ok_or_else(|| PipelineError::DataError(format!("Response has no '{}' field", field)))?
        .as_object()
        .ok_or_else(|| PipelineError::DataError(format!("'{}' is not an object", field)))?;

    let mut prices = PriceSeries::new();
    for (key, value) in index {
        let date = parse_date(key)
            .ok_or_else(|| PipelineError::ParseError(format!("Invalid price date: {}", key)))?;
        prices.insert(date, coerce_price(value)?);
    }

    Ok(prices)
}

/// Prices arrive as JSON numbers or as numeric text
pub fn coerce_price(value: &Value) -> Result<Price> {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    price.ok_or_else(|| PipelineError::ParseError(format!("Invalid price value: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_source_creation() {
        let source = CoindeskSource::new(PriceSourceConfig::default()).unwrap();
        assert_eq!(
            source.url(),
            "https://api.coindesk.com/v1/bpi/historical/close.json"
        );
        assert_eq!(source.name(), "coindesk");
    }

    #[test]
    fn test_parse_price_index() {
        let body = json!({
            "bpi": {
                "2023-01-02": 16625.08,
                "2023-01-01": "16547.5"
            },
            "disclaimer": "ignored",
            "time": {"updated": "Jan 3, 2023"}
        });

        let prices = parse_price_index(&body, "bpi").unwrap();
        assert_eq!(prices.len(), 2);

        // Ordered by date regardless of response order
        let dates: Vec<_> = prices.keys().copied().collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
            ]
        );
        assert_eq!(prices[&dates[0]], 16547.5);
        assert_eq!(prices[&dates[1]], 16625.08);
    }

    #[test]
    fn test_missing_field() {
        let body = json!({"time": {}});
        assert!(matches!(
            parse_price_index(&body, "bpi"),
            Err(PipelineError::DataError(_))
        ));
    }

    #[test]
    fn test_invalid_entries() {
        let bad_date = json!({"bpi": {"1234": 56789}});
        assert!(matches!(
            parse_price_index(&bad_date, "bpi"),
            Err(PipelineError::ParseError(_))
        ));

        let bad_price = json!({"bpi": {"2023-01-01": "n/a"}});
        assert!(parse_price_index(&bad_price, "bpi").is_err());

        assert!(coerce_price(&json!(null)).is_err());
        assert_eq!(coerce_price(&json!(" 42.5 ")).unwrap(), 42.5);
    }
}
