//! End-to-end run: fetch, stage, build, chart, write
//!
//! The steps run strictly in sequence and the first failure aborts the run.
//! The rate series is passed to the builder in memory; the staging file is
//! only a copy of the raw response for inspection or out-of-process use.

use crate::calendar::DateWindow;
use crate::config::PipelineConfig;
use crate::data::sources::{CoindeskSource, EcbSource, ExternalDataSource, RateResponse};
use crate::data::{generate_dataframe, OutputTable};
use crate::error::Result;
use crate::output::{stage_rates, ChartWriter, CsvWriter};
use crate::schema::Column;
use crate::types::PriceSeries;
use std::path::PathBuf;

/// What a completed run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub window: DateWindow,
    pub prices_fetched: usize,
    pub rates_fetched: usize,
    pub rows: usize,
    pub staging_path: Option<PathBuf>,
    pub csv_path: PathBuf,
    pub chart_path: PathBuf,
}

pub struct Pipeline<P, R> {
    config: PipelineConfig,
    prices: P,
    rates: R,
}

impl Pipeline<CoindeskSource, EcbSource> {
    /// Pipeline against the configured remote sources
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        let prices = CoindeskSource::new(config.price_source.clone())?;
        let rates = EcbSource::new(config.rate_source.clone())?;
        Self::new(config, prices, rates)
    }
}

impl<P, R> Pipeline<P, R>
where
    P: ExternalDataSource<Output = PriceSeries>,
    R: ExternalDataSource<Output = RateResponse>,
{
    pub fn new(config: PipelineConfig, prices: P, rates: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            prices,
            rates,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run over the configured lookback ending today
    pub fn run(&self) -> Result<RunReport> {
        let window = DateWindow::ending_today(self.config.lookback_months)?;
        self.run_for_window(window)
    }

    pub fn run_for_window(&self, window: DateWindow) -> Result<RunReport> {
        let config = &self.config;

        let prices = self.prices.fetch(&window)?;
        let response = self.rates.fetch(&window)?;

        let staging_path = match config.staging_path() {
            Some(path) => {
                stage_rates(path, &response.csv)?;
                Some(path.to_path_buf())
            }
            None => None,
        };

        let rates = response.parse()?;
        let table = generate_dataframe(&config.schema, &prices, &rates, config.rolling_window)?;
        log_summary(&table);

        let chart = ChartWriter::new(config.chart_path(), &config.chart);
        chart.write(&table)?;

        let csv = CsvWriter::new(config.csv_path());
        csv.write(&table)?;

        Ok(RunReport {
            window,
            prices_fetched: prices.len(),
            rates_fetched: rates.len(),
            rows: table.len(),
            staging_path,
            csv_path: csv.path().to_path_buf(),
            chart_path: chart.path().to_path_buf(),
        })
    }
}

fn log_summary(table: &OutputTable) {
    log::info!("Built table with {} rows", table.len());
    for column in Column::ALL {
        if let Some(summary) = table.summary(column) {
            log::debug!(
                "{}: n={} min={:.2} max={:.2} mean={:.2}",
                table.schema().column_name(column),
                summary.count,
                summary.min,
                summary.max,
                summary.mean
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    struct NoPrices;

    impl ExternalDataSource for NoPrices {
        type Output = PriceSeries;

        fn fetch(&self, _window: &DateWindow) -> Result<PriceSeries> {
            Err(PipelineError::HttpStatus {
                source_name: "stub".to_string(),
                status: 500,
            })
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    struct NoRates;

    impl ExternalDataSource for NoRates {
        type Output = RateResponse;

        fn fetch(&self, _window: &DateWindow) -> Result<RateResponse> {
            panic!("rates must not be fetched after a price failure");
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PipelineConfig {
            rolling_window: 0,
            ..PipelineConfig::default()
        };
        assert!(Pipeline::new(config, NoPrices, NoRates).is_err());
    }

    #[test]
    fn test_price_failure_aborts() {
        let pipeline = Pipeline::new(PipelineConfig::default(), NoPrices, NoRates).unwrap();
        let err = pipeline.run().unwrap_err();
        assert!(matches!(err, PipelineError::HttpStatus { status: 500, .. }));
        assert!(!err.is_recoverable());
    }
}
