//! Pipeline configuration
//!
//! Every field has a default, and the defaults reproduce the fixed
//! behaviour: trailing 12 months, 7-row window, outputs in the working
//! directory, raw rate CSV staged to `tmp.csv`. A TOML file may override
//! any subset of keys.

use crate::error::{PipelineError, Result};
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR_NAME: &str = ".btc-eur-rolling";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Price index endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceSourceConfig {
    pub base_url: String,
    /// Path below `base_url`, without leading slash
    pub endpoint: String,
    /// JSON field holding the date -> price mapping
    pub price_field: String,
    /// Request timeout; `None` leaves the HTTP client default
    pub timeout_secs: Option<u64>,
}

impl Default for PriceSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coindesk.com".to_string(),
            endpoint: "v1/bpi/historical/close.json".to_string(),
            price_field: "bpi".to_string(),
            timeout_secs: None,
        }
    }
}

/// Statistical data service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateSourceConfig {
    pub base_url: String,
    pub dataflow: String,
    /// Series key; the leading `D` selects daily frequency
    pub series_key: String,
    pub detail: String,
    pub timeout_secs: Option<u64>,
}

impl Default for RateSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://sdw-wsrest.ecb.europa.eu".to_string(),
            dataflow: "EXR".to_string(),
            series_key: "D.USD.EUR.SP00.A".to_string(),
            detail: "dataonly".to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub schema: Schema,
    pub price_source: PriceSourceConfig,
    pub rate_source: RateSourceConfig,
    pub chart: ChartConfig,
    /// Length of the fetch window in calendar months
    pub lookback_months: u32,
    /// Rows in the rolling-average window
    pub rolling_window: usize,
    pub output_dir: PathBuf,
    /// Write the raw rate CSV to `staging_file` before building
    pub stage_rates: bool,
    pub staging_file: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            schema: Schema::default(),
            price_source: PriceSourceConfig::default(),
            rate_source: RateSourceConfig::default(),
            chart: ChartConfig::default(),
            lookback_months: 12,
            rolling_window: 7,
            output_dir: PathBuf::from("."),
            stage_rates: true,
            staging_file: PathBuf::from("tmp.csv"),
        }
    }
}

impl PipelineConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// location `~/.btc-eur-rolling/config.toml` is used when present,
    /// otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(config_path) => Self::from_file(config_path)?,
            None => match Self::default_path() {
                Some(default_config) if default_config.exists() => {
                    log::debug!("Using config at {}", default_config.display());
                    Self::from_file(&default_config)?
                }
                _ => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            PipelineError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| PipelineError::ConfigError(format!("Failed to parse config: {}", e)))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<()> {
        self.schema.validate()?;

        if self.rolling_window == 0 {
            return Err(PipelineError::ConfigError(
                "rolling_window must be greater than 0".to_string(),
            ));
        }
        if self.lookback_months == 0 {
            return Err(PipelineError::ConfigError(
                "lookback_months must be greater than 0".to_string(),
            ));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(PipelineError::ConfigError(format!(
                "Chart size must be non-zero, got {}x{}",
                self.chart.width, self.chart.height
            )));
        }
        if self.price_source.base_url.is_empty() || self.rate_source.base_url.is_empty() {
            return Err(PipelineError::ConfigError(
                "Source base_url must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn csv_path(&self) -> PathBuf {
        self.schema.csv_path(&self.output_dir)
    }

    pub fn chart_path(&self) -> PathBuf {
        self.schema.chart_path(&self.output_dir)
    }

    /// Staging destination, if staging is enabled
    pub fn staging_path(&self) -> Option<&Path> {
        if self.stage_rates {
            Some(&self.staging_file)
        } else {
            None
        }
    }
}

pub(crate) fn timeout(secs: Option<u64>) -> Option<Duration> {
    secs.map(Duration::from_secs)
}
