//! Exchange rate series parsed from the provider's CSV

use crate::error::{PipelineError, Result};
use crate::types::{parse_date, Rate};
use chrono::NaiveDate;
use hashbrown::HashMap;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

pub const DATE_COLUMN: &str = "TIME_PERIOD";
pub const VALUE_COLUMN: &str = "OBS_VALUE";

/// One observation; `rate` is `None` when the provider left it blank
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateObservation {
    pub date: NaiveDate,
    pub rate: Option<Rate>,
}

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "TIME_PERIOD")]
    time_period: String,
    #[serde(rename = "OBS_VALUE")]
    obs_value: Option<f64>,
}

/// Rate observations in delivery order; duplicates are kept
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateSeries {
    observations: Vec<RateObservation>,
}

impl RateSeries {
    pub fn new(observations: Vec<RateObservation>) -> Self {
        Self { observations }
    }

    /// Parse CSV text with at least `TIME_PERIOD` and `OBS_VALUE` columns
    pub fn from_csv_str(csv_text: &str) -> Result<Self> {
        Self::from_reader(csv_text.as_bytes())
    }

    /// Read a staged rate file
    pub fn read_csv_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(rdr);

        let headers = reader.headers()?;
        for required in [DATE_COLUMN, VALUE_COLUMN] {
            if !headers.iter().any(|h| h == required) {
                return Err(PipelineError::DataError(format!(
                    "Rate CSV has no {} column",
                    required
                )));
            }
        }

        let mut observations = Vec::new();
        for result in reader.deserialize() {
            let row: RateRow = result?;
            let date = parse_date(&row.time_period).ok_or_else(|| {
                PipelineError::ParseError(format!("Invalid rate date: {}", row.time_period))
            })?;
            observations.push(RateObservation {
                date,
                rate: row.obs_value.filter(|v| !v.is_nan()),
            });
        }

        Ok(Self { observations })
    }

    pub fn observations(&self) -> &[RateObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Rates grouped by date, each group in delivery order
    pub fn by_date(&self) -> HashMap<NaiveDate, Vec<Option<Rate>>> {
        let mut index: HashMap<NaiveDate, Vec<Option<Rate>>> = HashMap::new();
        for obs in &self.observations {
            index.entry(obs.date).or_default().push(obs.rate);
        }
        index
    }
}

impl FromIterator<(NaiveDate, Rate)> for RateSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Rate)>>(iter: I) -> Self {
        Self {
            observations: iter
                .into_iter()
                .map(|(date, rate)| RateObservation {
                    date,
                    rate: Some(rate),
                })
                .collect(),
        }
    }
}
