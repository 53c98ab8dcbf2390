//! Output table schema
//!
//! The schema names the index and value columns of the output table, the
//! table itself (used as the base name of the CSV and chart files), and the
//! columns worth plotting. It is a naming reference passed explicitly to the
//! builder and writers; rows are never validated against it.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Value columns of the output table, in CSV order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// Price in the asset's native currency (USD)
    OriginalPrice,
    /// Price converted to the target currency (EUR)
    ConvertedPrice,
    /// Trailing mean of the converted price
    RollingAverage,
}

impl Column {
    pub const ALL: [Column; 3] = [
        Column::OriginalPrice,
        Column::ConvertedPrice,
        Column::RollingAverage,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Table name, base name of the output files
    pub name: String,
    /// Name of the date index column
    pub index: String,
    pub original_price: String,
    pub converted_price: String,
    pub rolling_average: String,
    /// Columns drawn on the chart
    pub plot: Vec<Column>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            name: "btc_7_day_rolling_average_eur".to_string(),
            index: "reference_date".to_string(),
            original_price: "original_usd_price".to_string(),
            converted_price: "converted_eur_price".to_string(),
            rolling_average: "7_day_rolling_average".to_string(),
            plot: vec![Column::ConvertedPrice, Column::RollingAverage],
        }
    }
}

impl Schema {
    pub fn column_name(&self, column: Column) -> &str {
        match column {
            Column::OriginalPrice => &self.original_price,
            Column::ConvertedPrice => &self.converted_price,
            Column::RollingAverage => &self.rolling_average,
        }
    }

    /// Declared value column names, in CSV order
    pub fn column_names(&self) -> Vec<&str> {
        Column::ALL.iter().map(|&c| self.column_name(c)).collect()
    }

    /// CSV header: index followed by the value columns
    pub fn header(&self) -> Vec<&str> {
        let mut header = vec![self.index.as_str()];
        header.extend(self.column_names());
        header
    }

    pub fn plot_column_names(&self) -> Vec<&str> {
        self.plot.iter().map(|&c| self.column_name(c)).collect()
    }

    pub fn csv_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.csv", self.name))
    }

    pub fn chart_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.svg", self.name))
    }

    /// Check that names are non-empty and distinct and that something is plotted
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PipelineError::ConfigError(
                "Schema name must not be empty".to_string(),
            ));
        }

        let header = self.header();
        for (i, name) in header.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(PipelineError::ConfigError(
                    "Schema column names must not be empty".to_string(),
                ));
            }
            if header[..i].contains(name) {
                return Err(PipelineError::ConfigError(format!(
                    "Duplicate schema column: {}",
                    name
                )));
            }
        }

        if self.plot.is_empty() {
            return Err(PipelineError::ConfigError(
                "Schema must declare at least one plot column".to_string(),
            ));
        }

        Ok(())
    }
}
