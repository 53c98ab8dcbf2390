//! Output table: price series joined with exchange rates
//!
//! `generate_dataframe` performs the whole derivation:
//! 1. inner join of prices and rates on date (price order, rate duplicates
//!    expand to one row each)
//! 2. converted price = original price × rate
//! 3. trailing rolling mean of the converted price over join order

use super::rates::RateSeries;
use super::rolling::RollingMean;
use crate::error::Result;
use crate::schema::{Column, Schema};
use crate::types::{Price, PriceSeries};
use chrono::NaiveDate;
use statrs::statistics::{Data, Distribution};
use std::path::Path;

/// One joined row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputRow {
    pub date: NaiveDate,
    pub original_price: Price,
    /// `None` when the matching rate observation was blank
    pub converted_price: Option<Price>,
    pub rolling_average: Option<Price>,
}

impl OutputRow {
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::OriginalPrice => Some(self.original_price),
            Column::ConvertedPrice => self.converted_price,
            Column::RollingAverage => self.rolling_average,
        }
    }
}

/// Summary statistics of the defined values in one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: Option<f64>,
}

/// Rows indexed by date, carrying the schema that names them
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    schema: Schema,
    rows: Vec<OutputRow>,
}

impl OutputTable {
    pub fn new(schema: Schema, rows: Vec<OutputRow>) -> Self {
        Self { schema, rows }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[OutputRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Declared column names; always exactly the schema's
    pub fn column_names(&self) -> Vec<&str> {
        self.schema.column_names()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    pub fn column(&self, column: Column) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.value(column)).collect()
    }

    /// Look up a column by its schema name
    pub fn column_by_name(&self, name: &str) -> Option<Vec<Option<f64>>> {
        Column::ALL
            .iter()
            .find(|&&c| self.schema.column_name(c) == name)
            .map(|&c| self.column(c))
    }

    pub fn summary(&self, column: Column) -> Option<ColumnSummary> {
        let values: Vec<f64> = self.rows.iter().filter_map(|r| r.value(column)).collect();
        if values.is_empty() {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let count = values.len();
        let data = Data::new(values);

        Some(ColumnSummary {
            count,
            min,
            max,
            mean: data.mean().unwrap_or(f64::NAN),
            std_dev: data.std_dev(),
        })
    }
}

/// Join prices with rates and derive the converted and rolling columns
pub fn generate_dataframe(
    schema: &Schema,
    prices: &PriceSeries,
    rates: &RateSeries,
    window: usize,
) -> Result<OutputTable> {
    let mut rolling = RollingMean::new(window)?;
    let rates_by_date = rates.by_date();

    let mut rows = Vec::new();
    for (&date, &original_price) in prices {
        let Some(matches) = rates_by_date.get(&date) else {
            continue;
        };
        for &rate in matches {
            let converted_price = rate.map(|r| original_price * r);
            rows.push(OutputRow {
                date,
                original_price,
                converted_price,
                rolling_average: rolling.update(converted_price),
            });
        }
    }

    log::debug!(
        "Joined {} prices with {} rates into {} rows",
        prices.len(),
        rates.len(),
        rows.len()
    );

    Ok(OutputTable::new(schema.clone(), rows))
}

/// Same as [`generate_dataframe`], reading rates from a staged CSV file
pub fn generate_dataframe_from_file(
    schema: &Schema,
    prices: &PriceSeries,
    rates_path: &Path,
    window: usize,
) -> Result<OutputTable> {
    let rates = RateSeries::read_csv_file(rates_path)?;
    generate_dataframe(schema, prices, &rates, window)
}
