//! # btc-eur-rolling
//!
//! Fetches a year of Bitcoin Price Index closes (USD) and ECB USD/EUR
//! reference rates, joins them by date, converts the price to EUR and adds
//! a 7-day rolling average. The result is written as a CSV file and an SVG
//! chart.
//!
//! ## Example
//!
//! ```rust
//! use btc_eur_rolling::prelude::*;
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
//! let prices: PriceSeries = [(day, 100.0)].into_iter().collect();
//! let rates: RateSeries = [(day, 0.9)].into_iter().collect();
//!
//! let table = generate_dataframe(&Schema::default(), &prices, &rates, 7).unwrap();
//! assert_eq!(table.rows()[0].converted_price, Some(90.0));
//! assert_eq!(table.rows()[0].rolling_average, None);
//! ```

pub mod calendar;
pub mod config;
pub mod data;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod schema;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::calendar::DateWindow;
    pub use crate::config::PipelineConfig;
    pub use crate::data::sources::ExternalDataSource;
    pub use crate::data::{generate_dataframe, OutputRow, OutputTable, RateSeries};
    pub use crate::error::{ErrorClass, PipelineError, Result};
    pub use crate::pipeline::{Pipeline, RunReport};
    pub use crate::schema::{Column, Schema};
    pub use crate::types::*;
}
