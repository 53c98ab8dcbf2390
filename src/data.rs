//! Input series and the derived output table

pub mod frame;
pub mod rates;
pub mod rolling;
pub mod sources;

pub use frame::{generate_dataframe, generate_dataframe_from_file, OutputRow, OutputTable};
pub use rates::{RateObservation, RateSeries};
pub use rolling::RollingMean;
