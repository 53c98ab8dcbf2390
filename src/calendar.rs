//! Date window shared by both data sources

use crate::error::{PipelineError, Result};
use crate::types::DATE_FORMAT;
use chrono::{Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive `[start, end]` range of calendar dates requested from the APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Create a window, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(PipelineError::ConfigError(format!(
                "Window start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Window of `months` calendar months ending at `end`.
    ///
    /// Month arithmetic clamps to the last day of the month, so a window
    /// ending 2024-02-29 with 12 months starts 2023-02-28.
    pub fn trailing_months(end: NaiveDate, months: u32) -> Result<Self> {
        let start = end.checked_sub_months(Months::new(months)).ok_or_else(|| {
            PipelineError::ConfigError(format!(
                "Cannot go back {} months from {}",
                months, end
            ))
        })?;
        Self::new(start, end)
    }

    /// One year ending at `end`
    pub fn trailing_year(end: NaiveDate) -> Result<Self> {
        Self::trailing_months(end, 12)
    }

    /// Window of `months` ending today (local time)
    pub fn ending_today(months: u32) -> Result<Self> {
        Self::trailing_months(Local::now().date_naive(), months)
    }

    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    /// Check if a date falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start_param(), self.end_param())
    }
}
