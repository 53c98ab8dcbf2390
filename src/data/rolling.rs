//! Trailing rolling mean over row order

use crate::error::{PipelineError, Result};
use std::collections::VecDeque;

/// Simple moving average over the last `window` rows.
///
/// Missing values occupy a slot in the window; the mean is only defined
/// while every slot holds a value.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    values: VecDeque<Option<f64>>,
}

impl RollingMean {
    /// Create new rolling mean with given window size
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(PipelineError::ConfigError(
                "Window size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            window,
            values: VecDeque::with_capacity(window),
        })
    }

    /// Push the next row and return the mean ending at it
    pub fn update(&mut self, value: Option<f64>) -> Option<f64> {
        self.values.push_back(value);

        if self.values.len() > self.window {
            self.values.pop_front();
        }

        self.current()
    }

    /// Compute the rolling mean for a column
    pub fn compute(window: usize, values: &[Option<f64>]) -> Result<Vec<Option<f64>>> {
        let mut mean = Self::new(window)?;
        Ok(values.iter().map(|&v| mean.update(v)).collect())
    }

    /// Get current value (if window is full and complete)
    pub fn current(&self) -> Option<f64> {
        if self.values.len() < self.window {
            return None;
        }
        let sum = self
            .values
            .iter()
            .try_fold(0.0, |acc, v| v.map(|x| acc + x))?;
        Some(sum / self.window as f64)
    }

    pub fn window(&self) -> usize {
        self.window
    }
}
