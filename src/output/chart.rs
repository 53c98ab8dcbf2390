//! Line chart of the schema's plot columns over the date index

use super::log_write_failure;
use crate::config::ChartConfig;
use crate::data::OutputTable;
use crate::error::{PipelineError, Result};
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const SERIES_COLORS: [RGBColor; 3] = [BLUE, RED, GREEN];
const EMPTY_VALUE_RANGE: (f64, f64) = (0.0, 1.0);

/// Renders the chart as SVG
#[derive(Debug, Clone)]
pub struct ChartWriter {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl ChartWriter {
    pub fn new(path: impl Into<PathBuf>, config: &ChartConfig) -> Self {
        Self {
            path: path.into(),
            width: config.width,
            height: config.height,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, table: &OutputTable) -> Result<()> {
        let svg = self.render(table)?;
        fs::write(&self.path, svg).map_err(|e| log_write_failure("chart", &self.path, e))?;
        log::info!("Wrote chart to {}", self.path.display());
        Ok(())
    }

    /// Render the chart to an SVG document
    pub fn render(&self, table: &OutputTable) -> Result<String> {
        let schema = table.schema();
        let dates = table.dates();
        let (first, last) = match (dates.first(), dates.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Err(PipelineError::ChartError("No rows to plot".to_string())),
        };
        let last = if last == first {
            last + Duration::days(1)
        } else {
            last
        };

        let series: Vec<_> = schema
            .plot
            .iter()
            .map(|&column| {
                let values = table.column(column);
                (schema.column_name(column), segments(&dates, &values))
            })
            .collect();

        // Rows without a single defined value still get axes
        let (low, high) = value_range(series.iter().flat_map(|(_, segs)| segs.iter().flatten()))
            .unwrap_or(EMPTY_VALUE_RANGE);

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(chart_error)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&schema.name, ("sans-serif", 24))
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(70)
                .build_cartesian_2d(first..last, low..high)
                .map_err(chart_error)?;

            chart
                .configure_mesh()
                .x_labels(8)
                .x_desc(schema.index.as_str())
                .draw()
                .map_err(chart_error)?;

            for (i, (name, segs)) in series.iter().enumerate() {
                let color = SERIES_COLORS[i % SERIES_COLORS.len()];
                for (j, seg) in segs.iter().enumerate() {
                    let anno = chart
                        .draw_series(LineSeries::new(seg.iter().copied(), &color))
                        .map_err(chart_error)?;
                    if j == 0 {
                        anno.label(*name).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], &color)
                        });
                    }
                }
            }

            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(chart_error)?;

            root.present().map_err(chart_error)?;
        }

        Ok(svg)
    }
}

fn chart_error<E: std::error::Error + Send + Sync>(
    err: DrawingAreaErrorKind<E>,
) -> PipelineError {
    PipelineError::ChartError(err.to_string())
}

/// Split a column into runs of consecutive defined values
fn segments(dates: &[NaiveDate], values: &[Option<f64>]) -> Vec<Vec<(NaiveDate, f64)>> {
    let mut segs = Vec::new();
    let mut current = Vec::new();

    for (&date, value) in dates.iter().zip(values) {
        match value {
            Some(v) if v.is_finite() => current.push((date, *v)),
            _ => {
                if !current.is_empty() {
                    segs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segs.push(current);
    }

    segs
}

/// Padded y-axis range covering every point
fn value_range<'a>(points: impl Iterator<Item = &'a (NaiveDate, f64)>) -> Option<(f64, f64)> {
    let (low, high) = points.fold(None, |acc: Option<(f64, f64)>, &(_, v)| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })?;

    let pad = if high > low {
        (high - low) * 0.05
    } else {
        low.abs().max(1.0) * 0.05
    };
    Some((low - pad, high + pad))
}
