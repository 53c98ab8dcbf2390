//! CSV output of the joined table

use super::log_write_failure;
use crate::data::OutputTable;
use crate::error::Result;
use crate::schema::Column;
use crate::types::DATE_FORMAT;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes the table's schema-declared columns, indexed by date.
///
/// Missing values become empty fields. Floats use the shortest
/// representation that round-trips and always carry a decimal point.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create or truncate the file and write the table
    pub fn write(&self, table: &OutputTable) -> Result<()> {
        let file = File::create(&self.path)
            .map_err(|e| log_write_failure("table CSV", &self.path, e))?;

        write_table(table, file).map_err(|e| log_write_failure("table CSV", &self.path, e))?;
        log::info!("Wrote {} rows to {}", table.len(), self.path.display());
        Ok(())
    }
}

/// Serialize `table` as CSV into `out`
pub fn write_table<W: Write>(table: &OutputTable, out: W) -> std::io::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(table.schema().header())?;

    for row in table.rows() {
        let mut record = Vec::with_capacity(Column::ALL.len() + 1);
        record.push(row.date.format(DATE_FORMAT).to_string());
        for column in Column::ALL {
            record.push(format_value(row.value(column)));
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:?}", v),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::OutputRow;
    use crate::schema::Schema;
    use chrono::NaiveDate;

    fn table() -> OutputTable {
        OutputTable::new(
            Schema::default(),
            vec![
                OutputRow {
                    date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                    original_price: 100.0,
                    converted_price: Some(90.0),
                    rolling_average: None,
                },
                OutputRow {
                    date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
                    original_price: 16625.08,
                    converted_price: None,
                    rolling_average: Some(1234.5),
                },
            ],
        )
    }

    #[test]
    fn test_write_table() {
        let mut buf = Vec::new();
        write_table(&table(), &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "reference_date,original_usd_price,converted_eur_price,7_day_rolling_average\n\
             2023-01-01,100.0,90.0,\n\
             2023-01-02,16625.08,,1234.5\n"
        );
    }

    #[test]
    fn test_write_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale content that is longer than nothing\n".repeat(100)).unwrap();

        let writer = CsvWriter::new(&path);
        writer.write(&table()).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        writer.write(&table()).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        assert!(!first.contains("stale"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(90.0)), "90.0");
        assert_eq!(format_value(Some(0.1 + 0.2)), "0.30000000000000004");
        assert_eq!(format_value(None), "");
        assert_eq!(format_value(Some(f64::NAN)), "");
    }
}
