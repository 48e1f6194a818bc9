//! CSV materialization.
//!
//! Every table is written as `date,<columns...>` with a header row. Dates use
//! `YYYY-MM-DD` unless some row in the file carries a time of day, in which
//! case the whole column switches to `YYYY-MM-DD HH:MM:SS`. Absent values are
//! empty cells. Existing files are overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::OutputError;
use crate::{
    DegreeDayTable, Measurement, MergedFundamentalsTable, ObservationDate, TimeSeriesTable,
};

/// One output line before date formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow<'a> {
    pub date: ObservationDate,
    pub cells: Vec<Option<&'a Measurement>>,
}

/// Table shape understood by [`write_csv`].
pub trait CsvTable {
    /// Column names after `date`.
    fn value_columns(&self) -> Vec<&str>;

    fn csv_rows(&self) -> Vec<CsvRow<'_>>;
}

impl CsvTable for TimeSeriesTable {
    fn value_columns(&self) -> Vec<&str> {
        vec![self.column()]
    }

    fn csv_rows(&self) -> Vec<CsvRow<'_>> {
        self.records()
            .iter()
            .map(|record| CsvRow {
                date: record.date,
                cells: vec![Some(&record.value)],
            })
            .collect()
    }
}

impl CsvTable for MergedFundamentalsTable {
    fn value_columns(&self) -> Vec<&str> {
        vec!["prod", "demand", "lng_exports"]
    }

    fn csv_rows(&self) -> Vec<CsvRow<'_>> {
        self.rows()
            .iter()
            .map(|(date, row)| CsvRow {
                date: *date,
                cells: vec![
                    row.prod.as_ref(),
                    row.demand.as_ref(),
                    row.lng_exports.as_ref(),
                ],
            })
            .collect()
    }
}

impl CsvTable for DegreeDayTable {
    fn value_columns(&self) -> Vec<&str> {
        vec!["hdd", "cdd"]
    }

    fn csv_rows(&self) -> Vec<CsvRow<'_>> {
        self.records()
            .iter()
            .map(|record| CsvRow {
                date: record.date,
                cells: vec![record.hdd.as_ref(), record.cdd.as_ref()],
            })
            .collect()
    }
}

/// Writes `table` to `output_dir/file_name`, creating `output_dir` first.
pub fn write_csv<T>(output_dir: &Path, file_name: &str, table: &T) -> Result<PathBuf, OutputError>
where
    T: CsvTable + ?Sized,
{
    fs::create_dir_all(output_dir).map_err(|source| OutputError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(file_name);
    let write_error = |source| OutputError::Write {
        path: path.clone(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(&path)
        .map_err(write_error)?;

    let mut header = vec!["date"];
    header.extend(table.value_columns());
    writer.write_record(&header).map_err(write_error)?;

    let rows = table.csv_rows();
    let with_time = rows.iter().any(|row| row.date.has_time());

    for row in &rows {
        let date = if with_time {
            row.date.format_datetime()
        } else {
            row.date.format_date()
        };

        let mut record = Vec::with_capacity(row.cells.len() + 1);
        record.push(date.as_str());
        record.extend(
            row.cells
                .iter()
                .map(|cell| cell.map(Measurement::as_str).unwrap_or_default()),
        );
        writer.write_record(&record).map_err(write_error)?;
    }

    writer
        .flush()
        .map_err(|error| write_error(csv::Error::from(error)))?;

    Ok(path)
}
