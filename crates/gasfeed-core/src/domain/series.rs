use crate::{Measurement, ObservationDate, ValidationError};

/// One `(date, value)` observation of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesRecord {
    pub date: ObservationDate,
    pub value: Measurement,
}

impl TimeSeriesRecord {
    pub fn new(date: ObservationDate, value: Measurement) -> Self {
        Self { date, value }
    }
}

/// Named value column over records sorted strictly ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    column: String,
    records: Vec<TimeSeriesRecord>,
}

impl TimeSeriesTable {
    /// Sorts `records` by date and rejects repeated dates.
    pub fn from_unsorted(
        column: impl Into<String>,
        mut records: Vec<TimeSeriesRecord>,
    ) -> Result<Self, ValidationError> {
        records.sort_by_key(|record| record.date);

        if let Some(pair) = records.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(ValidationError::DuplicateDate {
                date: pair[0].date.to_string(),
            });
        }

        Ok(Self {
            column: column.into(),
            records,
        })
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn records(&self) -> &[TimeSeriesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, date: ObservationDate) -> Option<&Measurement> {
        self.records
            .binary_search_by_key(&date, |record| record.date)
            .ok()
            .map(|index| &self.records[index].value)
    }
}
