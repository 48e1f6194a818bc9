use crate::{Measurement, ObservationDate, ValidationError};

/// Daily heating and cooling degree days for one station.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeDayRecord {
    pub date: ObservationDate,
    pub hdd: Option<Measurement>,
    pub cdd: Option<Measurement>,
}

/// Degree-day rows sorted strictly ascending by date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DegreeDayTable {
    records: Vec<DegreeDayRecord>,
}

impl DegreeDayTable {
    pub fn from_unsorted(mut records: Vec<DegreeDayRecord>) -> Result<Self, ValidationError> {
        records.sort_by_key(|record| record.date);

        if let Some(pair) = records.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(ValidationError::DuplicateDate {
                date: pair[0].date.to_string(),
            });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[DegreeDayRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
