use std::collections::BTreeMap;

use crate::{Measurement, ObservationDate, TimeSeriesTable};

/// One aligned date of the supply/demand balance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FundamentalsRow {
    pub prod: Option<Measurement>,
    pub demand: Option<Measurement>,
    pub lng_exports: Option<Measurement>,
}

/// Production, demand and LNG feedgas aligned on date.
///
/// Rows are the union of the input dates in ascending order. A column is
/// `None` for a date its source table does not contain.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedFundamentalsTable {
    rows: Vec<(ObservationDate, FundamentalsRow)>,
}

impl MergedFundamentalsTable {
    pub fn outer_join(
        production: &TimeSeriesTable,
        demand: &TimeSeriesTable,
        lng_exports: &TimeSeriesTable,
    ) -> Self {
        let mut rows: BTreeMap<ObservationDate, FundamentalsRow> = BTreeMap::new();

        for record in production.records() {
            rows.entry(record.date).or_default().prod = Some(record.value.clone());
        }
        for record in demand.records() {
            rows.entry(record.date).or_default().demand = Some(record.value.clone());
        }
        for record in lng_exports.records() {
            rows.entry(record.date).or_default().lng_exports = Some(record.value.clone());
        }

        Self {
            rows: rows.into_iter().collect(),
        }
    }

    pub fn rows(&self) -> &[(ObservationDate, FundamentalsRow)] {
        &self.rows
    }

    pub fn get(&self, date: ObservationDate) -> Option<&FundamentalsRow> {
        self.rows
            .binary_search_by_key(&date, |(row_date, _)| *row_date)
            .ok()
            .map(|index| &self.rows[index].1)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
