//! # Domain Models
//!
//! Transient tables built from one run's API responses.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ObservationDate`] | Calendar date with optional hour |
//! | [`Measurement`] | Finite value that keeps its source text |
//! | [`TimeSeriesTable`] | Sorted, unique-date `(date, value)` series |
//! | [`MergedFundamentalsTable`] | Outer join of production, demand and LNG |
//! | [`DegreeDayTable`] | Daily HDD/CDD rows for a weather station |
//!
//! Constructors sort their input and reject repeated dates, so every table
//! handed to the output layer is already strictly ascending.

mod date;
mod fundamentals;
mod measurement;
mod series;
mod weather;

pub use date::ObservationDate;
pub use fundamentals::{FundamentalsRow, MergedFundamentalsTable};
pub use measurement::Measurement;
pub use series::{TimeSeriesRecord, TimeSeriesTable};
pub use weather::{DegreeDayRecord, DegreeDayTable};
