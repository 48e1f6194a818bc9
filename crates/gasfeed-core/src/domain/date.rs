use std::fmt::{Display, Formatter};
use std::num::NonZeroU8;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::parsing::Parsed;
use time::{Date, Month, PrimitiveDateTime, Time};

use crate::ValidationError;

/// Every period shape the two APIs emit, from `YYYY` to `YYYY-MM-DDTHH:MM:SS`.
const PERIOD_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year][optional [-[month][optional [-[day][optional [T[hour][optional [:[minute][optional [:[second]]]]]]]]]]]"
);
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Calendar date with an optional hour component.
///
/// Accepts the period shapes emitted by EIA and NOAA: `YYYY`, `YYYY-MM`,
/// `YYYY-MM-DD`, optionally followed by `T` and `HH`, `HH:MM` or `HH:MM:SS`.
/// Year and month periods resolve to their first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationDate(PrimitiveDateTime);

impl ObservationDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDate {
            value: input.to_owned(),
        };

        let mut parsed = Parsed::new();
        let rest = parsed
            .parse_items(input.trim().as_bytes(), PERIOD_FORMAT)
            .map_err(|_| invalid())?;
        if !rest.is_empty() {
            return Err(invalid());
        }

        let year = parsed.year().ok_or_else(invalid)?;
        let month = parsed.month().unwrap_or(Month::January);
        let day = parsed.day().map_or(1, NonZeroU8::get);
        let date = Date::from_calendar_date(year, month, day).map_err(|_| invalid())?;

        let time = Time::from_hms(
            parsed.hour_24().unwrap_or(0),
            parsed.minute().unwrap_or(0),
            parsed.second().unwrap_or(0),
        )
        .map_err(|_| invalid())?;

        Ok(Self(PrimitiveDateTime::new(date, time)))
    }

    pub const fn from_date(date: Date) -> Self {
        Self(PrimitiveDateTime::new(date, Time::MIDNIGHT))
    }

    pub const fn from_datetime(value: PrimitiveDateTime) -> Self {
        Self(value)
    }

    pub fn has_time(self) -> bool {
        self.0.time() != Time::MIDNIGHT
    }

    /// `YYYY-MM-DD`, dropping any time of day.
    pub fn format_date(self) -> String {
        self.0
            .date()
            .format(DATE_FORMAT)
            .unwrap_or_else(|_| self.0.date().to_string())
    }

    /// `YYYY-MM-DD HH:MM:SS`.
    pub fn format_datetime(self) -> String {
        self.0
            .format(DATETIME_FORMAT)
            .unwrap_or_else(|_| self.0.to_string())
    }
}

impl Display for ObservationDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.has_time() {
            f.write_str(&self.format_datetime())
        } else {
            f.write_str(&self.format_date())
        }
    }
}
