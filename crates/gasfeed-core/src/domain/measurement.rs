use std::fmt::{Display, Formatter};

use serde_json::value::RawValue;

use crate::ValidationError;

/// Finite numeric observation that keeps the text it was read from.
///
/// Output files carry `text` verbatim, so `1.80` in a response is written as
/// `1.80` rather than a re-rendered float.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    value: f64,
    text: String,
}

impl Measurement {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let text = input.trim();
        let value = text
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidNumber {
                value: input.to_owned(),
            })?;

        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                value: input.to_owned(),
            });
        }

        Ok(Self {
            value,
            text: text.to_owned(),
        })
    }

    /// Reads a JSON number or numeric string. `null` and blank strings are
    /// treated as no observation.
    pub fn from_json(raw: &RawValue) -> Result<Option<Self>, ValidationError> {
        let literal = raw.get().trim();

        if literal == "null" {
            return Ok(None);
        }

        if literal.starts_with('"') {
            let inner: String =
                serde_json::from_str(literal).map_err(|_| ValidationError::InvalidNumber {
                    value: literal.to_owned(),
                })?;
            if inner.trim().is_empty() {
                return Ok(None);
            }
            return Self::parse(&inner).map(Some);
        }

        if literal.starts_with(['{', '[']) || literal == "true" || literal == "false" {
            return Err(ValidationError::InvalidNumber {
                value: literal.to_owned(),
            });
        }

        Self::parse(literal).map(Some)
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Display for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
