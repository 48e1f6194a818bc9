use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use tracing::warn;

use crate::config::PipelineConfig;
use crate::error::ParseError;
use crate::http_client::HttpRequest;
use crate::{Measurement, ObservationDate, TimeSeriesRecord, TimeSeriesTable};

/// EIA v2 sampling frequency query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
}

impl Frequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

/// One EIA v2 route narrowed to a single value column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EiaSeries {
    pub name: &'static str,
    pub route: &'static str,
    pub frequency: Frequency,
    /// `facets[series][]` filter narrowing the route to one series.
    pub series_facet: &'static str,
    /// Output column the `value` field is renamed to.
    pub column: &'static str,
}

impl EiaSeries {
    pub const HENRY_HUB_SPOT: Self = Self {
        name: "henry_hub_spot",
        route: "natural-gas/pri/fut",
        frequency: Frequency::Daily,
        series_facet: "RNGWHHD",
        column: "spot",
    };

    pub const WEEKLY_STORAGE: Self = Self {
        name: "weekly_storage",
        route: "natural-gas/stor/wkly",
        frequency: Frequency::Weekly,
        series_facet: "NW2_EPG0_SWO_R48_BCF",
        column: "storage",
    };

    pub const DRY_PRODUCTION: Self = Self {
        name: "dry_production",
        route: "natural-gas/ngs/dry",
        frequency: Frequency::Weekly,
        series_facet: "N9070US2",
        column: "prod",
    };

    pub const CONSUMPTION: Self = Self {
        name: "consumption",
        route: "natural-gas/ngs/cons",
        frequency: Frequency::Weekly,
        series_facet: "N9140US2",
        column: "demand",
    };

    pub const LNG_FEEDGAS: Self = Self {
        name: "lng_feedgas",
        route: "natural-gas/ngs/lng",
        frequency: Frequency::Weekly,
        series_facet: "N9133US2",
        column: "lng_exports",
    };

    pub fn request(&self, config: &PipelineConfig) -> HttpRequest {
        let api_key = urlencoding::encode(config.eia_api_key.expose()).into_owned();
        let url = format!(
            "{}/{}/data/?api_key={}&frequency={}&data[0]=value&facets[series][]={}",
            config.eia_base_url,
            self.route,
            api_key,
            self.frequency.as_str(),
            urlencoding::encode(self.series_facet)
        );

        HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout(config.timeout)
            .with_secret(api_key)
    }

    /// Decodes an EIA envelope into a sorted table named after [`Self::column`].
    pub fn parse(&self, body: &str) -> Result<TimeSeriesTable, ParseError> {
        let envelope: EiaEnvelope =
            serde_json::from_str(body).map_err(|error| ParseError::from_json(self.name, error))?;

        for notice in &envelope.response.warnings {
            warn!(
                series = self.name,
                warning = notice.warning.as_deref().unwrap_or_default(),
                description = notice.description.as_deref().unwrap_or_default(),
                "EIA returned a warning"
            );
        }

        let records = envelope
            .response
            .data
            .into_iter()
            .enumerate()
            .map(|(index, record)| self.project(index, record))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .collect();

        TimeSeriesTable::from_unsorted(self.column, records).map_err(|reason| {
            ParseError::InvalidTable {
                series: self.name.to_owned(),
                reason,
            }
        })
    }

    /// A present but null (or blank) value drops the period; an absent
    /// `value` field is a schema error.
    fn project(
        &self,
        index: usize,
        record: EiaRecord,
    ) -> Result<Option<TimeSeriesRecord>, ParseError> {
        let invalid = |reason| ParseError::InvalidRecord {
            series: self.name.to_owned(),
            index,
            reason,
        };

        let date = ObservationDate::parse(&record.period).map_err(invalid)?;
        let raw = record.value.ok_or_else(|| ParseError::MissingField {
            series: self.name.to_owned(),
            index,
            field: "value",
        })?;

        match Measurement::from_json(&raw).map_err(invalid)? {
            Some(value) => Ok(Some(TimeSeriesRecord::new(date, value))),
            None => {
                warn!(
                    series = self.name,
                    period = %record.period,
                    "EIA period has no value; skipped"
                );
                Ok(None)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct EiaEnvelope {
    response: EiaResponse,
}

#[derive(Debug, Deserialize)]
struct EiaResponse {
    data: Vec<EiaRecord>,
    #[serde(default)]
    warnings: Vec<EiaWarning>,
}

#[derive(Debug, Deserialize)]
struct EiaWarning {
    #[serde(default)]
    warning: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EiaRecord {
    period: String,
    #[serde(default, deserialize_with = "present_raw")]
    value: Option<Box<RawValue>>,
}

/// Keeps `null` as `Some(raw)` so an absent field stays distinguishable.
fn present_raw<'de, D>(deserializer: D) -> Result<Option<Box<RawValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    Box::<RawValue>::deserialize(deserializer).map(Some)
}
