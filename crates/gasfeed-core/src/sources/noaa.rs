use serde::Deserialize;
use serde_json::value::RawValue;

use crate::config::PipelineConfig;
use crate::error::ParseError;
use crate::http_client::HttpRequest;
use crate::{DegreeDayRecord, DegreeDayTable, Measurement, ObservationDate};

/// NCEI access-service query for daily HDD/CDD at one station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoaaDegreeDays {
    pub name: &'static str,
    pub dataset: &'static str,
    pub station: &'static str,
}

impl NoaaDegreeDays {
    /// Houston Intercontinental (USW00012960).
    pub const HOUSTON: Self = Self {
        name: "noaa_degree_days",
        dataset: "daily-summaries",
        station: "USW00012960",
    };

    pub fn request(&self, config: &PipelineConfig) -> HttpRequest {
        let url = format!(
            "{}?dataset={}&stations={}&dataTypes=HDD,CDD&format=json",
            config.noaa_base_url,
            urlencoding::encode(self.dataset),
            urlencoding::encode(self.station)
        );

        HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout(config.timeout)
    }

    /// Decodes the flat record array. `DATE` is required; a missing or null
    /// `HDD`/`CDD` leaves that cell empty.
    pub fn parse(&self, body: &str) -> Result<DegreeDayTable, ParseError> {
        let summaries: Vec<NoaaDailySummary> =
            serde_json::from_str(body).map_err(|error| ParseError::from_json(self.name, error))?;

        let records = summaries
            .into_iter()
            .enumerate()
            .map(|(index, summary)| self.project(index, summary))
            .collect::<Result<Vec<_>, _>>()?;

        DegreeDayTable::from_unsorted(records).map_err(|reason| ParseError::InvalidTable {
            series: self.name.to_owned(),
            reason,
        })
    }

    fn project(
        &self,
        index: usize,
        summary: NoaaDailySummary,
    ) -> Result<DegreeDayRecord, ParseError> {
        let invalid = |reason| ParseError::InvalidRecord {
            series: self.name.to_owned(),
            index,
            reason,
        };
        let optional = |raw: Option<Box<RawValue>>| match raw {
            Some(raw) => Measurement::from_json(&raw),
            None => Ok(None),
        };

        Ok(DegreeDayRecord {
            date: ObservationDate::parse(&summary.date).map_err(invalid)?,
            hdd: optional(summary.hdd).map_err(invalid)?,
            cdd: optional(summary.cdd).map_err(invalid)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct NoaaDailySummary {
    #[serde(rename = "DATE")]
    date: String,
    #[serde(rename = "HDD", default)]
    hdd: Option<Box<RawValue>>,
    #[serde(rename = "CDD", default)]
    cdd: Option<Box<RawValue>>,
}
