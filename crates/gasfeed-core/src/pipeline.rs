//! Download orchestration.
//!
//! Each dataset is fetched, normalized and written before the next one
//! starts. The fundamentals step fetches all three series before joining, so
//! a failure in any of them leaves no `fundamentals_balances.csv` behind.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::http_client::HttpClient;
use crate::output::{write_csv, CsvTable};
use crate::sources::{fetch_body, EiaSeries, NoaaDegreeDays};
use crate::{DegreeDayTable, MergedFundamentalsTable, TimeSeriesTable};

/// Output datasets in their default run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Prices,
    Storage,
    Fundamentals,
    Weather,
}

impl Dataset {
    pub const ALL: [Self; 4] = [Self::Prices, Self::Storage, Self::Fundamentals, Self::Weather];

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Prices => "ng_prices.csv",
            Self::Storage => "storage_eia_weekly.csv",
            Self::Fundamentals => "fundamentals_balances.csv",
            Self::Weather => "weather_degree_days.csv",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prices => "prices",
            Self::Storage => "storage",
            Self::Fundamentals => "fundamentals",
            Self::Weather => "weather",
        }
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one completed dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub dataset: Dataset,
    pub path: PathBuf,
    pub rows: usize,
    pub latency_ms: u64,
}

/// Runs the fetch → normalize → write steps against one HTTP transport.
#[derive(Clone)]
pub struct Downloader {
    http_client: Arc<dyn HttpClient>,
    config: PipelineConfig,
}

impl Downloader {
    pub fn new(http_client: Arc<dyn HttpClient>, config: PipelineConfig) -> Self {
        if config.eia_api_key.is_placeholder() {
            warn!("EIA API key is the placeholder value; EIA requests will be rejected");
        }
        Self {
            http_client,
            config,
        }
    }

    pub async fn download(&self, dataset: Dataset) -> Result<DownloadReport, PipelineError> {
        match dataset {
            Dataset::Prices => self.download_henry_hub_spot().await,
            Dataset::Storage => self.download_storage().await,
            Dataset::Fundamentals => self.download_fundamentals().await,
            Dataset::Weather => self.download_weather().await,
        }
    }

    pub async fn download_henry_hub_spot(&self) -> Result<DownloadReport, PipelineError> {
        let started = Instant::now();
        let table = self.fetch_series(&EiaSeries::HENRY_HUB_SPOT).await?;
        self.materialize(Dataset::Prices, &table, table.len(), started)
    }

    pub async fn download_storage(&self) -> Result<DownloadReport, PipelineError> {
        let started = Instant::now();
        let table = self.fetch_series(&EiaSeries::WEEKLY_STORAGE).await?;
        self.materialize(Dataset::Storage, &table, table.len(), started)
    }

    pub async fn download_fundamentals(&self) -> Result<DownloadReport, PipelineError> {
        let started = Instant::now();
        let table = self.fetch_fundamentals().await?;
        self.materialize(Dataset::Fundamentals, &table, table.len(), started)
    }

    pub async fn download_weather(&self) -> Result<DownloadReport, PipelineError> {
        let started = Instant::now();
        let table = self.fetch_degree_days(&NoaaDegreeDays::HOUSTON).await?;
        self.materialize(Dataset::Weather, &table, table.len(), started)
    }

    /// Fetches production, demand and LNG feedgas in order and outer-joins them.
    pub async fn fetch_fundamentals(&self) -> Result<MergedFundamentalsTable, PipelineError> {
        let production = self.fetch_series(&EiaSeries::DRY_PRODUCTION).await?;
        let demand = self.fetch_series(&EiaSeries::CONSUMPTION).await?;
        let lng_exports = self.fetch_series(&EiaSeries::LNG_FEEDGAS).await?;

        let merged = MergedFundamentalsTable::outer_join(&production, &demand, &lng_exports);
        info!(
            production = production.len(),
            demand = demand.len(),
            lng_exports = lng_exports.len(),
            merged = merged.len(),
            "fundamentals aligned"
        );
        Ok(merged)
    }

    pub async fn fetch_series(&self, series: &EiaSeries) -> Result<TimeSeriesTable, PipelineError> {
        let request = series.request(&self.config);
        let body = fetch_body(self.http_client.as_ref(), series.name, request).await?;
        Ok(series.parse(&body)?)
    }

    pub async fn fetch_degree_days(
        &self,
        query: &NoaaDegreeDays,
    ) -> Result<DegreeDayTable, PipelineError> {
        let request = query.request(&self.config);
        let body = fetch_body(self.http_client.as_ref(), query.name, request).await?;
        Ok(query.parse(&body)?)
    }

    fn materialize<T>(
        &self,
        dataset: Dataset,
        table: &T,
        rows: usize,
        started: Instant,
    ) -> Result<DownloadReport, PipelineError>
    where
        T: CsvTable,
    {
        let path = write_csv(&self.config.output_dir, dataset.file_name(), table)?;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            dataset = dataset.as_str(),
            rows,
            latency_ms,
            path = %path.display(),
            "dataset written"
        );

        Ok(DownloadReport {
            dataset,
            path,
            rows,
            latency_ms,
        })
    }
}
