//! # gasfeed core
//!
//! Fetches natural-gas market and weather series, normalizes them into sorted
//! tables and writes them as CSV.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Explicit run configuration and API key handling |
//! | [`domain`] | Dates, measurements, series and merged tables |
//! | [`error`] | Fetch, parse and output error types |
//! | [`http_client`] | HTTP transport abstraction (reqwest / static fixtures) |
//! | [`output`] | CSV materialization |
//! | [`pipeline`] | Per-dataset download steps |
//! | [`sources`] | EIA and NOAA request builders and response schemas |
//!
//! ## Datasets
//!
//! | File | Columns | Source |
//! |------|---------|--------|
//! | `ng_prices.csv` | `date,spot` | EIA Henry Hub daily spot |
//! | `storage_eia_weekly.csv` | `date,storage` | EIA weekly working gas |
//! | `fundamentals_balances.csv` | `date,prod,demand,lng_exports` | three EIA weekly series, outer-joined |
//! | `weather_degree_days.csv` | `date,hdd,cdd` | NOAA NCEI daily summaries |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gasfeed_core::{ApiKey, Dataset, Downloader, PipelineConfig, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig::default().with_api_key(ApiKey::from_env());
//!     let downloader = Downloader::new(Arc::new(ReqwestHttpClient::new()), config);
//!
//!     for dataset in Dataset::ALL {
//!         let report = downloader.download(dataset).await?;
//!         println!("Saved {} ({} rows)", dataset.file_name(), report.rows);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every step returns [`PipelineError`]. Nothing is retried: a failed step
//! leaves files from earlier steps in place and writes nothing for itself.

pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod output;
pub mod pipeline;
pub mod sources;

pub use config::{ApiKey, PipelineConfig};
pub use domain::{
    DegreeDayRecord, DegreeDayTable, FundamentalsRow, Measurement, MergedFundamentalsTable,
    ObservationDate, TimeSeriesRecord, TimeSeriesTable,
};
pub use error::{FetchError, OutputError, ParseError, PipelineError, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient,
};
pub use output::{write_csv, CsvRow, CsvTable};
pub use pipeline::{Dataset, DownloadReport, Downloader};
pub use sources::{EiaSeries, Frequency, NoaaDegreeDays};
