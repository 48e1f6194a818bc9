//! CLI argument definitions for gasfeed.
//!
//! Running `gasfeed` with no arguments downloads every dataset in order:
//!
//! | Dataset | File |
//! |---------|------|
//! | `prices` | `ng_prices.csv` |
//! | `storage` | `storage_eia_weekly.csv` |
//! | `fundamentals` | `fundamentals_balances.csv` |
//! | `weather` | `weather_degree_days.csv` |
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--output-dir` | `data/raw` | Directory receiving the CSV files |
//! | `--api-key` | `$GASFEED_EIA_API_KEY` | EIA API key |
//! | `--timeout-ms` | none | Per-request timeout |
//! | `--only` | all | Subset of datasets to download |
//!
//! # Examples
//!
//! ```bash
//! gasfeed
//! gasfeed --only prices storage
//! RUST_LOG=gasfeed_core=debug gasfeed --output-dir /tmp/gas
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use gasfeed_core::config::{DEFAULT_EIA_BASE_URL, DEFAULT_NOAA_BASE_URL, DEFAULT_OUTPUT_DIR};
use gasfeed_core::{ApiKey, Dataset, PipelineConfig};

use crate::error::CliError;

/// Download natural-gas prices, storage, balances and degree days as CSV.
#[derive(Debug, Parser)]
#[command(
    name = "gasfeed",
    author,
    version,
    about = "Download natural-gas fundamentals from EIA and NOAA into CSV files"
)]
pub struct Cli {
    /// Directory that receives the CSV files. Created if missing.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// EIA API key. Falls back to GASFEED_EIA_API_KEY, then a placeholder.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Per-request timeout in milliseconds. Unset waits indefinitely.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Download only these datasets. They still run in the default order.
    #[arg(long, value_enum, num_args = 1..)]
    pub only: Vec<DatasetArg>,

    /// EIA v2 API root.
    #[arg(long, default_value = DEFAULT_EIA_BASE_URL, hide = true)]
    pub eia_base_url: String,

    /// NOAA NCEI access-service root.
    #[arg(long, default_value = DEFAULT_NOAA_BASE_URL, hide = true)]
    pub noaa_base_url: String,
}

/// Dataset selector for `--only`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetArg {
    /// Henry Hub daily spot price.
    Prices,
    /// EIA weekly working gas in storage.
    Storage,
    /// Production, demand and LNG feedgas, aligned by date.
    Fundamentals,
    /// NOAA heating and cooling degree days.
    Weather,
}

impl From<DatasetArg> for Dataset {
    fn from(value: DatasetArg) -> Self {
        match value {
            DatasetArg::Prices => Self::Prices,
            DatasetArg::Storage => Self::Storage,
            DatasetArg::Fundamentals => Self::Fundamentals,
            DatasetArg::Weather => Self::Weather,
        }
    }
}

impl Cli {
    pub fn datasets(&self) -> Vec<Dataset> {
        if self.only.is_empty() {
            return Dataset::ALL.to_vec();
        }

        let selected = self
            .only
            .iter()
            .copied()
            .map(Dataset::from)
            .collect::<Vec<_>>();
        Dataset::ALL
            .into_iter()
            .filter(|dataset| selected.contains(dataset))
            .collect()
    }

    /// Final status line; only claims every dataset when none were filtered out.
    pub fn completion_message(&self) -> String {
        let ran = self.datasets().len();
        if ran == Dataset::ALL.len() {
            String::from("All datasets downloaded.")
        } else {
            format!("Downloaded {ran} of {} datasets.", Dataset::ALL.len())
        }
    }

    pub fn pipeline_config(&self) -> Result<PipelineConfig, CliError> {
        let timeout = match self.timeout_ms {
            Some(0) => {
                return Err(CliError::InvalidArgument(String::from(
                    "--timeout-ms must be greater than zero",
                )))
            }
            Some(ms) => Some(Duration::from_millis(ms)),
            None => None,
        };

        let api_key = match self.api_key.as_deref().map(str::trim) {
            Some("") => {
                return Err(CliError::InvalidArgument(String::from(
                    "--api-key must not be empty",
                )))
            }
            Some(key) => ApiKey::new(key),
            None => ApiKey::from_env(),
        };

        Ok(PipelineConfig::default()
            .with_api_key(api_key)
            .with_output_dir(self.output_dir.clone())
            .with_eia_base_url(self.eia_base_url.as_str())
            .with_noaa_base_url(self.noaa_base_url.as_str())
            .with_timeout(timeout))
    }
}
