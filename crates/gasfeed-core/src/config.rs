use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable consulted for the EIA key when none is given explicitly.
pub const EIA_API_KEY_ENV: &str = "GASFEED_EIA_API_KEY";

/// Key sent when nothing else is configured; EIA rejects it.
pub const EIA_API_KEY_PLACEHOLDER: &str = "YOUR_EIA_API_KEY";

pub const DEFAULT_EIA_BASE_URL: &str = "https://api.eia.gov/v2";
pub const DEFAULT_NOAA_BASE_URL: &str = "https://www.ncei.noaa.gov/access/services/data/v1";
pub const DEFAULT_OUTPUT_DIR: &str = "data/raw";

/// EIA API key. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Reads [`EIA_API_KEY_ENV`], falling back to the placeholder.
    pub fn from_env() -> Self {
        std::env::var(EIA_API_KEY_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(Self)
            .unwrap_or_else(Self::placeholder)
    }

    pub fn placeholder() -> Self {
        Self(String::from(EIA_API_KEY_PLACEHOLDER))
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == EIA_API_KEY_PLACEHOLDER
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Settings built once at startup and handed to the [`crate::Downloader`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub eia_api_key: ApiKey,
    pub eia_base_url: String,
    pub noaa_base_url: String,
    pub output_dir: PathBuf,
    /// `None` leaves the HTTP client's default (no timeout).
    pub timeout: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            eia_api_key: ApiKey::placeholder(),
            eia_base_url: String::from(DEFAULT_EIA_BASE_URL),
            noaa_base_url: String::from(DEFAULT_NOAA_BASE_URL),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout: None,
        }
    }
}

impl PipelineConfig {
    pub fn with_api_key(mut self, api_key: ApiKey) -> Self {
        self.eia_api_key = api_key;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_eia_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.eia_base_url = trim_trailing_slash(base_url.into());
        self
    }

    pub fn with_noaa_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.noaa_base_url = trim_trailing_slash(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
