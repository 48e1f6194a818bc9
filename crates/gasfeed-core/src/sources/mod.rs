//! Upstream endpoints and their response schemas.
//!
//! | Source | Envelope | Auth |
//! |--------|----------|------|
//! | [`eia`] | `{"response": {"data": [...]}}` | `api_key` query parameter |
//! | [`noaa`] | flat JSON array | none |
//!
//! Each source builds its own [`HttpRequest`] and decodes its own body; the
//! shared [`fetch_body`] only enforces the success status.

pub mod eia;
pub mod noaa;

pub use eia::{EiaSeries, Frequency};
pub use noaa::NoaaDegreeDays;

use tracing::debug;

use crate::error::FetchError;
use crate::http_client::{HttpClient, HttpRequest};

/// Executes one GET and returns the body of a 2xx response.
pub async fn fetch_body(
    client: &dyn HttpClient,
    series: &str,
    request: HttpRequest,
) -> Result<String, FetchError> {
    let url = request.display_url();
    debug!(series, url = %url, "requesting series");

    let response = client
        .execute(request)
        .await
        .map_err(|error| FetchError::Transport {
            series: series.to_owned(),
            url: url.clone(),
            message: error.message().to_owned(),
        })?;

    if !response.is_success() {
        return Err(FetchError::Status {
            series: series.to_owned(),
            status: response.status,
            url,
        });
    }

    debug!(
        series,
        status = response.status,
        bytes = response.body.len(),
        "series response received"
    );
    Ok(response.body)
}
