//! Behavior-driven tests for the download pipeline
//!
//! These tests drive the `Downloader` against canned upstream responses and
//! check what ends up on disk: file names, headers, ordering, failure
//! isolation and re-run stability.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use gasfeed_core::{
    ApiKey, Dataset, Downloader, FetchError, HttpResponse, ParseError, PipelineConfig,
    PipelineError, StaticHttpClient,
};
use tempfile::tempdir;

const PRICES: &str = r#"{"response":{"data":[
    {"period":"2024-03-02","value":1.75},
    {"period":"2024-03-01","value":1.80}
]}}"#;

const STORAGE: &str = r#"{"response":{"total":"2","data":[
    {"period":"2024-03-08","series":"NW2_EPG0_SWO_R48_BCF","value":"2334","units":"BCF"},
    {"period":"2024-03-01","series":"NW2_EPG0_SWO_R48_BCF","value":"2374","units":"BCF"}
]}}"#;

const PRODUCTION: &str = r#"{"response":{"data":[
    {"period":"2024-03-08","value":104.9},
    {"period":"2024-03-01","value":105.1}
]}}"#;

const DEMAND: &str = r#"{"response":{"data":[
    {"period":"2024-03-15","value":88.0},
    {"period":"2024-03-08","value":96.4}
]}}"#;

const LNG: &str = r#"{"response":{"data":[
    {"period":"2024-03-22","value":13.2},
    {"period":"2024-03-15","value":13.9}
]}}"#;

const WEATHER: &str = r#"[
    {"DATE":"2024-03-02","STATION":"USW00012960","HDD":"0","CDD":"6"},
    {"DATE":"2024-03-01","STATION":"USW00012960","HDD":"3","CDD":"1"}
]"#;

fn healthy_upstream() -> StaticHttpClient {
    StaticHttpClient::new()
        .with_route("/natural-gas/pri/fut/", HttpResponse::ok_json(PRICES))
        .with_route("/natural-gas/stor/wkly/", HttpResponse::ok_json(STORAGE))
        .with_route("/natural-gas/ngs/dry/", HttpResponse::ok_json(PRODUCTION))
        .with_route("/natural-gas/ngs/cons/", HttpResponse::ok_json(DEMAND))
        .with_route("/natural-gas/ngs/lng/", HttpResponse::ok_json(LNG))
        .with_route("dataset=daily-summaries", HttpResponse::ok_json(WEATHER))
}

fn downloader(client: StaticHttpClient, output_dir: &Path) -> Downloader {
    let config = PipelineConfig::default()
        .with_api_key(ApiKey::new("test-key"))
        .with_eia_base_url("http://eia.test/v2")
        .with_noaa_base_url("http://noaa.test/data/v1")
        .with_output_dir(output_dir);
    Downloader::new(Arc::new(client), config)
}

fn read(dir: &Path, dataset: Dataset) -> String {
    fs::read_to_string(dir.join(dataset.file_name())).expect("output file should exist")
}

// =============================================================================
// Pipeline: Successful Runs
// =============================================================================

#[tokio::test]
async fn when_prices_arrive_unsorted_the_csv_is_written_in_date_order() {
    // Given: the price endpoint returns 03-02 before 03-01
    let dir = tempdir().expect("tempdir");
    let downloader = downloader(healthy_upstream(), dir.path());

    // When: the price dataset is downloaded
    let report = downloader
        .download(Dataset::Prices)
        .await
        .expect("price download should succeed");

    // Then: rows are ascending and values keep their source text
    assert_eq!(report.rows, 2);
    assert_eq!(
        read(dir.path(), Dataset::Prices),
        "date,spot\n2024-03-01,1.80\n2024-03-02,1.75\n"
    );
}

#[tokio::test]
async fn when_every_dataset_runs_each_file_has_its_documented_header() {
    // Given: healthy upstream services and an output directory that does not exist yet
    let dir = tempdir().expect("tempdir");
    let output_dir = dir.path().join("data").join("raw");
    let downloader = downloader(healthy_upstream(), &output_dir);

    // When: all datasets run in default order
    for dataset in Dataset::ALL {
        downloader
            .download(dataset)
            .await
            .expect("every dataset should succeed");
    }

    // Then: every file exists with the expected header and sorted rows
    let expectations = [
        (Dataset::Prices, "date,spot"),
        (Dataset::Storage, "date,storage"),
        (Dataset::Fundamentals, "date,prod,demand,lng_exports"),
        (Dataset::Weather, "date,hdd,cdd"),
    ];
    for (dataset, header) in expectations {
        let contents = read(&output_dir, dataset);
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some(header), "{dataset}");

        let dates = lines
            .map(|line| line.split(',').next().unwrap_or_default().to_owned())
            .collect::<Vec<_>>();
        let mut sorted = dates.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(dates, sorted, "{dataset} rows must be strictly ascending");
    }

    assert_eq!(
        read(&output_dir, Dataset::Storage),
        "date,storage\n2024-03-01,2374\n2024-03-08,2334\n"
    );
    assert_eq!(
        read(&output_dir, Dataset::Weather),
        "date,hdd,cdd\n2024-03-01,3,1\n2024-03-02,0,6\n"
    );
}

#[tokio::test]
async fn when_fundamentals_overlap_partially_the_balance_keeps_every_date() {
    // Given: production, demand and LNG that each cover a different window
    let dir = tempdir().expect("tempdir");
    let downloader = downloader(healthy_upstream(), dir.path());

    // When: the fundamentals dataset is downloaded
    let report = downloader
        .download(Dataset::Fundamentals)
        .await
        .expect("fundamentals should succeed");

    // Then: the union of dates is written, gaps left empty
    assert_eq!(report.rows, 4);
    assert_eq!(
        read(dir.path(), Dataset::Fundamentals),
        "date,prod,demand,lng_exports\n\
         2024-03-01,105.1,,\n\
         2024-03-08,104.9,96.4,\n\
         2024-03-15,,88.0,13.9\n\
         2024-03-22,,,13.2\n"
    );
}

#[tokio::test]
async fn when_the_pipeline_reruns_on_identical_responses_files_are_byte_identical() {
    // Given: one complete run
    let dir = tempdir().expect("tempdir");
    let first = downloader(healthy_upstream(), dir.path());
    for dataset in Dataset::ALL {
        first.download(dataset).await.expect("first run succeeds");
    }
    let snapshot = Dataset::ALL.map(|dataset| read(dir.path(), dataset));

    // When: the same responses are served again
    let second = downloader(healthy_upstream(), dir.path());
    for dataset in Dataset::ALL {
        second.download(dataset).await.expect("second run succeeds");
    }

    // Then: nothing changed on disk
    assert_eq!(Dataset::ALL.map(|dataset| read(dir.path(), dataset)), snapshot);
}

#[tokio::test]
async fn eia_requests_carry_the_configured_key_and_noaa_requests_do_not() {
    // Given: a recording upstream
    let dir = tempdir().expect("tempdir");
    let client = Arc::new(healthy_upstream());
    let config = PipelineConfig::default()
        .with_api_key(ApiKey::new("test-key"))
        .with_eia_base_url("http://eia.test/v2")
        .with_noaa_base_url("http://noaa.test/data/v1")
        .with_output_dir(dir.path());
    let downloader = Downloader::new(client.clone(), config);

    // When: every dataset runs
    for dataset in Dataset::ALL {
        downloader.download(dataset).await.expect("run succeeds");
    }

    // Then: six requests went out in order, only EIA ones authenticated
    let urls = client.recorded_urls();
    assert_eq!(urls.len(), 6);
    assert!(urls[..5].iter().all(|url| url.starts_with("http://eia.test/v2/")
        && url.contains("api_key=test-key")));
    assert!(urls[5].starts_with("http://noaa.test/data/v1?"));
    assert!(!urls[5].contains("api_key"));

    // And: every EIA request is narrowed to a single series
    let facets = urls[..5]
        .iter()
        .map(|url| url.rsplit_once("facets[series][]=").map(|(_, id)| id))
        .collect::<Vec<_>>();
    assert_eq!(
        facets,
        [
            Some("RNGWHHD"),
            Some("NW2_EPG0_SWO_R48_BCF"),
            Some("N9070US2"),
            Some("N9140US2"),
            Some("N9133US2"),
        ]
    );
}

#[tokio::test]
async fn when_a_price_period_is_null_the_rest_of_the_file_is_still_written() {
    // Given: one spot period published without a value
    let dir = tempdir().expect("tempdir");
    let client = StaticHttpClient::new().with_route(
        "/natural-gas/pri/fut/",
        HttpResponse::ok_json(
            r#"{"response":{"data":[
                {"period":"2024-03-04","value":null},
                {"period":"2024-03-01","value":1.80},
                {"period":"2024-03-05","value":"1.62"}
            ]}}"#,
        ),
    );
    let downloader = downloader(client, dir.path());

    // When: the price dataset is downloaded
    let report = downloader
        .download(Dataset::Prices)
        .await
        .expect("a null period must not abort the download");

    // Then: the null period is skipped and the others are kept in order
    assert_eq!(report.rows, 2);
    assert_eq!(
        read(dir.path(), Dataset::Prices),
        "date,spot\n2024-03-01,1.80\n2024-03-05,1.62\n"
    );
}

// =============================================================================
// Pipeline: Failure Propagation
// =============================================================================

#[tokio::test]
async fn when_demand_returns_500_no_fundamentals_file_is_written() {
    // Given: the demand endpoint fails while everything else is healthy
    let dir = tempdir().expect("tempdir");
    let client = StaticHttpClient::new()
        .with_route("/natural-gas/pri/fut/", HttpResponse::ok_json(PRICES))
        .with_route("/natural-gas/stor/wkly/", HttpResponse::ok_json(STORAGE))
        .with_route("/natural-gas/ngs/dry/", HttpResponse::ok_json(PRODUCTION))
        .with_route("/natural-gas/ngs/cons/", HttpResponse::new(500, "internal error"))
        .with_route("/natural-gas/ngs/lng/", HttpResponse::ok_json(LNG));
    let downloader = downloader(client, dir.path());

    // When: prices and storage run first, then fundamentals
    downloader
        .download(Dataset::Prices)
        .await
        .expect("prices are independent");
    downloader
        .download(Dataset::Storage)
        .await
        .expect("storage is independent");
    let error = downloader
        .download(Dataset::Fundamentals)
        .await
        .expect_err("fundamentals must fail");

    // Then: the error names the failing series and status, and only the
    // fundamentals file is missing
    match error {
        PipelineError::Fetch(FetchError::Status { series, status, .. }) => {
            assert_eq!(series, "consumption");
            assert_eq!(status, 500);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(dir.path().join("ng_prices.csv").exists());
    assert!(dir.path().join("storage_eia_weekly.csv").exists());
    assert!(!dir.path().join("fundamentals_balances.csv").exists());
}

#[tokio::test]
async fn when_upstream_rejects_the_request_the_error_does_not_leak_the_key() {
    // Given: EIA rejects the key
    let dir = tempdir().expect("tempdir");
    let client = StaticHttpClient::new().with_route(
        "/natural-gas/pri/fut/",
        HttpResponse::new(403, r#"{"error":"API_KEY_INVALID"}"#),
    );
    let downloader = downloader(client, dir.path());

    // When: prices are downloaded
    let error = downloader
        .download(Dataset::Prices)
        .await
        .expect_err("403 must fail");

    // Then: the message is actionable but redacted
    let message = error.to_string();
    assert!(message.contains("403"), "{message}");
    assert!(message.contains("api_key=***"), "{message}");
    assert!(!message.contains("test-key"), "{message}");
    assert_eq!(error.exit_code(), 3);
}

#[tokio::test]
async fn when_the_body_is_not_json_a_parse_error_is_reported_and_nothing_written() {
    // Given: storage answers with an HTML error page and status 200
    let dir = tempdir().expect("tempdir");
    let client = StaticHttpClient::new().with_route(
        "/natural-gas/stor/wkly/",
        HttpResponse::ok_json("<html>maintenance</html>"),
    );
    let downloader = downloader(client, dir.path());

    // When: storage is downloaded
    let error = downloader
        .download(Dataset::Storage)
        .await
        .expect_err("html must fail");

    // Then: a typed parse error names the series
    assert!(matches!(
        &error,
        PipelineError::Parse(ParseError::InvalidJson { series, .. }) if series == "weekly_storage"
    ));
    assert_eq!(error.exit_code(), 4);
    assert!(!dir.path().join("storage_eia_weekly.csv").exists());
}

#[tokio::test]
async fn when_a_series_repeats_a_date_the_download_is_rejected() {
    // Given: LNG feedgas reports the same week twice
    let dir = tempdir().expect("tempdir");
    let client = StaticHttpClient::new()
        .with_route("/natural-gas/ngs/dry/", HttpResponse::ok_json(PRODUCTION))
        .with_route("/natural-gas/ngs/cons/", HttpResponse::ok_json(DEMAND))
        .with_route(
            "/natural-gas/ngs/lng/",
            HttpResponse::ok_json(
                r#"{"response":{"data":[{"period":"2024-03-15","value":13.9},{"period":"2024-03-15","value":14.0}]}}"#,
            ),
        );
    let downloader = downloader(client, dir.path());

    // When: fundamentals are downloaded
    let error = downloader
        .download(Dataset::Fundamentals)
        .await
        .expect_err("duplicate must fail");

    // Then: the duplicate is reported for the LNG series
    assert!(matches!(
        &error,
        PipelineError::Parse(ParseError::InvalidTable { series, .. }) if series == "lng_feedgas"
    ));
    assert!(error.to_string().contains("2024-03-15"));
}
