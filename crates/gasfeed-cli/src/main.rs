mod cli;
mod error;
mod logging;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use gasfeed_core::{Downloader, ReqwestHttpClient};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = cli.pipeline_config()?;
    let downloader = Downloader::new(Arc::new(ReqwestHttpClient::new()), config);

    for dataset in cli.datasets() {
        downloader.download(dataset).await?;
        println!("Saved {}", dataset.file_name());
    }

    println!("{}", cli.completion_message());
    Ok(())
}
