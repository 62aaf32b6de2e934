use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use sa_client::{Client, TextBatch, DEFAULT_ADDRESS};

/// Sends the demo text batch to the sentiment analysis service on
/// 127.0.0.1:8089 over plaintext gRPC and prints the three replies.
#[derive(Parser, Debug)]
#[clap(version)]
struct Args {}

async fn send_demo_batch() -> Result<()> {
    let mut client = Client::connect(DEFAULT_ADDRESS)
        .await
        .with_context(|| format!("connecting to {DEFAULT_ADDRESS}"))?;

    let mut stdout = std::io::stdout().lock();
    sa_client::run(&mut client, &TextBatch::demo(), &mut stdout)
        .await
        .context("sentiment analysis run failed")?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!("Starting sentiment client with Args={:?}", args);

    match send_demo_batch().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
