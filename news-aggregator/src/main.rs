use anyhow::Context;
use news_aggregator::{AggregatorConfig, NewsAggregator, RunOutcome};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("News aggregation failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting news aggregation");

    let aggregator = NewsAggregator::new(AggregatorConfig::default())
        .context("failed to set up aggregator")?;

    let report = aggregator
        .run()
        .await
        .context("failed to update news cache")?;

    match report.outcome {
        RunOutcome::Written { items, path } => {
            info!("Cached {} items at {}", items, path.display())
        }
        RunOutcome::NoData => info!("No new data; cache left unchanged"),
    }

    info!(
        "News aggregation finished ({} feeds ok, {} failed)",
        report.succeeded.len(),
        report.failures.len()
    );
    Ok(())
}
