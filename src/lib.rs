//! # statcard
//!
//! Collect a GitHub user's activity statistics and render them as profile cards.
//!
//! The main entry point is [`run()`], which executes the full pipeline:
//! repository listing, commit estimates, contribution scraping, language
//! aggregation, and card rendering. Every data source is best-effort; a failed
//! request lowers a number instead of aborting the run.

pub mod cli;
pub mod collect;
pub mod defaults;
pub mod error;
pub mod github;
pub mod outcome;
pub mod render;
pub mod types;

use std::time::{Duration, Instant};

use tracing::info;

use crate::collect::CollectionSession;
use crate::github::ApiClient;
use crate::render::Artifacts;
use crate::types::StatsConfig;

/// Run the full pipeline: collect → render → write.
///
/// Only local failures (client construction, output directory, encoding) are
/// returned as errors.
pub async fn run(config: &StatsConfig) -> anyhow::Result<Artifacts> {
    let start = Instant::now();
    info!(user = %config.username, "Collecting GitHub statistics");

    let client = ApiClient::new(config)?;
    let session = CollectionSession::new(client, &config.username, config.pacing);
    let stats = collect::collect(&session, config.monthly).await;

    let artifacts = render::write_artifacts(&stats, config).await?;
    info!(
        svg = %artifacts.svg.display(),
        png = ?artifacts.png.as_ref().map(|p| p.display().to_string()),
        "Cards written in {}",
        elapsed_str(start.elapsed())
    );
    Ok(artifacts)
}

fn elapsed_str(d: Duration) -> String {
    if d.as_millis() < 1000 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}
