use std::path::PathBuf;

use clap::Parser;

use crate::defaults;

#[derive(Parser, Debug)]
#[command(
    name = "statcard",
    about = "Collect GitHub activity statistics and render them as PNG/SVG profile cards",
    version
)]
pub struct Args {
    /// GitHub login to collect statistics for
    #[arg(short = 'u', long = "user", env = "GITHUB_USER")]
    pub user: String,

    /// Directory the cards are written to (overwritten on every run)
    #[arg(short, long, default_value = defaults::OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// REST API base URL
    #[arg(long, default_value = defaults::API_URL)]
    pub api_url: String,

    /// Web host serving public profile pages
    #[arg(long, default_value = defaults::WEB_URL)]
    pub web_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = defaults::TIMEOUT_SECS)]
    pub timeout: u64,

    /// Number of languages shown on the raster card
    #[arg(long, default_value_t = defaults::TOP_LANGUAGES)]
    pub top_languages: usize,

    /// Add a commits-per-month chart (one extra request per repository)
    #[arg(long)]
    pub monthly: bool,

    /// Write only the vector card
    #[arg(long)]
    pub svg_only: bool,

    /// Raster scale factor
    #[arg(long, default_value_t = defaults::RASTER_SCALE)]
    pub scale: f32,

    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}
