use std::time::Duration;

pub const API_URL: &str = "https://api.github.com";
pub const WEB_URL: &str = "https://github.com";
pub const OUTPUT_DIR: &str = "assets";

pub const PNG_FILE: &str = "github-stats.png";
pub const SVG_FILE: &str = "github-stats.svg";

pub const TIMEOUT_SECS: u64 = 12;
/// GitHub's maximum page size for list endpoints.
pub const PAGE_SIZE: usize = 100;
pub const TOP_LANGUAGES: usize = 6;
pub const TOP_REPOS: usize = 5;
/// Roughly 150 dpi relative to the 100-unit-per-inch card layout.
pub const RASTER_SCALE: f32 = 1.5;

// Courtesy delays between requests to the same endpoint family.
pub const PAGE_DELAY: Duration = Duration::from_millis(100);
pub const CONTRIBUTOR_STATS_DELAY: Duration = Duration::from_millis(80);
pub const COMMIT_LIST_DELAY: Duration = Duration::from_millis(50);
pub const LANGUAGES_DELAY: Duration = Duration::from_millis(40);
pub const COMMIT_ACTIVITY_DELAY: Duration = Duration::from_millis(50);
