pub mod card;
pub mod fallback;
pub mod format;
pub mod raster;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::defaults;
use crate::error::Error;
use crate::types::{ActivityStats, StatsConfig};
use format::compact;

/// Shown instead of a number when the value could not be obtained.
pub const NOT_AVAILABLE: &str = "n/a";

/// One headline number on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
    /// Where the number comes from.
    pub source: &'static str,
}

/// The three headline numbers, in display order.
pub fn metrics(stats: &ActivityStats) -> [Metric; 3] {
    let contributions = stats
        .contributions
        .as_ref()
        .ok()
        .map_or_else(|| NOT_AVAILABLE.to_string(), |n| compact(*n));
    [
        Metric {
            label: "Official commits",
            value: compact(stats.commits.official),
            source: "/stats/contributors",
        },
        Metric {
            label: "Expanded commits",
            value: compact(stats.commits.expanded),
            source: "/commits?author=",
        },
        Metric {
            label: "Contributions (last year)",
            value: contributions,
            source: "profile graph, best-effort",
        },
    ]
}

/// Paths of the files written by [`write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub png: Option<PathBuf>,
    pub svg: PathBuf,
}

pub fn generated_at() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()
}

async fn write(path: &Path, bytes: impl AsRef<[u8]>) -> Result<(), Error> {
    tokio::fs::write(path, bytes).await?;
    debug!(path = %path.display(), "wrote artifact");
    Ok(())
}

/// Write the vector fallback and, unless `svg_only`, the raster card into
/// `config.output_dir`, overwriting earlier runs.
pub async fn write_artifacts(stats: &ActivityStats, config: &StatsConfig) -> Result<Artifacts, Error> {
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|source| Error::OutputDir {
            path: config.output_dir.clone(),
            source,
        })?;

    let svg = config.output_dir.join(defaults::SVG_FILE);
    write(&svg, fallback::render(stats)).await?;

    let png = if config.svg_only {
        None
    } else {
        let path = config.output_dir.join(defaults::PNG_FILE);
        let card = card::render(stats, config.top_languages, &generated_at());
        write(&path, raster::svg_to_png(&card, config.scale)?).await?;
        Some(path)
    };

    Ok(Artifacts { png, svg })
}
