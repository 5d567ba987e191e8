use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::defaults;
use crate::outcome::Outcome;

/// Courtesy delays inserted between consecutive requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub page: Duration,
    pub contributor_stats: Duration,
    pub commit_list: Duration,
    pub languages: Duration,
    pub commit_activity: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            page: defaults::PAGE_DELAY,
            contributor_stats: defaults::CONTRIBUTOR_STATS_DELAY,
            commit_list: defaults::COMMIT_LIST_DELAY,
            languages: defaults::LANGUAGES_DELAY,
            commit_activity: defaults::COMMIT_ACTIVITY_DELAY,
        }
    }
}

impl Pacing {
    /// No delays at all; for tests against a local mock server.
    pub fn none() -> Self {
        Self {
            page: Duration::ZERO,
            contributor_stats: Duration::ZERO,
            commit_list: Duration::ZERO,
            languages: Duration::ZERO,
            commit_activity: Duration::ZERO,
        }
    }
}

/// Configuration for a `statcard` run.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub username: String,
    /// GitHub personal access token (`GITHUB_TOKEN` env var).
    pub token: Option<String>,
    pub output_dir: PathBuf,
    /// REST API base, without trailing slash.
    pub api_url: String,
    /// Web host serving public profile pages, without trailing slash.
    pub web_url: String,
    pub timeout: Duration,
    pub top_languages: usize,
    /// Query `/stats/commit_activity` for every repository and draw the monthly panel.
    pub monthly: bool,
    /// Write only the vector fallback.
    pub svg_only: bool,
    pub scale: f32,
    pub pacing: Pacing,
}

impl StatsConfig {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: None,
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            api_url: defaults::API_URL.to_string(),
            web_url: defaults::WEB_URL.to_string(),
            timeout: Duration::from_secs(defaults::TIMEOUT_SECS),
            top_languages: defaults::TOP_LANGUAGES,
            monthly: false,
            svg_only: false,
            scale: defaults::RASTER_SCALE,
            pacing: Pacing::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepoOwner {
    #[serde(default)]
    pub login: Option<String>,
}

/// One entry of `/users/{user}/repos`, kept verbatim for the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepositoryRecord {
    #[serde(default)]
    pub owner: Option<RepoOwner>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
}

impl RepositoryRecord {
    pub fn owner_login(&self) -> Option<&str> {
        self.owner
            .as_ref()
            .and_then(|o| o.login.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    /// `(owner, name)`, or `None` when the repository cannot be addressed.
    pub fn coordinates(&self) -> Option<(&str, &str)> {
        Some((self.owner_login()?, self.name()?))
    }

    pub fn stars(&self) -> u64 {
        self.stargazers_count.unwrap_or(0)
    }
}

/// Two independent estimates of the user's commit count. Never merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitTotals {
    /// Sum of `/stats/contributors` totals for the user.
    pub official: u64,
    /// Sum of counts inferred from `Link` pagination of `/commits?author=`.
    pub expanded: u64,
}

/// Additive counter keyed by name that remembers first-encounter order.
///
/// Ranking with [`Tally::top`] is a stable sort, so equal counts keep the order
/// in which their keys were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

/// Bytes of source per language, summed over all repositories.
pub type LanguageTally = Tally;

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, amount: u64) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 = self.entries[i].1.saturating_add(amount),
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), amount));
            }
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.index.get(key).map_or(0, |&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Entries in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), *n))
    }

    /// The `n` largest entries, descending; ties keep encounter order.
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl<'a> FromIterator<(&'a str, u64)> for Tally {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let mut tally = Self::new();
        iter.into_iter().for_each(|(k, n)| tally.add(k, n));
        tally
    }
}

/// Expanded commit estimate for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCommits {
    pub repo: String,
    pub commits: u64,
}

/// Commits per calendar month of one year, January first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyActivity {
    pub year: i32,
    pub months: [u64; 12],
    /// Repositories with at least one commit in the weeks reported for them.
    pub active_repos: usize,
}

impl MonthlyActivity {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            months: [0; 12],
            active_repos: 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.months.iter().sum()
    }
}

/// Everything the renderer needs. Built fresh every run.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityStats {
    pub username: String,
    pub repo_count: usize,
    pub stars: u64,
    pub commits: CommitTotals,
    /// Best-effort; `Unavailable` is rendered as "n/a", never as a real zero.
    pub contributions: Outcome<u64>,
    pub languages: LanguageTally,
    /// Number of repositories declaring each primary language.
    pub primary_languages: Tally,
    /// Repositories ranked by expanded commit count, descending.
    pub top_repos: Vec<RepoCommits>,
    pub monthly: Option<MonthlyActivity>,
}

impl ActivityStats {
    /// Stats for a run where nothing could be collected.
    pub fn empty(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            repo_count: 0,
            stars: 0,
            commits: CommitTotals::default(),
            contributions: Outcome::Unavailable(crate::error::Unavailable::NotFound(
                "contribution count",
            )),
            languages: LanguageTally::new(),
            primary_languages: Tally::new(),
            top_repos: vec![],
            monthly: None,
        }
    }
}
