//! Two independent commit-count estimates.
//!
//! *Official* sums the user's entry in `/stats/contributors`. GitHub computes
//! those statistics lazily and answers 202 until they are ready; such
//! repositories are skipped, not estimated.
//!
//! *Expanded* asks `/commits?author={user}&per_page=1`. With one item per page
//! the `rel="last"` page number in the `Link` header is the commit count.
//!
//! The two totals are reported side by side and never reconciled.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tokio::time::sleep;
use tracing::debug;

use super::CollectionSession;
use crate::error::Unavailable;
use crate::github::ApiClient;
use crate::outcome::Outcome;
use crate::types::{RepoCommits, RepoOwner};

static LAST_PAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[?&]page=(\d+)[^>]*>;\s*rel="last""#).expect("last-page pattern is valid")
});

/// Result of one estimation pass over all repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitEstimate {
    pub total: u64,
    /// Repositories that contributed a value (possibly zero).
    pub counted: usize,
    /// Addressable repositories whose lookup was unavailable.
    pub skipped: usize,
    /// Keyed by `owner/name`; member repositories of different owners can share a name.
    pub per_repo: Vec<RepoCommits>,
}

impl CommitEstimate {
    fn record(&mut self, owner: &str, name: &str, outcome: Outcome<u64>) {
        let repo = format!("{owner}/{name}");
        match outcome {
            Outcome::Success(n) => {
                self.total = self.total.saturating_add(n);
                self.counted += 1;
                self.per_repo.push(RepoCommits {
                    repo,
                    commits: n,
                });
            }
            Outcome::Unavailable(reason) => {
                self.skipped += 1;
                debug!(%repo, %reason, "commit count unavailable");
            }
        }
    }
}

#[derive(Deserialize)]
struct ContributorStat {
    #[serde(default)]
    author: Option<RepoOwner>,
    #[serde(default)]
    total: u64,
}

/// The user's `total` in a `/stats/contributors` payload.
///
/// A payload that is not an array means the statistics are not ready.
/// No matching author yields zero.
pub fn official_from_stats(stats: &Value, username: &str) -> Result<u64, Unavailable> {
    let entries = stats.as_array().ok_or(Unavailable::Pending)?;
    Ok(entries
        .iter()
        .filter_map(|e| ContributorStat::deserialize(e).ok())
        .find(|s| {
            s.author
                .as_ref()
                .and_then(|a| a.login.as_deref())
                .is_some_and(|login| login.eq_ignore_ascii_case(username))
        })
        .map_or(0, |s| s.total))
}

pub async fn official_for_repo(
    client: &ApiClient,
    owner: &str,
    name: &str,
    username: &str,
) -> Outcome<u64> {
    let path = format!("/repos/{owner}/{name}/stats/contributors");
    client
        .get(&path, &[])
        .await
        .into_result()
        .and_then(|resp| {
            if resp.status == 202 {
                Err(Unavailable::Pending)
            } else {
                resp.require_ok()
            }
        })
        .and_then(|resp| resp.json::<Value>())
        .and_then(|stats| official_from_stats(&stats, username))
        .into()
}

/// Page number of the `rel="last"` link, if the header has a parseable one.
pub fn last_page(link: &str) -> Option<u64> {
    LAST_PAGE_RE
        .captures(link)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Commit count from a `per_page=1` listing: the last page number when
/// advertised, otherwise the number of items in the body.
pub fn expanded_from_listing(link: Option<&str>, body: &str) -> Result<u64, Unavailable> {
    if let Some(n) = link.and_then(last_page) {
        return Ok(n);
    }
    let items: Value = serde_json::from_str(body)?;
    Ok(items.as_array().map_or(0, |a| a.len() as u64))
}

pub async fn expanded_for_repo(
    client: &ApiClient,
    owner: &str,
    name: &str,
    username: &str,
) -> Outcome<u64> {
    let path = format!("/repos/{owner}/{name}/commits");
    client
        .get(&path, &[("author", username), ("per_page", "1")])
        .await
        .into_result()
        .and_then(|resp| resp.require_ok())
        .and_then(|resp| expanded_from_listing(resp.link.as_deref(), &resp.body))
        .into()
}

/// Sum of official per-repository totals. Repositories without owner or name are skipped.
pub async fn official(session: &CollectionSession) -> CommitEstimate {
    let mut estimate = CommitEstimate::default();
    for repo in session.repositories().await {
        let Some((owner, name)) = repo.coordinates() else {
            continue;
        };
        let outcome = official_for_repo(session.client(), owner, name, session.username()).await;
        estimate.record(owner, name, outcome);
        sleep(session.pacing().contributor_stats).await;
    }
    if estimate.skipped > 0 {
        debug!(
            skipped = estimate.skipped,
            "official commit total excludes repositories without ready statistics"
        );
    }
    estimate
}

/// Sum of expanded per-repository estimates. Repositories without owner or name are skipped.
pub async fn expanded(session: &CollectionSession) -> CommitEstimate {
    let mut estimate = CommitEstimate::default();
    for repo in session.repositories().await {
        let Some((owner, name)) = repo.coordinates() else {
            continue;
        };
        let outcome = expanded_for_repo(session.client(), owner, name, session.username()).await;
        estimate.record(owner, name, outcome);
        sleep(session.pacing().commit_list).await;
    }
    if estimate.skipped > 0 {
        debug!(
            skipped = estimate.skipped,
            "expanded commit total excludes repositories whose listing failed"
        );
    }
    estimate
}

/// The `n` repositories with the most commits, descending; ties keep listing order.
/// Repositories with zero commits are dropped.
pub fn top_repos(mut per_repo: Vec<RepoCommits>, n: usize) -> Vec<RepoCommits> {
    per_repo.retain(|r| r.commits > 0);
    per_repo.sort_by(|a, b| b.commits.cmp(&a.commits));
    per_repo.truncate(n);
    per_repo
}
