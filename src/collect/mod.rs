//! Data collection: repository listing → commit estimates, contributions,
//! languages → [`ActivityStats`].
//!
//! Strictly sequential. One request in flight at a time, with the courtesy
//! delays from [`Pacing`] between requests of the same family.

pub mod activity;
pub mod commits;
pub mod contributions;
pub mod languages;
pub mod repos;

use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::defaults;
use crate::github::ApiClient;
use crate::types::{ActivityStats, CommitTotals, Pacing, RepositoryRecord};

/// State shared by every collector during one run.
///
/// The repository list is fetched on first use and reused for the rest of the
/// session; nothing outlives the session.
#[derive(Debug)]
pub struct CollectionSession {
    client: ApiClient,
    username: String,
    pacing: Pacing,
    repos: OnceCell<Vec<RepositoryRecord>>,
}

impl CollectionSession {
    pub fn new(client: ApiClient, username: impl Into<String>, pacing: Pacing) -> Self {
        Self {
            client,
            username: username.into(),
            pacing,
            repos: OnceCell::new(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    /// All repositories of the user, paginated on first call and cached after.
    pub async fn repositories(&self) -> &[RepositoryRecord] {
        self.repos
            .get_or_init(|| repos::paginate(&self.client, &self.username, self.pacing.page))
            .await
    }
}

/// Run every collector and assemble the statistics handed to the renderer.
pub async fn collect(session: &CollectionSession, monthly: bool) -> ActivityStats {
    if !session.client().has_token() {
        info!("no GITHUB_TOKEN set; using unauthenticated rate limits");
    }

    let repo_list = session.repositories().await;
    info!("Repositories found: {}", repo_list.len());

    let contributions = contributions::last_year(session).await;
    match contributions.as_ref().ok() {
        Some(n) => info!("Contributions (last year): {n}"),
        None => info!("Contributions (last year): unavailable"),
    }

    info!("Collecting official commits (stats/contributors)...");
    let official = commits::official(session).await;
    info!("Official commits: {}", official.total);

    info!("Collecting expanded commits (commits?author=)...");
    let expanded = commits::expanded(session).await;
    info!("Expanded commits (estimate): {}", expanded.total);
    debug!(
        official = official.total,
        official_counted = official.counted,
        official_skipped = official.skipped,
        expanded = expanded.total,
        expanded_counted = expanded.counted,
        expanded_skipped = expanded.skipped,
        "commit estimates"
    );

    info!("Aggregating languages...");
    let languages = languages::aggregate(session).await;
    info!("Languages detected: {}", languages.len());

    let monthly = if monthly {
        info!("Collecting monthly activity (stats/commit_activity)...");
        let activity = activity::monthly(session, activity::current_year()).await;
        info!(
            "Monthly commits ({}): {} across {} active repositories",
            activity.year,
            activity.total(),
            activity.active_repos
        );
        Some(activity)
    } else {
        None
    };

    ActivityStats {
        username: session.username().to_string(),
        repo_count: repo_list.len(),
        stars: repos::total_stars(repo_list),
        commits: CommitTotals {
            official: official.total,
            expanded: expanded.total,
        },
        contributions,
        languages,
        primary_languages: repos::primary_languages(repo_list),
        top_repos: commits::top_repos(expanded.per_repo, defaults::TOP_REPOS),
        monthly,
    }
}
