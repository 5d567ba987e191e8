use std::time::Duration;

use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::defaults::PAGE_SIZE;
use crate::error::Unavailable;
use crate::github::ApiClient;
use crate::types::{RepositoryRecord, Tally};

async fn fetch_page(
    client: &ApiClient,
    path: &str,
    page: u32,
) -> Result<Vec<Value>, Unavailable> {
    let per_page = PAGE_SIZE.to_string();
    let page = page.to_string();
    let query = [
        ("per_page", per_page.as_str()),
        ("page", page.as_str()),
        ("type", "all"),
        ("sort", "updated"),
    ];
    client
        .get(path, &query)
        .await
        .into_result()?
        .require_ok()?
        .json()
}

/// Fetch `/users/{username}/repos` page by page.
///
/// Stops after the first page shorter than [`PAGE_SIZE`] (including an empty one)
/// or the first failed page; items gathered before a failure are kept.
pub async fn paginate(client: &ApiClient, username: &str, delay: Duration) -> Vec<RepositoryRecord> {
    let path = format!("/users/{username}/repos");
    let mut repos = Vec::new();

    for page in 1u32.. {
        let batch = match fetch_page(client, &path, page).await {
            Ok(batch) => batch,
            Err(reason) => {
                warn!(page, %reason, "repository listing stopped");
                break;
            }
        };
        let len = batch.len();
        repos.extend(
            batch
                .into_iter()
                .filter_map(|item| serde_json::from_value::<RepositoryRecord>(item).ok()),
        );
        debug!(page, len, total = repos.len(), "repository page");

        if len < PAGE_SIZE {
            break;
        }
        sleep(delay).await;
    }

    repos
}

pub fn total_stars(repos: &[RepositoryRecord]) -> u64 {
    repos.iter().map(RepositoryRecord::stars).sum()
}

/// How many repositories declare each primary language, in encounter order.
pub fn primary_languages(repos: &[RepositoryRecord]) -> Tally {
    repos
        .iter()
        .filter_map(|r| r.language.as_deref())
        .filter(|l| !l.is_empty())
        .map(|l| (l, 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::test_support::session_for;
    use httpmock::prelude::*;
    use serde_json::json;

    fn items(range: std::ops::Range<usize>) -> Value {
        Value::Array(
            range
                .map(|i| json!({ "name": format!("repo{i}"), "owner": { "login": "alice" } }))
                .collect(),
        )
    }

    #[tokio::test]
    async fn stops_after_short_page() {
        let server = MockServer::start_async().await;
        let p1 = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/alice/repos")
                    .query_param("page", "1")
                    .query_param("per_page", "100")
                    .query_param("type", "all")
                    .query_param("sort", "updated");
                then.status(200).json_body(items(0..100));
            })
            .await;
        let p2 = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/alice/repos")
                    .query_param("page", "2");
                then.status(200).json_body(items(100..200));
            })
            .await;
        let p3 = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/alice/repos")
                    .query_param("page", "3");
                then.status(200).json_body(items(200..250));
            })
            .await;
        let p4 = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/alice/repos")
                    .query_param("page", "4");
                then.status(200).json_body(json!([]));
            })
            .await;

        let session = session_for(&server, "alice");
        let repos = session.repositories().await;

        assert_eq!(repos.len(), 250);
        assert_eq!(repos[0].name(), Some("repo0"));
        assert_eq!(repos[249].name(), Some("repo249"));
        p1.assert_hits_async(1).await;
        p2.assert_hits_async(1).await;
        p3.assert_hits_async(1).await;
        p4.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn stops_on_empty_page() {
        let server = MockServer::start_async().await;
        let p1 = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/alice/repos")
                    .query_param("page", "1");
                then.status(200).json_body(items(0..100));
            })
            .await;
        let p2 = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/alice/repos")
                    .query_param("page", "2");
                then.status(200).json_body(json!([]));
            })
            .await;

        let session = session_for(&server, "alice");
        assert_eq!(session.repositories().await.len(), 100);
        p1.assert_hits_async(1).await;
        p2.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn failed_page_keeps_earlier_items() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/alice/repos")
                    .query_param("page", "1");
                then.status(200).json_body(items(0..100));
            })
            .await;
        let p2 = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/alice/repos")
                    .query_param("page", "2");
                then.status(403).json_body(json!({ "message": "rate limited" }));
            })
            .await;

        let session = session_for(&server, "alice");
        assert_eq!(session.repositories().await.len(), 100);
        p2.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn non_array_page_is_treated_as_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/alice/repos");
                then.status(200).json_body(json!({ "message": "Not Found" }));
            })
            .await;

        let session = session_for(&server, "alice");
        assert!(session.repositories().await.is_empty());
    }

    #[test]
    fn stars_and_primary_languages() {
        let repos: Vec<RepositoryRecord> = serde_json::from_value(json!([
            { "name": "a", "language": "Rust", "stargazers_count": 3 },
            { "name": "b", "language": "Go", "stargazers_count": 2 },
            { "name": "c", "language": null },
            { "name": "d", "language": "Rust", "stargazers_count": 5 }
        ]))
        .unwrap();

        assert_eq!(total_stars(&repos), 10);
        let langs = primary_languages(&repos);
        assert_eq!(langs.get("Rust"), 2);
        assert_eq!(langs.get("Go"), 1);
        assert_eq!(langs.len(), 2);
    }
}
