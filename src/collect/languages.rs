use serde_json::{Map, Value};
use tokio::time::sleep;
use tracing::debug;

use super::CollectionSession;
use crate::github::ApiClient;
use crate::outcome::Outcome;
use crate::types::LanguageTally;

/// `language → bytes` for one repository, in response order.
/// Non-integer values are ignored.
pub async fn languages_for_repo(
    client: &ApiClient,
    owner: &str,
    name: &str,
) -> Outcome<Vec<(String, u64)>> {
    client
        .get_json::<Map<String, Value>>(&format!("/repos/{owner}/{name}/languages"), &[])
        .await
        .map(|map| {
            map.into_iter()
                .filter_map(|(lang, bytes)| Some((lang, bytes.as_u64()?)))
                .collect()
        })
}

/// Sum every repository's language bytes into one tally.
///
/// Repositories without a name are skipped; a missing owner falls back to the
/// session's user. A failed lookup contributes nothing.
pub async fn aggregate(session: &CollectionSession) -> LanguageTally {
    let mut tally = LanguageTally::new();
    for repo in session.repositories().await {
        let Some(name) = repo.name() else {
            continue;
        };
        let owner = repo.owner_login().unwrap_or(session.username());
        match languages_for_repo(session.client(), owner, name).await {
            Outcome::Success(langs) => langs
                .iter()
                .for_each(|(lang, bytes)| tally.add(lang, *bytes)),
            Outcome::Unavailable(reason) => debug!(repo = name, %reason, "languages unavailable"),
        }
        sleep(session.pacing().languages).await;
    }
    tally
}
