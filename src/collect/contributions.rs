//! Yearly contribution count, scraped from the public profile page.
//!
//! This depends on the host's page markup and can break at any time. The only
//! network seam is [`ApiClient::fetch_html`]; the parsing lives in
//! [`parse_contribution_count`] so the source can be swapped without touching
//! aggregation.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use super::CollectionSession;
use crate::error::Unavailable;
use crate::github::ApiClient;
use crate::outcome::Outcome;

static CONTRIBUTIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\d,]+)\s+contributions?\s+in\s+the\s+last\s+year")
        .expect("contributions pattern is valid")
});

/// Extract `N` from "N contributions in the last year", ignoring thousands separators.
pub fn parse_contribution_count(html: &str) -> Option<u64> {
    let caps = CONTRIBUTIONS_RE.captures(html)?;
    caps.get(1)?.as_str().replace(',', "").parse().ok()
}

pub async fn scrape_profile(client: &ApiClient, username: &str) -> Outcome<u64> {
    client
        .fetch_html(&client.profile_url(username))
        .await
        .into_result()
        .and_then(|html| {
            parse_contribution_count(&html).ok_or(Unavailable::NotFound("contribution phrase"))
        })
        .into()
}

/// `contributions` on `/users/{user}`. Not a documented field; usually absent.
pub async fn rest_field(client: &ApiClient, username: &str) -> Outcome<u64> {
    client
        .get_json::<Value>(&format!("/users/{username}"), &[])
        .await
        .and_then(|user| match user.get("contributions").and_then(Value::as_u64) {
            Some(n) => Outcome::Success(n),
            None => Outcome::Unavailable(Unavailable::NotFound("contributions field")),
        })
}

/// Profile scrape, then the REST field. Unavailable when both fail.
pub async fn last_year(session: &CollectionSession) -> Outcome<u64> {
    let client = session.client();
    let username = session.username();

    match scrape_profile(client, username).await {
        Outcome::Success(n) => Outcome::Success(n),
        Outcome::Unavailable(reason) => {
            debug!(%reason, "profile scrape failed; trying REST field");
            let fallback = rest_field(client, username).await;
            if let Some(reason) = fallback.reason() {
                warn!(%reason, "contribution count unavailable");
            }
            fallback
        }
    }
}
