//! GitHub REST API v3 client.
//!
//! Every call is a plain GET and never fails the run: transport errors, bad
//! statuses and undecodable bodies all come back as [`Outcome::Unavailable`].
//! Set `GITHUB_TOKEN` in the environment for higher rate limits (5 000/hr vs 60/hr).

use reqwest::RequestBuilder;
use reqwest::header::{ACCEPT, AUTHORIZATION, LINK};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Unavailable};
use crate::outcome::Outcome;
use crate::types::StatsConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const GITHUB_JSON: &str = "application/vnd.github+json";

/// A response that made it through transport, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Raw `Link` pagination header, if any.
    pub link: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Accepts any 2xx status.
    pub fn require_success(self) -> Result<Self, Unavailable> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Unavailable::Status(self.status))
        }
    }

    /// Accepts exactly 200; a 202 "accepted, computing" is not data.
    pub fn require_ok(self) -> Result<Self, Unavailable> {
        if self.status == 200 {
            Ok(self)
        } else {
            Err(Unavailable::Status(self.status))
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Unavailable> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_url: String,
    web_url: String,
    token: Option<String>,
}

fn auth_header(token: Option<&str>) -> Option<String> {
    token.map(|t| format!("Bearer {t}"))
}

async fn read(req: RequestBuilder) -> Result<RawResponse, Unavailable> {
    let resp = req.send().await?;
    let status = resp.status().as_u16();
    let link = resp
        .headers()
        .get(LINK)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = resp.text().await?;
    Ok(RawResponse { status, link, body })
}

impl ApiClient {
    pub fn new(config: &StatsConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(format!("statcard/{VERSION}"))
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;
        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            web_url: config.web_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/{username}", self.web_url)
    }

    /// GET an API path (e.g. `/users/alice/repos`) with the GitHub JSON headers.
    /// Any status is returned; only transport failures are unavailable.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Outcome<RawResponse> {
        let url = format!("{}{path}", self.api_url);
        debug!(%url, ?query, "GET");
        let mut req = self.http.get(&url).header(ACCEPT, GITHUB_JSON).query(query);
        if let Some(auth) = auth_header(self.token.as_deref()) {
            req = req.header(AUTHORIZATION, auth);
        }
        read(req).await.into()
    }

    /// GET an API path and decode a 2xx JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Outcome<T> {
        self.get(path, query)
            .await
            .into_result()
            .and_then(RawResponse::require_success)
            .and_then(|r| r.json())
            .into()
    }

    /// Fetch a public web page as text. No API headers, no token.
    pub async fn fetch_html(&self, url: &str) -> Outcome<String> {
        debug!(%url, "GET html");
        read(self.http.get(url))
            .await
            .and_then(RawResponse::require_success)
            .map(|r| r.body)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer, token: Option<&str>) -> ApiClient {
        let mut config = StatsConfig::new("alice");
        config.api_url = server.base_url();
        config.web_url = server.base_url();
        config.token = token.map(str::to_string);
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn auth_header_some() {
        assert_eq!(auth_header(Some("tok")), Some("Bearer tok".to_string()));
    }

    #[test]
    fn auth_header_none() {
        assert_eq!(auth_header(None), None);
    }

    #[test]
    fn empty_token_is_ignored() {
        let mut config = StatsConfig::new("alice");
        config.token = Some(String::new());
        assert!(!ApiClient::new(&config).unwrap().has_token());
    }

    #[test]
    fn profile_url_trims_trailing_slash() {
        let mut config = StatsConfig::new("alice");
        config.web_url = "https://example.test/".to_string();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.profile_url("alice"), "https://example.test/alice");
    }

    #[test]
    fn raw_response_status_checks() {
        let accepted = RawResponse {
            status: 202,
            link: None,
            body: "{}".into(),
        };
        assert!(accepted.is_success());
        assert_eq!(accepted.clone().require_ok(), Err(Unavailable::Status(202)));
        assert!(accepted.require_success().is_ok());
    }

    #[tokio::test]
    async fn get_json_sends_github_headers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/alice")
                    .header("Accept", "application/vnd.github+json")
                    .header("Authorization", "Bearer tok");
                then.status(200).json_body(json!({ "login": "alice" }));
            })
            .await;

        let client = client_for(&server, Some("tok"));
        let out: Outcome<serde_json::Value> = client.get_json("/users/alice", &[]).await;
        mock.assert_async().await;
        assert_eq!(out.ok().unwrap()["login"], "alice");
    }

    #[tokio::test]
    async fn get_json_server_error_is_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/boom");
                then.status(500).body("oops");
            })
            .await;

        let client = client_for(&server, None);
        let out: Outcome<serde_json::Value> = client.get_json("/boom", &[]).await;
        assert_eq!(out.reason(), Some(&Unavailable::Status(500)));
    }

    #[tokio::test]
    async fn get_json_malformed_body_is_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/bad");
                then.status(200).body("{not json");
            })
            .await;

        let client = client_for(&server, None);
        let out: Outcome<serde_json::Value> = client.get_json("/bad", &[]).await;
        assert!(matches!(out.reason(), Some(Unavailable::Decode(_))));
    }

    #[tokio::test]
    async fn get_exposes_link_header_and_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/list").query_param("page", "2");
                then.status(200)
                    .header("Link", "<https://x/list?page=3>; rel=\"last\"")
                    .body("[]");
            })
            .await;

        let client = client_for(&server, None);
        let resp = client.get("/list", &[("page", "2")]).await.ok().unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(
            resp.link.as_deref(),
            Some("<https://x/list?page=3>; rel=\"last\"")
        );
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let mut config = StatsConfig::new("alice");
        config.api_url = "http://127.0.0.1:1".to_string();
        let client = ApiClient::new(&config).unwrap();
        let out = client.get("/users/alice", &[]).await;
        assert!(matches!(out.reason(), Some(Unavailable::Transport(_))));
    }

    #[tokio::test]
    async fn slow_response_times_out_as_transport_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/alice");
                then.status(200)
                    .delay(std::time::Duration::from_secs(3))
                    .json_body(json!({ "login": "alice" }));
            })
            .await;

        let mut config = StatsConfig::new("alice");
        config.api_url = server.base_url();
        config.timeout = std::time::Duration::from_millis(300);
        let client = ApiClient::new(&config).unwrap();

        let out: Outcome<serde_json::Value> = client.get_json("/users/alice", &[]).await;
        assert!(matches!(out.reason(), Some(Unavailable::Transport(_))));
    }

    #[tokio::test]
    async fn fetch_html_returns_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/alice");
                then.status(200).body("<html>hi</html>");
            })
            .await;

        let client = client_for(&server, None);
        let html = client.fetch_html(&client.profile_url("alice")).await;
        assert_eq!(html, Outcome::Success("<html>hi</html>".to_string()));
    }

    #[tokio::test]
    async fn fetch_html_not_found_is_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ghost");
                then.status(404);
            })
            .await;

        let client = client_for(&server, None);
        let html = client.fetch_html(&client.profile_url("ghost")).await;
        assert_eq!(html.reason(), Some(&Unavailable::Status(404)));
    }
}
