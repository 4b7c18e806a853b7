// src/checker/http.rs
// =============================================================================
// This module makes the HTTP requests behind every deployed-site check.
//
// Key functionality:
// - Plain GET requests (crawlers and PWA installers use GET, not HEAD)
// - A per-request time bound enforced with tokio::time::timeout
// - No errors escape: a failed or timed-out request becomes a FetchOutcome
//   with `status: None`, which every check reads as "unreachable"
// - No retries: each URL is requested once per invocation
// =============================================================================

use anyhow::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

// What a single request produced
//
// `status: None` means the request never completed (network error or
// timeout). That is different from completing with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub url: String,
    pub status: Option<u16>,
    /// Response body, only read by `Fetcher::fetch`; empty otherwise
    pub body: String,
}

impl FetchOutcome {
    fn unreachable(url: &str) -> Self {
        Self {
            url: url.to_string(),
            status: None,
            body: String::new(),
        }
    }

    /// Only an exact 200 counts as reachable
    pub fn is_ok(&self) -> bool {
        self.status == Some(200)
    }

    /// The body when the request returned 200, otherwise empty content
    pub fn ok_body(&self) -> &str {
        if self.is_ok() {
            &self.body
        } else {
            ""
        }
    }

    /// "HTTP 404" or "no response", for details strings
    pub fn status_label(&self) -> String {
        match self.status {
            Some(code) => format!("HTTP {}", code),
            None => "no response".to_string(),
        }
    }
}

// Issues bounded-time GET requests with one shared connection pool
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `url` and read the body (pages, robots.txt, JSON documents)
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        self.get(url, true).await
    }

    /// GET `url` for its status only (images, icons)
    pub async fn fetch_status(&self, url: &str) -> FetchOutcome {
        self.get(url, false).await
    }

    async fn get(&self, url: &str, read_body: bool) -> FetchOutcome {
        let request = async {
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let body = if read_body {
                response.text().await?
            } else {
                String::new()
            };
            Ok::<_, reqwest::Error>((status, body))
        };

        // Dropping the request future when the timer fires cancels it
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok((status, body))) => {
                debug!(url, status, "request completed");
                FetchOutcome {
                    url: url.to_string(),
                    status: Some(status),
                    body,
                }
            }
            Ok(Err(error)) => {
                debug!(url, reason = categorize_error(&error), %error, "request failed");
                FetchOutcome::unreachable(url)
            }
            Err(_) => {
                debug!(url, timeout_ms = self.timeout.as_millis() as u64, "request timed out");
                FetchOutcome::unreachable(url)
            }
        }
    }
}

// Short reason for a failed request, used in debug logs
fn categorize_error(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timeout"
    } else if error.is_redirect() {
        "too many redirects"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_builder() {
        "invalid url"
    } else if error.is_body() || error.is_decode() {
        "unreadable body"
    } else {
        "request error"
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why tokio::time::timeout instead of Client::builder().timeout()?
//    - The timer wraps sending AND reading the body, so a server that sends
//      headers and then stalls is still cut off
//    - When the timer fires, the inner future is dropped, which cancels the
//      request; nothing is left running in the background
//
// 2. Why Option<u16> instead of Result?
//    - Callers only ever need "which status" or "no response"
//    - A Result would tempt callers to use `?` and abort the whole checklist
//      over one broken image
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(timeout_ms: u64) -> Fetcher {
        Fetcher::new("visibility-check-test", Duration::from_millis(timeout_ms)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_reads_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *"))
            .mount(&server)
            .await;

        let outcome = fetcher(2_000).fetch(&format!("{}/robots.txt", server.uri())).await;
        assert_eq!(outcome.status, Some(200));
        assert!(outcome.is_ok());
        assert_eq!(outcome.ok_body(), "User-agent: *");
    }

    #[tokio::test]
    async fn test_non_200_keeps_status_but_hides_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
            .mount(&server)
            .await;

        let outcome = fetcher(2_000).fetch(&format!("{}/missing", server.uri())).await;
        assert_eq!(outcome.status, Some(404));
        assert!(!outcome.is_ok());
        assert_eq!(outcome.ok_body(), "");
        assert_eq!(outcome.status_label(), "HTTP 404");
    }

    #[tokio::test]
    async fn test_timeout_becomes_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let outcome = fetcher(200).fetch_status(&server.uri()).await;
        assert_eq!(outcome.status, None);
        assert_eq!(outcome.status_label(), "no response");
    }

    #[tokio::test]
    async fn test_connection_failure_becomes_unreachable() {
        let outcome = fetcher(2_000).fetch("http://127.0.0.1:1/").await;
        assert_eq!(outcome.status, None);
        assert_eq!(outcome.url, "http://127.0.0.1:1/");
    }

    #[tokio::test]
    async fn test_invalid_url_becomes_unreachable() {
        let outcome = fetcher(2_000).fetch_status("not a url").await;
        assert_eq!(outcome.status, None);
    }
}
