// src/checker/http.rs
// =============================================================================
// This module checks if a URL is alive by making one HTTP GET request.
//
// Key functionality:
// - Skips anything that isn't http:// or https:// (no network access)
// - Classifies the response strictly by status code (200, 404, other)
// - Turns transport failures (DNS, refused connection, TLS, timeout) into data
//
// verify() never fails: every call produces exactly one CheckResult.
//
// Rust concepts:
// - Traits + async_trait: the audit loop only knows about `dyn Verify`
// - Enums with data: ResultKind carries the status code or the error text
// =============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::fmt;
use url::Url;

use crate::config::AuditConfig;

/// Reason attached to every skipped link
pub const NOT_HTTP_REASON: &str = "Not an HTTP/HTTPS URL";

/// Classification of a single link check.
///
/// Exactly one kind applies to each result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ResultKind {
    /// HTTP 200
    Ok,
    /// HTTP 404
    NotFound,
    /// Any other status code (0 when the response carried none)
    OtherStatus(u16),
    /// The request never produced a response
    NetworkError(String),
    /// Not checked, with the reason
    Skipped(String),
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultKind::Ok => write!(f, "200"),
            ResultKind::NotFound => write!(f, "404"),
            ResultKind::OtherStatus(code) => write!(f, "{code}"),
            ResultKind::NetworkError(_) => write!(f, "error"),
            ResultKind::Skipped(_) => write!(f, "skipped"),
        }
    }
}

/// Outcome of checking one resolved link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// The URL that was checked
    pub url: String,
    pub kind: ResultKind,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckResult {
    /// Classifies a response purely by its status code
    pub fn from_status(url: impl Into<String>, status: u16) -> Self {
        let kind = match status {
            200 => ResultKind::Ok,
            404 => ResultKind::NotFound,
            code => ResultKind::OtherStatus(code),
        };
        Self {
            url: url.into(),
            kind,
            message: None,
        }
    }

    pub fn network_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            url: url.into(),
            kind: ResultKind::NetworkError(message.clone()),
            message: Some(message),
        }
    }

    pub fn skipped(url: impl Into<String>, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            url: url.into(),
            kind: ResultKind::Skipped(reason.clone()),
            message: Some(reason),
        }
    }
}

/// Something that can check a single absolute URL.
///
/// Implementations must always return a result; failures are expressed as
/// `NetworkError` or `Skipped`, never as an error or a dropped link.
#[async_trait]
pub trait Verify: Send + Sync {
    async fn verify(&self, url: &str) -> CheckResult;
}

/// Verifier backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    client: Client,
    retries: u32,
}

impl HttpVerifier {
    // Builds the client from the run configuration
    //
    // Redirects use reqwest's default policy. No timeout is set unless the
    // configuration asks for one, so a hung server stalls its check.
    pub fn new(config: &AuditConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().context("failed to create HTTP client")?;

        Ok(Self {
            client,
            retries: config.retries,
        })
    }
}

#[async_trait]
impl Verify for HttpVerifier {
    async fn verify(&self, url: &str) -> CheckResult {
        // reqwest would refuse an unparseable URL at request time anyway;
        // doing it here keeps the error message readable
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => return CheckResult::network_error(url, format!("invalid URL: {e}")),
        };

        if !matches!(parsed.scheme(), "http" | "https") {
            return CheckResult::skipped(url, NOT_HTTP_REASON);
        }

        let mut attempt = 0;
        loop {
            // The body is never read; dropping the response releases it
            match self.client.get(parsed.clone()).send().await {
                Ok(response) => return classify_status(url, response.status()),
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    debug!("retrying {url} ({attempt}/{}): {e}", self.retries);
                }
                Err(e) => return CheckResult::network_error(url, e.to_string()),
            }
        }
    }
}

fn classify_status(url: &str, status: StatusCode) -> CheckResult {
    CheckResult::from_status(url, status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn verifier() -> HttpVerifier {
        HttpVerifier::new(&AuditConfig::default()).unwrap()
    }

    // Accepts connections and holds them open without ever answering
    async fn silent_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{addr}/")
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(CheckResult::from_status("u", 200).kind, ResultKind::Ok);
        assert_eq!(CheckResult::from_status("u", 404).kind, ResultKind::NotFound);
        assert_eq!(
            CheckResult::from_status("u", 500).kind,
            ResultKind::OtherStatus(500)
        );
        assert_eq!(
            CheckResult::from_status("u", 0).kind,
            ResultKind::OtherStatus(0)
        );
    }

    #[test]
    fn test_result_kind_display() {
        assert_eq!(ResultKind::Ok.to_string(), "200");
        assert_eq!(ResultKind::NotFound.to_string(), "404");
        assert_eq!(ResultKind::OtherStatus(503).to_string(), "503");
        assert_eq!(ResultKind::NetworkError("x".into()).to_string(), "error");
        assert_eq!(ResultKind::Skipped("x".into()).to_string(), "skipped");
    }

    #[test]
    fn test_constructors_carry_message() {
        let error = CheckResult::network_error("http://a", "refused");
        assert_eq!(error.kind, ResultKind::NetworkError("refused".into()));
        assert_eq!(error.message.as_deref(), Some("refused"));

        let skipped = CheckResult::skipped("file:///a", NOT_HTTP_REASON);
        assert_eq!(skipped.message.as_deref(), Some(NOT_HTTP_REASON));
        assert_ne!(skipped.kind, ResultKind::NotFound);
    }

    #[tokio::test]
    async fn test_file_and_mailto_are_skipped() {
        let verifier = verifier();
        for url in ["file:///docs/readme.md", "mailto:me@example.com"] {
            let result = verifier.verify(url).await;
            assert_eq!(result.url, url);
            assert_eq!(result.kind, ResultKind::Skipped(NOT_HTTP_REASON.into()));
        }
    }

    #[tokio::test]
    async fn test_skipped_link_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let any = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        // Same host and port as the server, but not HTTP
        let url = server.url().replacen("http://", "ftp://", 1) + "/file";
        let result = verifier().verify(&url).await;

        assert!(matches!(result.kind, ResultKind::Skipped(_)));
        any.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_url_is_network_error() {
        let result = verifier().verify("ht!tp://broken").await;
        assert!(matches!(result.kind, ResultKind::NetworkError(_)));
        assert!(result.message.unwrap().starts_with("invalid URL"));
    }

    #[tokio::test]
    async fn test_classifies_by_status_code() {
        let mut server = mockito::Server::new_async().await;
        let _ok = server.mock("GET", "/ok").with_status(200).create_async().await;
        let _missing = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;
        let _down = server
            .mock("GET", "/down")
            .with_status(503)
            .create_async()
            .await;

        let verifier = verifier();
        let ok = verifier.verify(&format!("{}/ok", server.url())).await;
        let missing = verifier.verify(&format!("{}/missing", server.url())).await;
        let down = verifier.verify(&format!("{}/down", server.url())).await;

        assert_eq!(ok.kind, ResultKind::Ok);
        assert_eq!(ok.message, None);
        assert_eq!(missing.kind, ResultKind::NotFound);
        assert_eq!(down.kind, ResultKind::OtherStatus(503));
    }

    #[tokio::test]
    async fn test_uses_get_exactly_once() {
        let mut server = mockito::Server::new_async().await;
        let get = server
            .mock("GET", "/page")
            .with_status(200)
            .with_body("hello")
            .expect(1)
            .create_async()
            .await;

        verifier().verify(&format!("{}/page", server.url())).await;
        get.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Port 1 is reserved and nothing listens on it
        let result = verifier().verify("http://127.0.0.1:1/").await;
        match result.kind {
            ResultKind::NetworkError(message) => assert!(!message.is_empty()),
            other => panic!("expected a network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_retries_only_transport_failures() {
        let config = AuditConfig {
            retries: 2,
            timeout: Some(Duration::from_secs(5)),
            ..AuditConfig::default()
        };
        let verifier = HttpVerifier::new(&config).unwrap();

        let result = verifier.verify("http://127.0.0.1:1/").await;
        assert!(matches!(result.kind, ResultKind::NetworkError(_)));

        let mut server = mockito::Server::new_async().await;
        let missing = server
            .mock("GET", "/missing")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;
        let result = verifier
            .verify(&format!("{}/missing", server.url()))
            .await;
        assert_eq!(result.kind, ResultKind::NotFound);
        missing.assert_async().await;
    }

    #[tokio::test]
    async fn test_timeout_becomes_network_error() {
        let config = AuditConfig {
            timeout: Some(Duration::from_secs(1)),
            ..AuditConfig::default()
        };
        let verifier = HttpVerifier::new(&config).unwrap();
        let url = silent_server().await;

        let result = tokio::time::timeout(Duration::from_secs(10), verifier.verify(&url))
            .await
            .expect("configured timeout should end the check");

        assert_eq!(result.url, url);
        match result.kind {
            ResultKind::NetworkError(message) => assert!(!message.is_empty()),
            other => panic!("expected a network error, got {other:?}"),
        }
    }
}
