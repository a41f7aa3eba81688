//! Async HTTP client wrapping reqwest.
//!
//! Plain requests with a browser user-agent, bounded redirects and a
//! per-request timeout. No retries: a failed request is reported once.

use std::time::Duration;

use ceos_core::{ScrapeError, ScrapeResult};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/131.0.0.0 Safari/537.36";

/// Response from a GET or form POST.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Shared HTTP client for the registry and the acronym service.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout_ms: u64) -> Self {
        let timeout = Duration::from_millis(timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        Self { client, timeout }
    }

    /// Perform a single GET request.
    pub async fn get(&self, url: &str) -> ScrapeResult<HttpResponse> {
        tracing::debug!("GET {url}");
        let r = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport)?;
        Self::read(url, r).await
    }

    /// POST url-encoded form fields.
    pub async fn post_form(
        &self,
        url: &str,
        form_fields: &[(String, String)],
    ) -> ScrapeResult<HttpResponse> {
        tracing::debug!("POST {url} ({} form fields)", form_fields.len());
        let r = self
            .client
            .post(url)
            .timeout(self.timeout)
            .form(form_fields)
            .send()
            .await
            .map_err(transport)?;
        Self::read(url, r).await
    }

    async fn read(url: &str, r: reqwest::Response) -> ScrapeResult<HttpResponse> {
        let status = r.status().as_u16();
        let body = r.text().await.map_err(transport)?;
        tracing::debug!("{url} -> HTTP {status}, {} bytes", body.len());

        Ok(HttpResponse { status, body })
    }
}

fn transport(e: reqwest::Error) -> ScrapeError {
    ScrapeError::Transport(e.to_string())
}
