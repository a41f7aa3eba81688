//! Typed clients for the two remote sites.
//!
//! All knowledge of remote page structure goes through `ceos_core`'s
//! parsers; these clients only fetch and check status.

use async_trait::async_trait;
use reqwest::Url;

use ceos_core::{
    extract_form_tokens, parse_meanings, parse_mission_table, show_all_form, AcronymMeaning,
    FormTokens, MissionTable, ScrapeError, ScrapeResult,
};

use crate::http_client::HttpClient;

/// Source of candidate meanings for an acronym.
#[async_trait]
pub trait AcronymLookup: Send + Sync {
    /// Candidate meanings in service order; empty when nothing was found.
    async fn lookup(&self, acronym: &str) -> ScrapeResult<Vec<AcronymMeaning>>;
}

/// Client for the acronym-definition service, scoped to organizations.
pub struct AcronymServiceClient {
    http: HttpClient,
    base_url: String,
}

impl AcronymServiceClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// `{base_url}/{acronym}.html`, with the acronym percent-encoded as one segment.
    pub fn lookup_url(&self, acronym: &str) -> ScrapeResult<String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ScrapeError::Transport(format!("bad acronym URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| {
                ScrapeError::Transport(format!("acronym URL cannot take a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .push(&format!("{acronym}.html"));
        Ok(url.to_string())
    }
}

#[async_trait]
impl AcronymLookup for AcronymServiceClient {
    async fn lookup(&self, acronym: &str) -> ScrapeResult<Vec<AcronymMeaning>> {
        let url = self.lookup_url(acronym)?;
        let resp = self.http.get(&url).await?;
        if !resp.is_success() {
            return Err(ScrapeError::Lookup {
                acronym: acronym.to_string(),
                status: resp.status,
            });
        }

        let meanings = parse_meanings(&resp.body);
        tracing::debug!("{} candidate meanings for {acronym}", meanings.len());
        Ok(meanings)
    }
}

/// Client for the CEOS mission registry page.
pub struct MissionPageClient {
    http: HttpClient,
    url: String,
}

impl MissionPageClient {
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Load the landing page and read its anti-forgery tokens.
    pub async fn form_tokens(&self) -> ScrapeResult<FormTokens> {
        let resp = self.http.get(&self.url).await?;
        if !resp.is_success() {
            return Err(ScrapeError::Fetch {
                url: self.url.clone(),
                status: resp.status,
            });
        }
        extract_form_tokens(&resp.body)
    }

    /// Submit the unfiltered form and parse the full mission table.
    pub async fn fetch_table(&self, tokens: &FormTokens) -> ScrapeResult<MissionTable> {
        let form = show_all_form(tokens);
        let resp = self.http.post_form(&self.url, &form).await?;
        if !resp.is_success() {
            return Err(ScrapeError::Fetch {
                url: self.url.clone(),
                status: resp.status,
            });
        }
        parse_mission_table(&resp.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acronym_client(base: &str) -> AcronymServiceClient {
        AcronymServiceClient::new(HttpClient::new(1000), base)
    }

    #[test]
    fn test_lookup_url_joins_segment() {
        let client = acronym_client("http://www.acronymfinder.com/Organizations/");
        assert_eq!(
            client.lookup_url("NASA").unwrap(),
            "http://www.acronymfinder.com/Organizations/NASA.html"
        );

        let client = acronym_client("http://www.acronymfinder.com/Organizations");
        assert_eq!(
            client.lookup_url("ESA").unwrap(),
            "http://www.acronymfinder.com/Organizations/ESA.html"
        );
    }

    #[test]
    fn test_lookup_url_encodes_acronym() {
        let client = acronym_client("http://localhost/Organizations/");
        assert_eq!(
            client.lookup_url("A/B").unwrap(),
            "http://localhost/Organizations/A%2FB.html"
        );
    }

    #[test]
    fn test_bad_base_url() {
        let client = acronym_client("not a url");
        assert!(matches!(
            client.lookup_url("NASA"),
            Err(ScrapeError::Transport(_))
        ));
    }
}
