//! Shared types and the error taxonomy for the scraper.

use serde::{Deserialize, Serialize};

/// One candidate meaning returned by the acronym service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcronymMeaning {
    /// Short form as spelled by the service (may differ in case from the query).
    pub short_form: String,
    /// Expanded meaning offered for the short form.
    pub meaning: String,
}

impl AcronymMeaning {
    pub fn new(short_form: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            short_form: short_form.into(),
            meaning: meaning.into(),
        }
    }
}

/// The two anti-forgery tokens the registry form must echo back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormTokens {
    pub view_state: String,
    pub event_validation: String,
}

/// Errors that can occur while scraping or resolving agencies.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("Fetch failed: {url} returned HTTP {status}")]
    Fetch { url: String, status: u16 },

    #[error("Acronym lookup failed for {acronym}: HTTP {status}")]
    Lookup { acronym: String, status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected page structure: {0}")]
    Structure(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type.
pub type ScrapeResult<T> = Result<T, ScrapeError>;
