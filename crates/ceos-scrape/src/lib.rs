//! ceos-scrape — scrape the CEOS mission table and resolve agency acronyms.

pub mod clients;
pub mod config;
pub mod http_client;
pub mod prompt;
pub mod resolver;
pub mod scrape;

pub use clients::{AcronymLookup, AcronymServiceClient, MissionPageClient};
pub use config::ScrapeConfig;
pub use http_client::{HttpClient, HttpResponse};
pub use prompt::{ConsolePrompter, Prompter};
#[cfg(any(test, feature = "testing"))]
pub use prompt::ScriptedPrompter;
pub use resolver::AcronymResolver;
pub use scrape::{annotate, render_json, scrape};
