//! Configuration loading and resolution.
//!
//! Each setting resolves as: explicit flag, then environment, then default.

use std::path::PathBuf;

use ceos_core::DEFAULT_CACHE_FILE;

/// Registry page listing every CEOS mission.
pub const DEFAULT_MISSION_URL: &str = "http://database.eohandbook.com/database/missiontable.aspx";

/// Acronym service, organizations category.
pub const DEFAULT_ACRONYM_URL: &str = "http://www.acronymfinder.com/Organizations/";

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub const ENV_MISSION_URL: &str = "CEOS_MISSION_URL";
pub const ENV_ACRONYM_URL: &str = "CEOS_ACRONYM_URL";
pub const ENV_AGENCY_CACHE: &str = "CEOS_AGENCY_CACHE";

/// Resolved settings for one scrape run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    pub mission_url: String,
    pub acronym_url: String,
    pub cache_path: PathBuf,
    pub timeout_ms: u64,
    pub clear_screen: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            mission_url: DEFAULT_MISSION_URL.to_string(),
            acronym_url: DEFAULT_ACRONYM_URL.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            clear_screen: true,
        }
    }
}

impl ScrapeConfig {
    /// Build the run configuration from command-line values.
    pub fn resolve(
        mission_url: Option<&str>,
        acronym_url: Option<&str>,
        cache_path: Option<&str>,
        timeout_ms: Option<u64>,
        clear_screen: bool,
    ) -> Self {
        Self {
            mission_url: resolve_mission_url(mission_url),
            acronym_url: resolve_acronym_url(acronym_url),
            cache_path: resolve_cache_path(cache_path),
            timeout_ms: timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
            clear_screen,
        }
    }
}

/// Resolve the mission registry URL.
pub fn resolve_mission_url(explicit: Option<&str>) -> String {
    pick(explicit, env(ENV_MISSION_URL), DEFAULT_MISSION_URL)
}

/// Resolve the acronym service base URL.
pub fn resolve_acronym_url(explicit: Option<&str>) -> String {
    pick(explicit, env(ENV_ACRONYM_URL), DEFAULT_ACRONYM_URL)
}

/// Resolve the agency cache file path.
pub fn resolve_cache_path(explicit: Option<&str>) -> PathBuf {
    PathBuf::from(pick(explicit, env(ENV_AGENCY_CACHE), DEFAULT_CACHE_FILE))
}

fn env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn pick(explicit: Option<&str>, from_env: Option<String>, default: &str) -> String {
    explicit
        .map(str::to_string)
        .or(from_env)
        .unwrap_or_else(|| default.to_string())
}
