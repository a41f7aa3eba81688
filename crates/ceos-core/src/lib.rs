//! ceos-core — mission table parsing, agency acronym cache, and
//! disambiguation logic for the CEOS mission scraper.

pub mod acronym_page;
pub mod agency;
pub mod cache;
pub mod mission_page;
pub mod record;
pub mod selection;
pub mod types;

pub use acronym_page::parse_meanings;
pub use agency::{parse_agencies, AGENCY_COLUMN};
pub use cache::{CacheStore, DEFAULT_CACHE_FILE};
pub use mission_page::{extract_form_tokens, parse_mission_table, show_all_form, MissionTable};
pub use record::{FieldValue, MissionRecord, CANONICAL_AGENCY_NAMES};
pub use selection::{parse_selection, Selection, FREE_TEXT_SENTINEL, MAX_CANDIDATES};
pub use types::*;
