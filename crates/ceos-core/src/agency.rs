//! Tokenization of the `Mission Agencies` cell into acronyms.

use regex::Regex;
use std::sync::OnceLock;

/// Header of the registry column that lists agency acronyms.
pub const AGENCY_COLUMN: &str = "Mission Agencies";

/// Matches `NASA (National Aeronautics and Space Administration)`.
fn parenthesized_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)\s*\(.+\)$").expect("valid agency regex"))
}

/// Split an agency cell into acronym tokens, in listed order.
///
/// Pieces are comma-separated and trimmed; a piece with a parenthesized
/// expansion is reduced to its leading word. Empty pieces are dropped and a
/// null cell yields no agencies.
pub fn parse_agencies(cell: Option<&str>) -> Vec<String> {
    let Some(cell) = cell else {
        return Vec::new();
    };

    cell.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| match parenthesized_suffix().captures(piece) {
            Some(caps) => caps[1].to_string(),
            None => piece.to_string(),
        })
        .collect()
}
