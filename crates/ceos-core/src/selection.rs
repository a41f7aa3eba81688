//! Classification of a disambiguation answer.
//!
//! Kept free of I/O so the prompt loop only has to re-ask on `Invalid`.

/// Maximum number of candidate meanings offered to the user.
pub const MAX_CANDIDATES: usize = 10;

/// Sentinel that switches to free-text entry.
pub const FREE_TEXT_SENTINEL: &str = "S";

/// Outcome of parsing one answer to the selection prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index into the offered candidates.
    Selected(usize),
    /// The user wants to type the meaning themselves.
    FreeText,
    /// Not acceptable; ask again.
    Invalid,
}

/// Classify `input` against `candidate_count` offered candidates.
///
/// `S` (exactly) selects free text. Any input containing a digit that parses
/// as an integer `k` with `1 <= k <= candidate_count` selects `k - 1`.
/// Everything else is invalid.
pub fn parse_selection(input: &str, candidate_count: usize) -> Selection {
    if input == FREE_TEXT_SENTINEL {
        return Selection::FreeText;
    }
    if !input.chars().any(|c| c.is_ascii_digit()) {
        return Selection::Invalid;
    }
    match input.trim().parse::<i64>() {
        Ok(k) if k >= 1 && (k as u64) <= candidate_count as u64 => {
            Selection::Selected((k - 1) as usize)
        }
        _ => Selection::Invalid,
    }
}
