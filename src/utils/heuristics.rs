//! Surface-form pre-filter for candidate titles.
//!
//! Rejects obvious non-person articles before any category lookup is spent
//! on them: pure string checks, no network, no side effects.

use crate::config::rules::META_PATTERNS;

/// Returns true when the title survives all rejection rules.
pub fn is_plausible_person(title: &str) -> bool {
    if title.is_empty() {
        return false;
    }

    // Year and date articles ("1989", "2024 United States presidential election")
    if title.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }

    if title.starts_with("List of") {
        return false;
    }

    let lowered = title.to_lowercase();
    !META_PATTERNS.iter().any(|pattern| lowered.contains(pattern))
}

/// Filters a candidate list down to plausible person titles, preserving
/// input order.
pub fn filter_candidates<S: AsRef<str>>(candidates: &[S]) -> Vec<String> {
    candidates
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| is_plausible_person(c))
        .map(|c| c.to_string())
        .collect()
}
