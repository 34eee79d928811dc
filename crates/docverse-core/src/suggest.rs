//! Autocomplete suggestions and the specialty facet list.

use std::collections::BTreeSet;

use crate::doctor::Doctor;
use crate::pipeline::name_matches;

/// Upper bound on suggestions offered per keystroke.
pub const MAX_SUGGESTIONS: usize = 3;

/// Names of the first [`MAX_SUGGESTIONS`] doctors, in collection order, whose
/// name contains `text` case-insensitively.
///
/// Names are neither deduplicated nor re-sorted. Empty `text` gives nothing.
pub fn suggest<'a>(doctors: &'a [Doctor], text: &str) -> Vec<&'a str> {
    if text.is_empty() {
        return Vec::new();
    }
    let needle = text.to_lowercase();
    doctors
        .iter()
        .filter(|d| name_matches(d, &needle))
        .take(MAX_SUGGESTIONS)
        .map(|d| d.name.as_str())
        .collect()
}

/// Every distinct specialty across the collection, sorted ascending.
pub fn available_specialties(doctors: &[Doctor]) -> Vec<&str> {
    doctors
        .iter()
        .flat_map(|d| d.specialties.iter().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
