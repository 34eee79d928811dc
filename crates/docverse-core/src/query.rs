//! In-memory query state: search text, consultation filter, specialties, sort.
//!
//! States are values. Every interaction produces a fresh [`QueryState`] via
//! [`QueryState::merge`] or [`QueryState::toggle_specialty`]; nothing is
//! mutated in place once a state has been published.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::doctor::ConsultationMode;

/// A string that is not a recognised value for a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

/// Which consultation mode a doctor must offer to be listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConsultationFilter {
    #[default]
    None,
    VideoConsult,
    InClinic,
}

impl ConsultationFilter {
    /// The mode required by this filter, or `None` when unfiltered.
    pub fn mode(self) -> Option<ConsultationMode> {
        match self {
            Self::None => None,
            Self::VideoConsult => Some(ConsultationMode::VideoConsult),
            Self::InClinic => Some(ConsultationMode::InClinic),
        }
    }

    /// URL value, absent for [`ConsultationFilter::None`].
    pub fn as_param(self) -> Option<&'static str> {
        self.mode().map(ConsultationMode::as_str)
    }
}

impl FromStr for ConsultationFilter {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Video Consult" => Ok(Self::VideoConsult),
            "In Clinic" => Ok(Self::InClinic),
            other => Err(UnknownValue {
                kind: "consultation",
                value: other.to_owned(),
            }),
        }
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    None,
    /// Ascending fee.
    Fee,
    /// Descending years of experience.
    Experience,
}

impl SortKey {
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Fee => Some("fees"),
            Self::Experience => Some("experience"),
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fees" => Ok(Self::Fee),
            "experience" => Ok(Self::Experience),
            other => Err(UnknownValue {
                kind: "sort",
                value: other.to_owned(),
            }),
        }
    }
}

/// Selected specialties.
///
/// Keeps insertion order for stable iteration (and therefore stable URLs),
/// while equality only considers membership.
#[derive(Debug, Clone, Default)]
pub struct SpecialtySet(Vec<String>);

impl SpecialtySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a specialty. Returns false if it was already selected.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    /// Remove a specialty. Returns false if it was not selected.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|s| s != name);
        self.0.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|s| s == name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl PartialEq for SpecialtySet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|s| other.contains(s))
    }
}

impl Eq for SpecialtySet {}

impl<S: Into<String>> FromIterator<S> for SpecialtySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl fmt::Display for SpecialtySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// The user's current search, filter, and sort selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub search_text: String,
    pub consultation: ConsultationFilter,
    pub specialties: SpecialtySet,
    pub sort: SortKey,
}

/// A partial update. `None` fields keep the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryUpdate {
    pub search_text: Option<String>,
    pub consultation: Option<ConsultationFilter>,
    pub specialties: Option<SpecialtySet>,
    pub sort: Option<SortKey>,
}

impl QueryUpdate {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn consultation(filter: ConsultationFilter) -> Self {
        Self {
            consultation: Some(filter),
            ..Default::default()
        }
    }

    pub fn specialties(set: SpecialtySet) -> Self {
        Self {
            specialties: Some(set),
            ..Default::default()
        }
    }

    pub fn sort(key: SortKey) -> Self {
        Self {
            sort: Some(key),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl QueryState {
    /// Produce a new state with the fields present in `update` replaced.
    pub fn merge(&self, update: QueryUpdate) -> Self {
        Self {
            search_text: update
                .search_text
                .unwrap_or_else(|| self.search_text.clone()),
            consultation: update.consultation.unwrap_or(self.consultation),
            specialties: update
                .specialties
                .unwrap_or_else(|| self.specialties.clone()),
            sort: update.sort.unwrap_or(self.sort),
        }
    }

    /// Produce a new state with `name` deselected if selected, appended otherwise.
    pub fn toggle_specialty(&self, name: &str) -> Self {
        let mut specialties = self.specialties.clone();
        if !specialties.remove(name) {
            specialties.insert(name);
        }
        self.merge(QueryUpdate::specialties(specialties))
    }

    /// True when no search, filter, or sort is active.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_empty() {
        let state = QueryState::default();
        assert_eq!(state.search_text, "");
        assert_eq!(state.consultation, ConsultationFilter::None);
        assert!(state.specialties.is_empty());
        assert_eq!(state.sort, SortKey::None);
        assert!(state.is_default());
    }

    #[test]
    fn merge_keeps_omitted_fields() {
        let state = QueryState {
            search_text: "rao".into(),
            sort: SortKey::Fee,
            ..Default::default()
        };
        let next = state.merge(QueryUpdate::consultation(ConsultationFilter::InClinic));
        assert_eq!(next.search_text, "rao");
        assert_eq!(next.sort, SortKey::Fee);
        assert_eq!(next.consultation, ConsultationFilter::InClinic);
        // The source state is untouched.
        assert_eq!(state.consultation, ConsultationFilter::None);
    }

    #[test]
    fn merge_can_clear_search() {
        let state = QueryState {
            search_text: "rao".into(),
            ..Default::default()
        };
        assert!(state.merge(QueryUpdate::search("")).is_default());
    }

    #[test]
    fn toggle_specialty_adds_then_removes() {
        let state = QueryState::default().toggle_specialty("Dentist");
        assert!(state.specialties.contains("Dentist"));
        let state = state.toggle_specialty("Dentist");
        assert!(state.specialties.is_empty());
    }

    #[test]
    fn specialty_set_equality_ignores_order() {
        let a: SpecialtySet = ["Dentist", "Dermatologist"].into_iter().collect();
        let b: SpecialtySet = ["Dermatologist", "Dentist"].into_iter().collect();
        assert_eq!(a, b);
        let c: SpecialtySet = ["Dentist"].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn specialty_set_deduplicates_and_keeps_insertion_order() {
        let set: SpecialtySet = ["Dentist", "ENT", "Dentist"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Dentist", "ENT"]);
    }

    #[test]
    fn closed_enums_parse_known_values() {
        assert_eq!(
            "Video Consult".parse::<ConsultationFilter>(),
            Ok(ConsultationFilter::VideoConsult)
        );
        assert_eq!("experience".parse::<SortKey>(), Ok(SortKey::Experience));
        let err = "price".parse::<SortKey>().unwrap_err();
        assert_eq!(err.to_string(), r#"unknown sort value: "price""#);
    }

    #[test]
    fn none_variants_have_no_param() {
        assert_eq!(ConsultationFilter::None.as_param(), None);
        assert_eq!(SortKey::None.as_param(), None);
        assert_eq!(ConsultationFilter::InClinic.as_param(), Some("In Clinic"));
        assert_eq!(SortKey::Fee.as_param(), Some("fees"));
    }

    #[test]
    fn empty_update_is_identity() {
        let state = QueryState::default().toggle_specialty("ENT");
        assert!(QueryUpdate::default().is_empty());
        assert_eq!(state.merge(QueryUpdate::default()), state);
    }
}
