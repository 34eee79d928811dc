//! Mapping between [`QueryState`] and URL query parameters.
//!
//! | state field    | parameter      | omitted when   |
//! |----------------|----------------|----------------|
//! | `search_text`  | `search`       | empty          |
//! | `consultation` | `consultation` | `None`         |
//! | `specialties`  | `specialty`    | one per entry  |
//! | `sort`         | `sort`         | `None`         |
//!
//! Decoding is total: unknown enum values and missing parameters fall back
//! to the defaults.

use url::form_urlencoded;

use crate::query::{ConsultationFilter, QueryState, SortKey, SpecialtySet};

pub const SEARCH: &str = "search";
pub const CONSULTATION: &str = "consultation";
pub const SPECIALTY: &str = "specialty";
pub const SORT: &str = "sort";

/// Flat, ordered, multi-valued parameter list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).next()
    }

    /// Every value for `key`, in order.
    pub fn get_all<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse `application/x-www-form-urlencoded` text. A leading `?` is ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self(
            form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        )
    }

    /// Serialise as a query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

pub fn encode(state: &QueryState) -> QueryParams {
    let mut params = QueryParams::new();
    if !state.search_text.is_empty() {
        params.append(SEARCH, state.search_text.as_str());
    }
    if let Some(value) = state.consultation.as_param() {
        params.append(CONSULTATION, value);
    }
    for specialty in state.specialties.iter() {
        params.append(SPECIALTY, specialty);
    }
    if let Some(value) = state.sort.as_param() {
        params.append(SORT, value);
    }
    params
}

pub fn decode(params: &QueryParams) -> QueryState {
    QueryState {
        search_text: params.get(SEARCH).unwrap_or_default().to_owned(),
        consultation: params
            .get(CONSULTATION)
            .and_then(|v| v.parse::<ConsultationFilter>().ok())
            .unwrap_or_default(),
        specialties: params.get_all(SPECIALTY).collect::<SpecialtySet>(),
        sort: params
            .get(SORT)
            .and_then(|v| v.parse::<SortKey>().ok())
            .unwrap_or_default(),
    }
}

/// Encode straight to a query string (no leading `?`).
pub fn to_query_string(state: &QueryState) -> String {
    encode(state).to_query_string()
}

/// Decode straight from a query string; a leading `?` is accepted.
pub fn from_query_string(query: &str) -> QueryState {
    decode(&QueryParams::parse(query))
}
