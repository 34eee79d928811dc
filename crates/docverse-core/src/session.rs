//! Session state: the loaded directory, the current query, and URL sync.
//!
//! [`Session`] is the only writer of the address query string. Every query
//! change goes through it, is re-encoded with [`url_codec`](crate::url_codec),
//! and replaces the current history entry rather than pushing a new one.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::doctor::Doctor;
use crate::query::{QueryState, QueryUpdate};
use crate::{pipeline, suggest, url_codec};

/// The addressable location the session reads from and writes to.
pub trait Location {
    /// Current query string, without the leading `?`.
    fn query(&self) -> String;

    /// Replace the current history entry's query string.
    fn replace_query(&mut self, query: &str);
}

/// In-memory [`Location`] with a browser-like history stack.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    path: String,
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryLocation {
    /// Start at `path` with the given query (a leading `?` is accepted).
    pub fn new(path: impl Into<String>, query: &str) -> Self {
        Self {
            path: path.into(),
            entries: vec![query.strip_prefix('?').unwrap_or(query).to_owned()],
            cursor: 0,
        }
    }

    /// Navigate to a new query, discarding any forward entries.
    pub fn push_query(&mut self, query: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries
            .push(query.strip_prefix('?').unwrap_or(query).to_owned());
        self.cursor += 1;
    }

    /// Step back one entry. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one entry. Returns false at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    /// Full relative URL of the current entry, e.g. `/?sort=fees`.
    pub fn href(&self) -> String {
        let query = &self.entries[self.cursor];
        if query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, query)
        }
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("/", "")
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.entries[self.cursor] = query.to_owned();
    }
}

/// Identity of one directory load. Results carrying an older ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Availability of the directory collection.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready(Arc<[Doctor]>),
    /// Both the remote feed and the fallback were unusable.
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

pub struct Session<L> {
    location: L,
    query: QueryState,
    load: LoadState,
    issued: u64,
    pending: Option<LoadTicket>,
}

impl<L: Location> Session<L> {
    /// Build a session whose query state is decoded from `location`.
    pub fn new(location: L) -> Self {
        let query = url_codec::from_query_string(&location.query());
        debug!(?query, "session query restored from location");
        Self {
            location,
            query,
            load: LoadState::Idle,
            issued: 0,
            pending: None,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Mark a load as in flight. Any earlier pending load becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        let ticket = LoadTicket(self.issued);
        self.pending = Some(ticket);
        self.load = LoadState::Loading;
        ticket
    }

    /// Record the outcome of the load identified by `ticket`.
    ///
    /// Returns false, leaving state untouched, when `ticket` is not the most
    /// recent load.
    pub fn finish_load<E: fmt::Display>(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Doctor>, E>,
    ) -> bool {
        if self.pending != Some(ticket) {
            debug!(?ticket, "discarding stale load result");
            return false;
        }
        self.pending = None;
        self.load = match result {
            Ok(doctors) => {
                info!(count = doctors.len(), "directory ready");
                LoadState::Ready(doctors.into())
            }
            Err(e) => LoadState::Failed(e.to_string()),
        };
        true
    }

    /// Merge `update` into the query and write the result to the location.
    pub fn update(&mut self, update: QueryUpdate) {
        let next = self.query.merge(update);
        self.publish(next);
    }

    pub fn toggle_specialty(&mut self, name: &str) {
        let next = self.query.toggle_specialty(name);
        self.publish(next);
    }

    /// Re-read the location after back/forward navigation.
    ///
    /// Returns true when the decoded query differs from the current one.
    pub fn sync_from_location(&mut self) -> bool {
        let decoded = url_codec::from_query_string(&self.location.query());
        if decoded == self.query {
            return false;
        }
        debug!(query = ?decoded, "query changed by navigation");
        self.query = decoded;
        true
    }

    /// The full loaded collection, once available.
    pub fn doctors(&self) -> Option<&[Doctor]> {
        match &self.load {
            LoadState::Ready(doctors) => Some(&doctors[..]),
            _ => None,
        }
    }

    /// Visible doctors for the current query. `None` until loaded.
    pub fn visible(&self) -> Option<Vec<&Doctor>> {
        self.doctors().map(|d| pipeline::apply(d, &self.query))
    }

    /// Autocomplete over the full, unfiltered collection.
    pub fn suggestions(&self, text: &str) -> Vec<&str> {
        self.doctors()
            .map(|d| suggest::suggest(d, text))
            .unwrap_or_default()
    }

    pub fn available_specialties(&self) -> Vec<&str> {
        self.doctors()
            .map(suggest::available_specialties)
            .unwrap_or_default()
    }

    /// In-memory doctor for handing to a details view without reloading.
    pub fn find(&self, id: u64) -> Option<&Doctor> {
        self.doctors()?.iter().find(|d| d.id == id)
    }

    fn publish(&mut self, next: QueryState) {
        let query = url_codec::to_query_string(&next);
        debug!(%query, "replacing location query");
        self.location.replace_query(&query);
        self.query = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{ConsultationFilter, SortKey};

    fn doctors() -> Vec<Doctor> {
        vec![
            Doctor {
                id: 1,
                name: "Dr. Asha Rao".into(),
                fee_amount: 500,
                specialties: vec!["Dentist".into()],
                ..Default::default()
            },
            Doctor {
                id: 2,
                name: "Dr. Vikram Mehta".into(),
                fee_amount: 300,
                specialties: vec!["ENT".into()],
                ..Default::default()
            },
        ]
    }

    fn ready_session(query: &str) -> Session<MemoryLocation> {
        let mut session = Session::new(MemoryLocation::new("/", query));
        let ticket = session.begin_load();
        assert!(session.finish_load(ticket, Ok::<_, String>(doctors())));
        session
    }

    #[test]
    fn state_is_restored_from_location() {
        let session = Session::new(MemoryLocation::new("/", "?sort=fees&specialty=ENT"));
        assert_eq!(session.query().sort, SortKey::Fee);
        assert!(session.query().specialties.contains("ENT"));
    }

    #[test]
    fn visible_is_none_until_loaded() {
        let mut session = Session::new(MemoryLocation::default());
        assert!(session.visible().is_none());
        let _ticket = session.begin_load();
        assert!(session.load_state().is_loading());
        assert!(session.visible().is_none());
        assert!(session.suggestions("dr").is_empty());
    }

    #[test]
    fn updates_replace_history_instead_of_pushing() {
        let mut session = ready_session("");
        session.update(QueryUpdate::sort(SortKey::Fee));
        session.update(QueryUpdate::search("rao"));
        session.toggle_specialty("Dentist");
        assert_eq!(session.location().history_len(), 1);
        assert_eq!(
            session.location().href(),
            "/?search=rao&specialty=Dentist&sort=fees"
        );
    }

    #[test]
    fn visible_tracks_query() {
        let mut session = ready_session("");
        session.update(QueryUpdate::sort(SortKey::Fee));
        let ids: Vec<u64> = session.visible().unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 1]);

        session.update(QueryUpdate::consultation(ConsultationFilter::InClinic));
        assert!(session.visible().unwrap().is_empty());
    }

    #[test]
    fn suggestions_ignore_active_filters() {
        let mut session = ready_session("");
        session.toggle_specialty("ENT");
        assert_eq!(session.suggestions("asha"), vec!["Dr. Asha Rao"]);
    }

    #[test]
    fn back_navigation_restores_previous_query() {
        let mut session = ready_session("sort=fees");
        session.location.push_query("sort=experience");
        assert!(session.sync_from_location());
        assert_eq!(session.query().sort, SortKey::Experience);

        assert!(session.location.back());
        assert!(session.sync_from_location());
        assert_eq!(session.query().sort, SortKey::Fee);
        assert!(!session.sync_from_location());

        assert!(session.location.forward());
        assert!(session.sync_from_location());
        assert_eq!(session.query().sort, SortKey::Experience);
        assert!(!session.location.forward());
    }

    #[test]
    fn stale_load_results_are_discarded() {
        let mut session = Session::new(MemoryLocation::default());
        let first = session.begin_load();
        let second = session.begin_load();

        assert!(session.finish_load(second, Ok::<_, String>(doctors())));
        assert!(!session.finish_load(first, Ok::<_, String>(Vec::new())));
        assert_eq!(session.doctors().map(<[Doctor]>::len), Some(2));
    }

    #[test]
    fn failed_load_is_reported() {
        let mut session = Session::new(MemoryLocation::default());
        let ticket = session.begin_load();
        assert!(session.finish_load(ticket, Err::<Vec<Doctor>, _>("directory data unavailable")));
        assert!(matches!(session.load_state(), LoadState::Failed(msg) if msg == "directory data unavailable"));
        assert!(session.visible().is_none());
    }

    #[test]
    fn find_uses_loaded_collection() {
        let session = ready_session("");
        assert_eq!(session.find(2).map(|d| d.name.as_str()), Some("Dr. Vikram Mehta"));
        assert!(session.find(99).is_none());
        assert_eq!(session.available_specialties(), vec!["Dentist", "ENT"]);
    }
}
