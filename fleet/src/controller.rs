//! Debounced search controller.
//!
//! Keystrokes update the live search term immediately; the committed
//! ("debounced") term only changes once input has been quiet for the
//! configured delay. Committing a term re-parses it, mirrors it into the URL
//! state and records it in recent searches.
//!
//! Time is supplied by the caller as `Instant`s, so the controller needs no
//! timer thread: an event loop calls [`SearchController::poll`] on each tick,
//! and tests can step time deterministically.

use std::time::{Duration, Instant};

use crate::filter::SpecialFilter;
use crate::query::{parse_search, ParsedSearch};
use crate::store::Store;
use crate::url_state::UrlState;
use crate::{Config, Result};

/// Holds back a value until updates pause for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
    committed: T,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            committed: initial,
        }
    }

    /// Replace the pending value and restart the quiet period.
    pub fn set(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Commit the pending value if its quiet period has elapsed.
    ///
    /// Returns the newly committed value, or `None` when nothing is due or the
    /// value is unchanged.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        let due = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if due {
            self.flush()
        } else {
            None
        }
    }

    /// Commit the pending value immediately.
    pub fn flush(&mut self) -> Option<&T> {
        let (value, _) = self.pending.take()?;
        if value == self.committed {
            return None;
        }
        self.committed = value;
        Some(&self.committed)
    }

    /// Undo the last commit, putting that value back as pending.
    fn requeue(&mut self, previous: T, deadline: Instant) {
        let value = std::mem::replace(&mut self.committed, previous);
        self.pending = Some((value, deadline));
    }

    /// The last committed value.
    pub fn value(&self) -> &T {
        &self.committed
    }

    /// The value waiting for its quiet period, if any.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(value, _)| value)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}

/// Result of committing a search term.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchUpdate {
    pub parsed: ParsedSearch,
    /// URL query string after mirroring the term.
    pub query_string: String,
    /// Recent searches after recording the term (empty without a store).
    pub recent: Vec<String>,
}

/// Debounced search box state: live term, committed term, URL and history.
pub struct SearchController {
    debouncer: Debouncer<String>,
    url: UrlState,
    store: Option<Store>,
    parsed: ParsedSearch,
}

impl SearchController {
    /// Start from the search text already present in the URL.
    pub fn new(config: &Config, url: UrlState) -> Self {
        let initial = url.search().to_string();
        let parsed = parse_search(&initial);
        Self {
            debouncer: Debouncer::new(initial, config.debounce()),
            url,
            store: None,
            parsed,
        }
    }

    /// Record committed searches in this store's recent list.
    pub fn with_store(mut self, store: Store) -> Self {
        self.store = Some(store);
        self
    }

    /// What the user has typed, committed or not.
    pub fn search_term(&self) -> &str {
        self.debouncer
            .pending()
            .unwrap_or_else(|| self.debouncer.value())
    }

    /// The term filters are currently computed from.
    pub fn debounced_search_term(&self) -> &str {
        self.debouncer.value()
    }

    /// Parse of the committed term.
    pub fn parsed(&self) -> &ParsedSearch {
        &self.parsed
    }

    pub fn url_state(&self) -> &UrlState {
        &self.url
    }

    /// The special filter from the URL. Unknown names are an error.
    pub fn special_filter(&self) -> Result<Option<SpecialFilter>> {
        self.url.filter()
    }

    pub fn set_special_filter(&mut self, filter: Option<SpecialFilter>) {
        self.url.set_filter(filter);
    }

    /// Record a keystroke at `now`.
    pub fn set_search_term(&mut self, term: impl Into<String>, now: Instant) {
        self.debouncer.set(term.into(), now);
    }

    /// Commit the pending term if the debounce window has passed.
    pub fn poll(&mut self, now: Instant) -> Result<Option<SearchUpdate>> {
        let (previous, deadline) = self.rollback_point();
        match self.debouncer.poll(now).cloned() {
            Some(term) => self.commit(term, previous, deadline).map(Some),
            None => Ok(None),
        }
    }

    /// Commit the pending term now (e.g., the user pressed Enter).
    pub fn flush(&mut self) -> Result<Option<SearchUpdate>> {
        let (previous, deadline) = self.rollback_point();
        match self.debouncer.flush().cloned() {
            Some(term) => self.commit(term, previous, deadline).map(Some),
            None => Ok(None),
        }
    }

    fn rollback_point(&self) -> (String, Option<Instant>) {
        (self.debouncer.value().clone(), self.debouncer.deadline())
    }

    /// Record the term, then update parse and URL state.
    ///
    /// If recording fails the term goes back to pending and nothing else
    /// changes, so a later poll or flush retries it.
    fn commit(
        &mut self,
        term: String,
        previous: String,
        deadline: Option<Instant>,
    ) -> Result<SearchUpdate> {
        let recent = match &self.store {
            Some(store) => match store.push_recent_search(&term) {
                Ok(recent) => recent,
                Err(e) => {
                    if let Some(deadline) = deadline {
                        self.debouncer.requeue(previous, deadline);
                    }
                    return Err(e);
                }
            },
            None => Vec::new(),
        };

        self.parsed = parse_search(&term);
        self.url.set_search(&term);
        log::debug!("committed search {:?}", term);

        Ok(SearchUpdate {
            parsed: self.parsed.clone(),
            query_string: self.url.to_query_string(),
            recent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EquipmentType;
    use tempfile::TempDir;

    const MS: Duration = Duration::from_millis(1);

    fn controller() -> SearchController {
        SearchController::new(&Config::with_root("/tmp/plantview-test"), UrlState::default())
    }

    #[test]
    fn test_debouncer_waits_for_quiet_period() {
        let start = Instant::now();
        let mut d = Debouncer::new(String::new(), 300 * MS);

        d.set("p".to_string(), start);
        assert_eq!(d.poll(start + 299 * MS), None);
        assert_eq!(d.poll(start + 300 * MS).map(String::as_str), Some("p"));
        assert_eq!(d.value(), "p");
        assert!(d.pending().is_none());
    }

    #[test]
    fn test_debouncer_restarts_on_each_set() {
        let start = Instant::now();
        let mut d = Debouncer::new(0, 300 * MS);

        d.set(1, start);
        d.set(2, start + 200 * MS);
        assert_eq!(d.poll(start + 400 * MS), None);
        assert_eq!(d.deadline(), Some(start + 500 * MS));
        assert_eq!(d.poll(start + 500 * MS), Some(&2));
    }

    #[test]
    fn test_debouncer_unchanged_value_is_not_an_update() {
        let start = Instant::now();
        let mut d = Debouncer::new("pumps".to_string(), 300 * MS);
        d.set("pumps".to_string(), start);
        assert_eq!(d.poll(start + 300 * MS), None);
        assert!(d.pending().is_none());
    }

    #[test]
    fn test_rapid_typing_commits_once_with_last_value() {
        let start = Instant::now();
        let mut c = controller();

        let mut commits = Vec::new();
        for (i, term) in ["p", "pu", "pum", "pump", "pumps"].iter().enumerate() {
            let now = start + (i as u32 * 50) * MS;
            c.set_search_term(*term, now);
            if let Some(update) = c.poll(now).unwrap() {
                commits.push(update);
            }
            assert_eq!(c.search_term(), *term);
            assert_eq!(c.debounced_search_term(), "");
        }

        let mut tick = start + 200 * MS;
        while tick <= start + 1000 * MS {
            if let Some(update) = c.poll(tick).unwrap() {
                commits.push(update);
            }
            tick += 10 * MS;
        }

        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].parsed.original_term, "pumps");
        assert_eq!(commits[0].parsed.filters.equipment_type, Some(EquipmentType::Pump));
        assert_eq!(c.debounced_search_term(), "pumps");
        assert_eq!(c.url_state().search(), "pumps");
    }

    #[test]
    fn test_initial_term_from_url() {
        let c = SearchController::new(
            &Config::with_root("/tmp/plantview-test"),
            UrlState::parse("search=offline%20valves"),
        );
        assert_eq!(c.debounced_search_term(), "offline valves");
        assert_eq!(c.parsed().filters.equipment_type, Some(EquipmentType::Valve));
    }

    #[test]
    fn test_clearing_search_removes_url_param() {
        let mut c = SearchController::new(
            &Config::with_root("/tmp/plantview-test"),
            UrlState::parse("search=pumps&filter=no-parts-activity"),
        );
        c.set_search_term("", Instant::now());
        let update = c.flush().unwrap().unwrap();
        assert_eq!(update.query_string, "filter=no-parts-activity");
        assert!(update.parsed.filters.is_empty());
    }

    #[test]
    fn test_commit_records_recent_searches() {
        let tmp = TempDir::new().unwrap();
        let config = Config::with_root(tmp.path());
        let store = Store::open(config.clone()).unwrap();
        let mut c = SearchController::new(&config, UrlState::default()).with_store(store);

        let start = Instant::now();
        c.set_search_term("pumps", start);
        c.poll(start + 300 * MS).unwrap();
        c.set_search_term("valves", start + 400 * MS);
        let update = c.flush().unwrap().unwrap();

        assert_eq!(update.recent, vec!["valves".to_string(), "pumps".to_string()]);

        let reopened = Store::open(config).unwrap();
        assert_eq!(reopened.recent_searches().unwrap(), update.recent);
    }

    #[test]
    fn test_failed_recent_write_leaves_state_unchanged() {
        let tmp = TempDir::new().unwrap();
        let config = Config::with_root(tmp.path());
        let store = Store::open(config.clone()).unwrap();
        let recent_path = config.storage_path(crate::store::RECENT_SEARCHES_KEY);
        std::fs::write(&recent_path, b"not json").unwrap();

        let mut c = SearchController::new(&config, UrlState::parse("search=valves"))
            .with_store(store);
        c.set_search_term("pumps", Instant::now());

        assert!(c.flush().is_err());
        assert_eq!(c.debounced_search_term(), "valves");
        assert_eq!(c.parsed().original_term, "valves");
        assert_eq!(c.url_state().search(), "valves");
        assert_eq!(c.search_term(), "pumps");

        std::fs::remove_file(&recent_path).unwrap();
        let update = c.flush().unwrap().unwrap();
        assert_eq!(update.parsed.original_term, "pumps");
        assert_eq!(update.recent, vec!["pumps".to_string()]);
        assert_eq!(c.url_state().search(), "pumps");
    }

    #[test]
    fn test_special_filter_roundtrip() {
        let mut c = controller();
        assert_eq!(c.special_filter().unwrap(), None);
        c.set_special_filter(Some(SpecialFilter::NoPartsActivity));
        assert_eq!(c.special_filter().unwrap(), Some(SpecialFilter::NoPartsActivity));
        assert_eq!(c.url_state().to_query_string(), "filter=no-parts-activity");
    }
}
