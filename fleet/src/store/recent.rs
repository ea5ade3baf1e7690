//! Recent search storage.

use super::{Store, RECENT_SEARCHES_KEY};
use crate::Result;

/// Put `term` at the front of `recent`, dropping older copies and trimming to `limit`.
///
/// Blank terms leave the list untouched.
pub fn push_recent(recent: &[String], term: &str, limit: usize) -> Vec<String> {
    let term = term.trim();
    if term.is_empty() {
        return recent.iter().take(limit).cloned().collect();
    }

    std::iter::once(term.to_string())
        .chain(recent.iter().filter(|r| r.as_str() != term).cloned())
        .take(limit)
        .collect()
}

impl Store {
    /// Recent searches, most recent first.
    pub fn recent_searches(&self) -> Result<Vec<String>> {
        Ok(self.get(RECENT_SEARCHES_KEY)?.unwrap_or_default())
    }

    /// Record a committed search and return the updated list.
    pub fn push_recent_search(&self, term: &str) -> Result<Vec<String>> {
        let current = self.recent_searches()?;
        let updated = push_recent(&current, term, self.config.recent_search_limit);
        if updated != current {
            self.set(RECENT_SEARCHES_KEY, &updated)?;
            log::info!("recorded recent search {:?}", term.trim());
        }
        Ok(updated)
    }

    /// Forget all recent searches. Returns how many were removed.
    pub fn clear_recent_searches(&self) -> Result<usize> {
        let count = self.recent_searches()?.len();
        self.remove(RECENT_SEARCHES_KEY)?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use tempfile::TempDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_push_recent_most_recent_first() {
        let recent = strings(&["valves", "pumps"]);
        assert_eq!(
            push_recent(&recent, "motors", 5),
            strings(&["motors", "valves", "pumps"])
        );
    }

    #[test]
    fn test_push_recent_deduplicates() {
        let recent = strings(&["valves", "pumps", "motors"]);
        assert_eq!(
            push_recent(&recent, "  pumps ", 5),
            strings(&["pumps", "valves", "motors"])
        );
    }

    #[test]
    fn test_push_recent_caps_length() {
        let recent = strings(&["a", "b", "c", "d", "e"]);
        let updated = push_recent(&recent, "f", 5);
        assert_eq!(updated, strings(&["f", "a", "b", "c", "d"]));
    }

    #[test]
    fn test_push_recent_ignores_blank() {
        let recent = strings(&["a"]);
        assert_eq!(push_recent(&recent, "   ", 5), recent);
    }

    #[test]
    fn test_push_recent_is_case_sensitive() {
        let recent = strings(&["Pumps"]);
        assert_eq!(push_recent(&recent, "pumps", 5), strings(&["pumps", "Pumps"]));
    }

    #[test]
    fn test_store_recent_searches_persist() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(Config::with_root(tmp.path())).unwrap();

        assert!(store.recent_searches().unwrap().is_empty());
        for term in ["one", "two", "three", "four", "five", "six", "two"] {
            store.push_recent_search(term).unwrap();
        }

        let reopened = Store::open(Config::with_root(tmp.path())).unwrap();
        assert_eq!(
            reopened.recent_searches().unwrap(),
            strings(&["two", "six", "five", "four", "three"])
        );

        assert_eq!(reopened.clear_recent_searches().unwrap(), 5);
        assert!(reopened.recent_searches().unwrap().is_empty());
    }
}
