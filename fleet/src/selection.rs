//! Asset selection for bulk actions.

/// Selected asset ids, kept in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Add `id` if not already selected. Returns whether it was added.
    pub fn select(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Remove `id`. Returns whether it was selected.
    pub fn deselect(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|s| s != id);
        self.ids.len() != before
    }

    /// Flip `id`; returns the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.deselect(id) {
            false
        } else {
            self.select(id)
        }
    }

    /// Select every id (e.g., all assets currently shown).
    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        for id in ids {
            self.select(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop selections that are no longer visible after re-filtering.
    pub fn retain_visible<'a>(&mut self, visible: impl IntoIterator<Item = &'a str>) {
        let visible: Vec<&str> = visible.into_iter().collect();
        self.ids.retain(|id| visible.contains(&id.as_str()));
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut s = Selection::new();
        assert!(s.toggle("AST-001"));
        assert!(s.is_selected("AST-001"));
        assert!(!s.toggle("AST-001"));
        assert!(s.is_empty());
    }

    #[test]
    fn test_select_is_idempotent_and_ordered() {
        let mut s = Selection::new();
        s.select("AST-003");
        s.select("AST-001");
        assert!(!s.select("AST-003"));
        assert_eq!(s.ids(), &["AST-003".to_string(), "AST-001".to_string()]);
    }

    #[test]
    fn test_select_all_and_retain_visible() {
        let mut s = Selection::new();
        s.select_all(["AST-001", "AST-002", "AST-003"]);
        assert_eq!(s.len(), 3);

        s.retain_visible(["AST-002", "AST-009"]);
        assert_eq!(s.ids(), &["AST-002".to_string()]);

        s.clear();
        assert!(s.is_empty());
    }
}
