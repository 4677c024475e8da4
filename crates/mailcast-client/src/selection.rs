//! Ephemeral recipient selection: the set of application ids chosen for
//! the next campaign.
//!
//! Pure in-memory state with insertion order preserved; no network calls
//! and no persistence. Ids that belonged to a previously fetched page are
//! intentionally not pruned when filters change.

/// Set of application ids selected for a campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientSelection {
    ids: Vec<String>,
}

impl RecipientSelection {
    /// Create an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Flip membership of one application id.
    pub fn toggle(&mut self, application_id: &str) {
        if let Some(position) = self.ids.iter().position(|id| id == application_id) {
            self.ids.remove(position);
        } else {
            self.ids.push(application_id.to_string());
        }
    }

    /// Select-all checkbox semantics: when the selection already equals
    /// the full current page, clear it; otherwise replace the selection
    /// with the page.
    pub fn select_all(&mut self, page_ids: &[String]) {
        let page_selected = self.ids.len() == page_ids.len()
            && page_ids.iter().all(|id| self.contains(id));
        if page_selected {
            self.ids.clear();
        } else {
            self.ids = page_ids.to_vec();
        }
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Number of selected application ids.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True when the given application id is selected.
    #[must_use]
    pub fn contains(&self, application_id: &str) -> bool {
        self.ids.iter().any(|id| id == application_id)
    }

    /// Selected ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}
