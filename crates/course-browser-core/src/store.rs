// SPDX-License-Identifier: AGPL-3.0
// Course Browser Core - Persistent selection store
//
// Owns the dashboard selection for one session. Each slice is restored on
// its own and written back on its own whenever it changes.

use crate::catalog::Catalog;
use crate::persist::PersistBridge;
use crate::query::{compute_view, QueryPolicy};
use crate::selection::{SelectionState, Slice};
use crate::storage::KeyValueStore;
use crate::types::{Course, SortKey, TabKey};
use serde::de::DeserializeOwned;

/// Selection state with write-behind persistence
pub struct SelectionStore {
    state: SelectionState,
    bridge: PersistBridge,
}

impl SelectionStore {
    /// Restore every persisted slice, falling back to that slice's default
    /// when the stored value is missing or unusable
    pub fn restore(bridge: PersistBridge) -> Self {
        let mut state = SelectionState::new();
        let storage = bridge.storage();

        if let Some(tabs) = load_slice::<Vec<TabKey>>(storage, Slice::ActiveTabs) {
            state.set_active_tabs(tabs);
        }
        if let Some(categories) = load_slice::<Vec<String>>(storage, Slice::Categories) {
            state.set_categories(categories);
        }
        if let Some(sort_by) = load_slice::<SortKey>(storage, Slice::SortBy) {
            state.set_sort_by(sort_by);
        }
        if let Some(favorites) = load_slice::<Vec<String>>(storage, Slice::Favorites) {
            state.set_favorites(favorites);
        }

        let tabs: Vec<&str> = state.active_tabs().iter().map(TabKey::as_str).collect();
        tracing::info!(
            "Restored selection: tabs [{}], {} categories, sort {}, {} favorites",
            tabs.join(", "),
            state.categories().len(),
            state.sort_by().as_str(),
            state.favorites().len()
        );

        Self { state, bridge }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Courses to display for the current selection
    pub fn view<'a>(&self, catalog: &'a Catalog, policy: &QueryPolicy) -> Vec<&'a Course> {
        compute_view(catalog.courses(), &self.state, policy)
    }

    pub fn set_active_tabs(&mut self, tabs: impl IntoIterator<Item = TabKey>) {
        if self.state.set_active_tabs(tabs) {
            self.persist(Slice::ActiveTabs);
        }
    }

    pub fn toggle_tab(&mut self, tab: TabKey) {
        if self.state.toggle_tab(tab) {
            self.persist(Slice::ActiveTabs);
        }
    }

    pub fn toggle_category(&mut self, category: &str) {
        if self.state.toggle_category(category) {
            self.persist(Slice::Categories);
        }
    }

    pub fn set_categories(&mut self, categories: impl IntoIterator<Item = String>) {
        if self.state.set_categories(categories) {
            self.persist(Slice::Categories);
        }
    }

    pub fn clear_categories(&mut self) {
        if self.state.clear_categories() {
            self.persist(Slice::Categories);
        }
    }

    pub fn set_sort_by(&mut self, sort_by: SortKey) {
        if self.state.set_sort_by(sort_by) {
            self.persist(Slice::SortBy);
        }
    }

    /// Session only, never persisted
    pub fn set_search_text(&mut self, text: &str) {
        self.state.set_search_text(text);
    }

    /// Returns whether the course is a favorite afterwards
    pub fn toggle_favorite(&mut self, course_id: &str) -> bool {
        let is_favorite = self.state.toggle_favorite(course_id);
        self.persist(Slice::Favorites);
        is_favorite
    }

    /// Defaults for everything but favorites; the stored values are
    /// overwritten by the resulting writes, not deleted
    pub fn reset(&mut self) {
        for slice in self.state.reset() {
            self.persist(slice);
        }
    }

    /// Wait for queued writes, e.g. before the process exits
    pub fn flush(&self) {
        self.bridge.flush();
    }

    fn persist(&self, slice: Slice) {
        let Some(key) = slice.storage_key() else {
            return;
        };

        let value = match slice {
            Slice::ActiveTabs => serde_json::to_string(self.state.active_tabs()),
            Slice::Categories => serde_json::to_string(self.state.categories()),
            Slice::SortBy => serde_json::to_string(&self.state.sort_by()),
            Slice::Favorites => serde_json::to_string(self.state.favorites()),
            Slice::SearchText => return,
        };

        match value {
            Ok(value) => self.bridge.schedule(key, value),
            Err(e) => tracing::error!("Failed to serialize {}: {}", key, e),
        }
    }
}

fn load_slice<T: DeserializeOwned>(storage: &dyn KeyValueStore, slice: Slice) -> Option<T> {
    let key = slice.storage_key()?;

    match storage.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring stored {}, using default: {}", key, e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Failed to read {}, using default: {}", key, e);
            None
        }
    }
}
