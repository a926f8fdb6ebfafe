// SPDX-License-Identifier: AGPL-3.0
// Course Browser Core - Dashboard selection state
//
// Plain data plus the mutators the dashboard calls in response to user
// gestures. Persistence lives in `store.rs`; this type never does I/O.

use crate::types::{SortKey, TabKey};
use std::collections::BTreeSet;

/// One independently persisted part of the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    ActiveTabs,
    Categories,
    SortBy,
    SearchText,
    Favorites,
}

impl Slice {
    /// Storage key, or None for session-only slices
    pub fn storage_key(&self) -> Option<&'static str> {
        match self {
            Self::ActiveTabs => Some("courses.activeTabs"),
            Self::Categories => Some("courses.selectedCategories"),
            Self::SortBy => Some("courses.sortBy"),
            Self::Favorites => Some("courses.favorites"),
            Self::SearchText => None,
        }
    }
}

/// Filter, sort, search and favorites chosen on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    active_tabs: BTreeSet<TabKey>,
    categories: BTreeSet<String>,
    sort_by: SortKey,
    search_text: String,
    favorites: BTreeSet<String>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            active_tabs: default_tabs(),
            categories: BTreeSet::new(),
            sort_by: SortKey::default(),
            search_text: String::new(),
            favorites: BTreeSet::new(),
        }
    }
}

fn default_tabs() -> BTreeSet<TabKey> {
    BTreeSet::from([TabKey::All])
}

/// Enforce the tab invariant: never empty, and "all" only on its own
pub fn normalize_tabs(tabs: impl IntoIterator<Item = TabKey>) -> BTreeSet<TabKey> {
    let tabs: BTreeSet<TabKey> = tabs.into_iter().collect();
    if tabs.is_empty() || tabs.contains(&TabKey::All) {
        default_tabs()
    } else {
        tabs
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tabs(&self) -> &BTreeSet<TabKey> {
        &self.active_tabs
    }

    pub fn has_tab(&self, tab: TabKey) -> bool {
        self.active_tabs.contains(&tab)
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn sort_by(&self) -> SortKey {
        self.sort_by
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn favorites(&self) -> &BTreeSet<String> {
        &self.favorites
    }

    pub fn is_favorite(&self, course_id: &str) -> bool {
        self.favorites.contains(course_id)
    }

    /// Replace the active tabs. Returns whether anything changed.
    pub fn set_active_tabs(&mut self, tabs: impl IntoIterator<Item = TabKey>) -> bool {
        let tabs = normalize_tabs(tabs);
        if tabs == self.active_tabs {
            return false;
        }
        self.active_tabs = tabs;
        true
    }

    /// Multi-select toggle as done by the filter menu
    pub fn toggle_tab(&mut self, tab: TabKey) -> bool {
        let mut tabs = self.active_tabs.clone();
        if tab == TabKey::All {
            tabs = default_tabs();
        } else if !tabs.remove(&tab) {
            tabs.remove(&TabKey::All);
            tabs.insert(tab);
        }
        self.set_active_tabs(tabs)
    }

    pub fn toggle_category(&mut self, category: &str) -> bool {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_string());
        }
        true
    }

    pub fn set_categories(&mut self, categories: impl IntoIterator<Item = String>) -> bool {
        let categories: BTreeSet<String> = categories.into_iter().collect();
        if categories == self.categories {
            return false;
        }
        self.categories = categories;
        true
    }

    pub fn clear_categories(&mut self) -> bool {
        self.set_categories(std::iter::empty::<String>())
    }

    pub fn set_sort_by(&mut self, sort_by: SortKey) -> bool {
        if sort_by == self.sort_by {
            return false;
        }
        self.sort_by = sort_by;
        true
    }

    pub fn set_search_text(&mut self, text: &str) -> bool {
        if text == self.search_text {
            return false;
        }
        self.search_text = text.to_string();
        true
    }

    /// Add the course to favorites if absent, remove it if present.
    /// Returns whether the course is a favorite afterwards.
    pub fn toggle_favorite(&mut self, course_id: &str) -> bool {
        if self.favorites.remove(course_id) {
            false
        } else {
            self.favorites.insert(course_id.to_string());
            true
        }
    }

    pub fn set_favorites(&mut self, favorites: impl IntoIterator<Item = String>) {
        self.favorites = favorites.into_iter().collect();
    }

    /// Back to defaults for every slice except favorites.
    /// Returns the slices that changed.
    pub fn reset(&mut self) -> Vec<Slice> {
        let defaults = Self::default();
        let mut changed = Vec::new();

        if self.active_tabs != defaults.active_tabs {
            changed.push(Slice::ActiveTabs);
        }
        if self.categories != defaults.categories {
            changed.push(Slice::Categories);
        }
        if self.sort_by != defaults.sort_by {
            changed.push(Slice::SortBy);
        }
        if self.search_text != defaults.search_text {
            changed.push(Slice::SearchText);
        }

        self.active_tabs = defaults.active_tabs;
        self.categories = defaults.categories;
        self.sort_by = defaults.sort_by;
        self.search_text = defaults.search_text;
        changed
    }

    /// Heading shown above the course list
    pub fn section_title(&self) -> String {
        self.active_tabs
            .iter()
            .map(TabKey::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
