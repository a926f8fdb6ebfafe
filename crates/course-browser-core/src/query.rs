// SPDX-License-Identifier: AGPL-3.0
// Course Browser Core - Dashboard query
//
// Pure transformation from (catalog, selection) to the list the dashboard
// renders. Runs on every keystroke and must never block or do I/O.

use crate::selection::SelectionState;
use crate::types::{CategoryMatch, Course, Level, SortKey, TabKey};
use std::cmp::Ordering;

/// Message shown when a query yields nothing
pub const EMPTY_RESULT_MESSAGE: &str = "Geen cursussen gevonden.";

/// Knobs for the query behaviours that changed between app revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPolicy {
    /// Category matching mode (default: any selected category)
    pub category_match: CategoryMatch,
    /// Sort by popularity whenever the "populair" tab is active,
    /// regardless of the chosen sort key
    pub popular_forces_sort: bool,
    /// Minimum views for the "populair" tab to admit a course.
    /// None admits every course.
    pub popular_min_views: Option<u64>,
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self {
            category_match: CategoryMatch::Any,
            popular_forces_sort: true,
            popular_min_views: None,
        }
    }
}

/// Compute the ordered list of courses to display.
///
/// Stages run in a fixed order: tab filter, category filter, title search,
/// then a stable sort. The result only ever contains references into
/// `courses`, each at most once per occurrence in the input.
pub fn compute_view<'a>(
    courses: &'a [Course],
    state: &SelectionState,
    policy: &QueryPolicy,
) -> Vec<&'a Course> {
    let needle = state.search_text().trim().to_lowercase();

    let mut view: Vec<&Course> = courses
        .iter()
        .filter(|course| matches_tabs(course, state, policy))
        .filter(|course| matches_categories(course, state, policy.category_match))
        .filter(|course| needle.is_empty() || course.title.to_lowercase().contains(&needle))
        .collect();

    let sort_by = effective_sort(state, policy);
    view.sort_by(|a, b| compare(a, b, sort_by));

    tracing::debug!(
        "Computed view: {} of {} courses, sorted by {}",
        view.len(),
        courses.len(),
        sort_by.as_str()
    );
    view
}

/// Sort key actually applied for this selection
pub fn effective_sort(state: &SelectionState, policy: &QueryPolicy) -> SortKey {
    if policy.popular_forces_sort && state.has_tab(TabKey::Populair) {
        SortKey::Populariteit
    } else {
        state.sort_by()
    }
}

fn matches_tabs(course: &Course, state: &SelectionState, policy: &QueryPolicy) -> bool {
    if state.has_tab(TabKey::All) {
        return true;
    }

    state.active_tabs().iter().any(|tab| match tab {
        TabKey::All => true,
        TabKey::Beginner => course.level == Level::Beginner,
        TabKey::Gevorderd => course.level == Level::Gevorderd,
        TabKey::Populair => policy
            .popular_min_views
            .map_or(true, |min_views| course.views >= min_views),
        TabKey::Favorieten => state.is_favorite(&course.id),
    })
}

fn matches_categories(course: &Course, state: &SelectionState, mode: CategoryMatch) -> bool {
    let selected = state.categories();
    if selected.is_empty() {
        return true;
    }

    let has = |category: &String| course.categories.contains(category);
    match mode {
        CategoryMatch::Any => selected.iter().any(has),
        CategoryMatch::All => selected.iter().all(has),
    }
}

fn compare(a: &Course, b: &Course, sort_by: SortKey) -> Ordering {
    match sort_by {
        SortKey::Populariteit => b.views.cmp(&a.views),
        SortKey::Rating => b.rating.total_cmp(&a.rating),
        SortKey::Duur => a.duration.total_cmp(&b.duration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, title: &str, level: Level, views: u64) -> Course {
        Course {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            level,
            duration: 0.0,
            views,
            rating: 0.0,
            categories: Vec::new(),
            video_url: None,
            image_url: String::new(),
            goals: Vec::new(),
            members: None,
        }
    }

    fn scenario_catalog() -> Vec<Course> {
        let mut intro = course("1", "Intro to X", Level::Beginner, 10);
        intro.rating = 4.0;
        intro.duration = 30.0;
        intro.categories = vec!["A".to_string()];

        let mut advanced = course("2", "Advanced Y", Level::Gevorderd, 50);
        advanced.rating = 3.0;
        advanced.duration = 60.0;
        advanced.categories = vec!["B".to_string()];

        vec![intro, advanced]
    }

    fn ids(view: &[&Course]) -> Vec<String> {
        view.iter().map(|course| course.id.clone()).collect()
    }

    #[test]
    fn test_beginner_tab_scenario() {
        let catalog = scenario_catalog();
        let mut state = SelectionState::new();
        state.set_active_tabs([TabKey::Beginner]);

        let view = compute_view(&catalog, &state, &QueryPolicy::default());
        assert_eq!(ids(&view), vec!["1"]);
    }

    #[test]
    fn test_search_scenario() {
        let catalog = scenario_catalog();
        let mut state = SelectionState::new();
        state.set_search_text("advanced");

        let view = compute_view(&catalog, &state, &QueryPolicy::default());
        assert_eq!(ids(&view), vec!["2"]);
    }

    #[test]
    fn test_search_is_trimmed_and_case_insensitive() {
        let catalog = scenario_catalog();
        let mut state = SelectionState::new();
        state.set_search_text("  INTRO ");
        assert_eq!(
            ids(&compute_view(&catalog, &state, &QueryPolicy::default())),
            vec!["1"]
        );

        state.set_search_text("   ");
        assert_eq!(
            compute_view(&catalog, &state, &QueryPolicy::default()).len(),
            2
        );
    }

    #[test]
    fn test_favorites_tab_scenario() {
        let catalog = scenario_catalog();
        let mut state = SelectionState::new();
        state.toggle_favorite("2");
        state.set_active_tabs([TabKey::Favorieten]);

        let view = compute_view(&catalog, &state, &QueryPolicy::default());
        assert_eq!(ids(&view), vec!["2"]);
    }

    #[test]
    fn test_all_tab_keeps_catalog() {
        let catalog = scenario_catalog();
        let mut state = SelectionState::new();
        state.set_sort_by(SortKey::Duur);

        let view = compute_view(&catalog, &state, &QueryPolicy::default());
        assert_eq!(ids(&view), vec!["1", "2"]);
    }

    #[test]
    fn test_tabs_widen_the_result() {
        let catalog = scenario_catalog();
        let mut state = SelectionState::new();
        state.set_active_tabs([TabKey::Beginner, TabKey::Gevorderd]);
        state.set_sort_by(SortKey::Duur);

        let view = compute_view(&catalog, &state, &QueryPolicy::default());
        assert_eq!(ids(&view), vec!["1", "2"]);
    }

    #[test]
    fn test_popularity_sort_is_stable() {
        let catalog = vec![
            course("a", "A", Level::Beginner, 5),
            course("b", "B", Level::Beginner, 20),
            course("c", "C", Level::Beginner, 1),
            course("d", "D", Level::Beginner, 20),
        ];
        let state = SelectionState::new();

        let view = compute_view(&catalog, &state, &QueryPolicy::default());
        assert_eq!(ids(&view), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_rating_and_duration_sort() {
        let catalog = scenario_catalog();
        let mut state = SelectionState::new();

        state.set_sort_by(SortKey::Rating);
        assert_eq!(
            ids(&compute_view(&catalog, &state, &QueryPolicy::default())),
            vec!["1", "2"]
        );

        state.set_sort_by(SortKey::Duur);
        assert_eq!(
            ids(&compute_view(&catalog, &state, &QueryPolicy::default())),
            vec!["1", "2"]
        );

        state.set_sort_by(SortKey::Populariteit);
        assert_eq!(
            ids(&compute_view(&catalog, &state, &QueryPolicy::default())),
            vec!["2", "1"]
        );
    }

    #[test]
    fn test_nan_rating_does_not_panic() {
        let mut catalog = scenario_catalog();
        catalog[0].rating = f64::NAN;
        let mut state = SelectionState::new();
        state.set_sort_by(SortKey::Rating);

        let view = compute_view(&catalog, &state, &QueryPolicy::default());
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_popular_tab_overrides_sort() {
        let catalog = scenario_catalog();
        let mut state = SelectionState::new();
        state.set_active_tabs([TabKey::Populair]);
        state.set_sort_by(SortKey::Duur);

        let view = compute_view(&catalog, &state, &QueryPolicy::default());
        assert_eq!(ids(&view), vec!["2", "1"]);

        let policy = QueryPolicy {
            popular_forces_sort: false,
            ..QueryPolicy::default()
        };
        let view = compute_view(&catalog, &state, &policy);
        assert_eq!(ids(&view), vec!["1", "2"]);
    }

    #[test]
    fn test_popular_min_views_threshold() {
        let catalog = scenario_catalog();
        let mut state = SelectionState::new();
        state.set_active_tabs([TabKey::Populair]);

        let policy = QueryPolicy {
            popular_min_views: Some(20),
            ..QueryPolicy::default()
        };
        assert_eq!(ids(&compute_view(&catalog, &state, &policy)), vec!["2"]);
    }

    #[test]
    fn test_category_match_modes() {
        let mut catalog = scenario_catalog();
        catalog[1].categories.push("A".to_string());

        let mut state = SelectionState::new();
        state.set_sort_by(SortKey::Duur);
        state.toggle_category("A");
        state.toggle_category("B");

        let any = compute_view(&catalog, &state, &QueryPolicy::default());
        assert_eq!(ids(&any), vec!["1", "2"]);

        let policy = QueryPolicy {
            category_match: CategoryMatch::All,
            ..QueryPolicy::default()
        };
        let all = compute_view(&catalog, &state, &policy);
        assert_eq!(ids(&all), vec!["2"]);
    }

    #[test]
    fn test_view_is_a_subset_without_duplicates() {
        let catalog = scenario_catalog();
        let mut state = SelectionState::new();
        state.set_active_tabs([TabKey::Beginner, TabKey::Populair, TabKey::Favorieten]);
        state.toggle_favorite("1");

        let view = compute_view(&catalog, &state, &QueryPolicy::default());
        assert_eq!(view.len(), 2);
        for course in &view {
            assert_eq!(
                view.iter().filter(|c| std::ptr::eq(**c, *course)).count(),
                1
            );
            assert!(catalog.iter().any(|c| std::ptr::eq(c, *course)));
        }
    }

    #[test]
    fn test_empty_catalog() {
        let state = SelectionState::new();
        assert!(compute_view(&[], &state, &QueryPolicy::default()).is_empty());
    }
}
