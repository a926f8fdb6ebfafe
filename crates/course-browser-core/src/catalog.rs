// SPDX-License-Identifier: AGPL-3.0
// Course Browser Core - Course catalog
//
// The catalog is loaded once per session and never changes afterwards.
// Shape problems degrade to an empty (or shorter) catalog instead of failing.

use crate::types::{AppError, Course, Level};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Shown by frontends when a detail lookup misses
pub const COURSE_NOT_FOUND_MESSAGE: &str = "Cursus niet gevonden.";

/// Shown by frontends for a course without learning goals
pub const NO_GOALS_MESSAGE: &str = "Geen leerdoelen beschikbaar.";

/// Ordered, read-only sequence of courses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self, AppError> {
        tracing::info!("Loading catalog from {:?}", path);
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::FileIo(format!("Failed to read catalog: {}", e)))?;
        Self::from_json_str(&content)
    }

    /// Parse a catalog document. Invalid JSON is an error, a valid document
    /// of the wrong shape is an empty catalog.
    pub fn from_json_str(content: &str) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| AppError::Serialization(format!("Failed to parse catalog: {}", e)))?;
        Ok(Self::from_json_value(value))
    }

    /// Build a catalog from an already parsed document
    pub fn from_json_value(value: Value) -> Self {
        let Value::Array(entries) = value else {
            tracing::warn!("Catalog is not a list of courses, using an empty catalog");
            return Self::default();
        };

        let total = entries.len();
        let courses: Vec<Course> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(course) => Some(course),
                Err(e) => {
                    tracing::warn!("Skipping catalog entry {}: {}", index, e);
                    None
                }
            })
            .collect();

        tracing::info!("Loaded {} of {} catalog entries", courses.len(), total);
        Self { courses }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Find a course by identifier. Identifiers compare by their text form,
    /// so `1` and `"1"` refer to the same course.
    pub fn find(&self, id: &str) -> Option<&Course> {
        let id = id.trim();
        self.courses.iter().find(|course| course.id == id)
    }

    /// Most viewed courses, catalog order on ties
    pub fn popular(&self, limit: usize) -> Vec<&Course> {
        let mut courses: Vec<&Course> = self.courses.iter().collect();
        courses.sort_by(|a, b| b.views.cmp(&a.views));
        courses.truncate(limit);
        courses
    }

    /// Distinct category tags, sorted
    pub fn categories(&self) -> Vec<&str> {
        self.courses
            .iter()
            .flat_map(|course| course.categories.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Aggregate figures for the statistics panel
    pub fn statistics(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            course_count: self.courses.len(),
            ..CatalogStats::default()
        };

        let mut rating_sum = 0.0;
        let mut rated = 0usize;
        for course in &self.courses {
            stats.total_views = stats.total_views.saturating_add(course.views);
            stats.total_members = stats
                .total_members
                .saturating_add(course.members.unwrap_or(0));
            if course.rating.is_finite() {
                rating_sum += course.rating;
                rated += 1;
            }
            match course.level {
                Level::Beginner => stats.beginner_count += 1,
                Level::Gevorderd => stats.gevorderd_count += 1,
                Level::Other(_) => stats.other_level_count += 1,
            }
        }

        if rated > 0 {
            stats.average_rating = Some(rating_sum / rated as f64);
        }
        stats
    }
}

/// Catalog-wide counters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogStats {
    pub course_count: usize,
    pub total_views: u64,
    pub total_members: u64,
    /// None for an empty catalog
    pub average_rating: Option<f64>,
    pub beginner_count: usize,
    pub gevorderd_count: usize,
    pub other_level_count: usize,
}

/// Result of opening the detail view for a course id
#[derive(Debug, Clone, PartialEq)]
pub enum CourseDetail<'a> {
    Found(&'a Course),
    NotFound { id: String },
}

impl<'a> CourseDetail<'a> {
    pub fn lookup(catalog: &'a Catalog, id: &str) -> Self {
        match catalog.find(id) {
            Some(course) => Self::Found(course),
            None => {
                tracing::info!("Course {} not found in catalog", id);
                Self::NotFound { id: id.to_string() }
            }
        }
    }

    pub fn course(&self) -> Option<&'a Course> {
        match *self {
            Self::Found(course) => Some(course),
            Self::NotFound { .. } => None,
        }
    }

    /// Goal lines to render, with the placeholder for courses without goals
    pub fn goal_lines(&self) -> Vec<&'a str> {
        match *self {
            Self::Found(course) if !course.goals.is_empty() => {
                course.goals.iter().map(String::as_str).collect()
            }
            Self::Found(_) => vec![NO_GOALS_MESSAGE],
            Self::NotFound { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Catalog {
        Catalog::from_json_value(json!([
            {"id": 1, "title": "Intro to X", "level": "Beginner", "views": 10, "rating": 4.0,
             "duration": 30, "categories": ["A"], "members": 12, "goals": ["Leer X"]},
            {"id": 2, "title": "Advanced Y", "level": "Gevorderd", "views": 50, "rating": 3.0,
             "duration": 60, "categories": ["B", "A"]},
            {"id": "3", "title": "Z Masterclass", "level": "Expert", "views": 50, "rating": 5.0,
             "duration": 90, "categories": []}
        ]))
    }

    #[test]
    fn test_non_array_document_is_empty() {
        assert!(Catalog::from_json_value(json!({"courses": []})).is_empty());
        assert!(Catalog::from_json_value(Value::Null).is_empty());
        assert!(Catalog::from_json_str("\"hello\"").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Catalog::from_json_str("[{"),
            Err(AppError::Serialization(_))
        ));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let catalog = Catalog::from_json_value(json!([
            {"id": 1, "title": "Ok", "level": "Beginner"},
            {"title": "No id", "level": "Beginner"},
            42
        ]));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.courses()[0].title, "Ok");
    }

    #[test]
    fn test_find_matches_numeric_and_text_ids() {
        let catalog = sample();
        assert_eq!(catalog.find("1").unwrap().title, "Intro to X");
        assert_eq!(catalog.find("3").unwrap().title, "Z Masterclass");
        assert!(catalog.find("99").is_none());
    }

    #[test]
    fn test_detail_lookup() {
        let catalog = sample();

        let found = CourseDetail::lookup(&catalog, "1");
        assert_eq!(found.course().map(|c| c.id.as_str()), Some("1"));
        assert_eq!(found.goal_lines(), vec!["Leer X"]);

        let no_goals = CourseDetail::lookup(&catalog, "2");
        assert_eq!(no_goals.goal_lines(), vec![NO_GOALS_MESSAGE]);

        let missing = CourseDetail::lookup(&catalog, "404");
        assert_eq!(
            missing,
            CourseDetail::NotFound {
                id: "404".to_string()
            }
        );
        assert!(missing.goal_lines().is_empty());
    }

    #[test]
    fn test_popular_is_stable() {
        let catalog = sample();
        let ids: Vec<&str> = catalog.popular(2).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_categories_are_distinct_and_sorted() {
        assert_eq!(sample().categories(), vec!["A", "B"]);
    }

    #[test]
    fn test_statistics() {
        let stats = sample().statistics();
        assert_eq!(stats.course_count, 3);
        assert_eq!(stats.total_views, 110);
        assert_eq!(stats.total_members, 12);
        assert_eq!(stats.average_rating, Some(4.0));
        assert_eq!(stats.beginner_count, 1);
        assert_eq!(stats.gevorderd_count, 1);
        assert_eq!(stats.other_level_count, 1);

        let empty = Catalog::default().statistics();
        assert_eq!(empty.course_count, 0);
        assert_eq!(empty.average_rating, None);
    }

    #[test]
    fn test_statistics_saturate_on_huge_counts() {
        let catalog = Catalog::from_json_str(
            r#"[{"id": 1, "title": "A", "level": "Beginner", "views": 18446744073709551615,
                 "members": 18446744073709551615},
                {"id": 2, "title": "B", "level": "Beginner", "views": 18446744073709551615,
                 "members": 1}]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);

        let stats = catalog.statistics();
        assert_eq!(stats.total_views, u64::MAX);
        assert_eq!(stats.total_members, u64::MAX);
    }

    #[test]
    fn test_average_rating_skips_non_finite() {
        let mut courses = sample().courses().to_vec();
        courses[1].rating = f64::NAN;
        let stats = Catalog::new(courses).statistics();
        assert_eq!(stats.average_rating, Some(4.5));

        let mut unrated = sample().courses()[..1].to_vec();
        unrated[0].rating = f64::INFINITY;
        assert_eq!(Catalog::new(unrated).statistics().average_rating, None);
    }
}
