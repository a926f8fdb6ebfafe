// SPDX-License-Identifier: AGPL-3.0
// Course Browser Core - Shared logic for all frontends
//
// This crate provides:
// - Course, TabKey, SortKey and AppError types
// - Catalog loading, detail lookup and statistics
// - The dashboard query (filter, search, sort)
// - SelectionStore for persistent dashboard selection
// - Storage backends and the media link launcher
//
// Frontend-specific code lives in separate crates.

pub mod catalog;
pub mod launcher;
pub mod persist;
pub mod query;
pub mod selection;
pub mod storage;
pub mod store;
pub mod types;

// Re-export commonly used items
pub use catalog::{Catalog, CatalogStats, CourseDetail, COURSE_NOT_FOUND_MESSAGE, NO_GOALS_MESSAGE};
pub use launcher::{open_course_media, LinkLauncher, MediaOutcome, SystemLauncher};
pub use persist::PersistBridge;
pub use query::{compute_view, effective_sort, QueryPolicy, EMPTY_RESULT_MESSAGE};
pub use selection::{SelectionState, Slice};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::SelectionStore;
pub use types::{AppError, CategoryMatch, Course, Level, SortKey, TabKey};
