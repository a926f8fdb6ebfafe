// SPDX-License-Identifier: AGPL-3.0
// Course Browser Core - Type definitions

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Course difficulty level as it appears in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    Beginner,
    Gevorderd,
    /// Any level the dashboard has no tab for, kept verbatim
    Other(String),
}

impl From<String> for Level {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Beginner" => Self::Beginner,
            "Gevorderd" => Self::Gevorderd,
            _ => Self::Other(value),
        }
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        match level {
            Level::Beginner => "Beginner".to_string(),
            Level::Gevorderd => "Gevorderd".to_string(),
            Level::Other(other) => other,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginner => f.write_str("Beginner"),
            Self::Gevorderd => f.write_str("Gevorderd"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

/// A single catalog entry. Read-only for the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Stable identifier; numeric ids in the source data are kept as text
    #[serde(deserialize_with = "deserialize_course_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub level: Level,
    /// Unit-less ordinal, only ever compared
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub views: u64,
    /// 0 to 5
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Media link opened by the "watch video" action
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub members: Option<u64>,
}

fn deserialize_course_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "course id must be a string or number, got {}",
            other
        ))),
    }
}

/// Coarse filter buckets on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKey {
    All,
    Beginner,
    Gevorderd,
    Populair,
    Favorieten,
}

impl TabKey {
    pub const ALL_TABS: [TabKey; 5] = [
        TabKey::All,
        TabKey::Beginner,
        TabKey::Gevorderd,
        TabKey::Populair,
        TabKey::Favorieten,
    ];

    /// Key used in storage and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Beginner => "beginner",
            Self::Gevorderd => "gevorderd",
            Self::Populair => "populair",
            Self::Favorieten => "favorieten",
        }
    }

    /// Get display label for this tab
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "Alle Cursussen",
            Self::Beginner => "Voor Beginners",
            Self::Gevorderd => "Gevorderd",
            Self::Populair => "Meest Bekeken",
            Self::Favorieten => "Favorieten",
        }
    }
}

/// Ordering applied as the last query stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Views, most viewed first
    #[default]
    Populariteit,
    /// Rating, best rated first
    Rating,
    /// Duration, shortest first
    Duur,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Populariteit => "populariteit",
            Self::Rating => "rating",
            Self::Duur => "duur",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Populariteit => "Populariteit",
            Self::Rating => "Beoordeling",
            Self::Duur => "Duur",
        }
    }
}

/// How a course's categories are matched against the selected ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryMatch {
    /// At least one selected category is present
    #[default]
    Any,
    /// Every selected category is present
    All,
}

/// Error types for the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    FileIo(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to open link: {0}")]
    Launch(String),
}
