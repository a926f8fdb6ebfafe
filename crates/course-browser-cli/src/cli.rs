// SPDX-License-Identifier: AGPL-3.0
// Course Browser CLI - Argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use course_browser_core::{CategoryMatch, QueryPolicy, SortKey, TabKey};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "course-browser",
    version,
    about = "Browse, filter and favorite a course catalog"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Course catalog (JSON list of courses).
    #[arg(long, value_name = "PATH", global = true, default_value = "courses.json")]
    pub catalog: PathBuf,

    /// Where the selection is stored (default: user config dir).
    #[arg(long = "state-file", value_name = "PATH", global = true)]
    pub state_file: Option<PathBuf>,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Query behaviour switches
#[derive(Args, Debug)]
pub struct PolicyArgs {
    /// How selected categories are matched.
    #[arg(long = "category-match", value_enum, default_value = "any", global = true)]
    pub category_match: CategoryMatchArg,

    /// Keep the chosen sort key when the "populair" tab is active.
    #[arg(long = "no-popular-sort-override", global = true)]
    pub no_popular_sort_override: bool,

    /// Only let the "populair" tab admit courses with at least this many views.
    #[arg(long = "popular-min-views", value_name = "VIEWS", global = true)]
    pub popular_min_views: Option<u64>,
}

impl PolicyArgs {
    pub fn to_policy(&self) -> QueryPolicy {
        QueryPolicy {
            category_match: self.category_match.into(),
            popular_forces_sort: !self.no_popular_sort_override,
            popular_min_views: self.popular_min_views,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the dashboard list, optionally changing the selection first.
    List(ListArgs),

    /// Toggle a filter tab.
    Tab {
        #[arg(value_enum)]
        tab: TabArg,
    },

    /// Toggle a category filter.
    Category { category: String },

    /// Toggle a course as favorite.
    Favorite { id: String },

    /// Show course details.
    Show { id: String },

    /// Open the course video in the default handler.
    Open { id: String },

    /// Reset filters, sort and search. Favorites are kept.
    Reset,

    /// Catalog statistics and most viewed courses.
    Stats {
        /// Number of popular courses to list.
        #[arg(long, default_value_t = 3)]
        top: usize,
    },

    /// List the categories present in the catalog.
    Categories,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Replace the active tabs (repeatable).
    #[arg(long = "tab", value_enum)]
    pub tabs: Vec<TabArg>,

    /// Replace the selected categories (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Sort key.
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Title search for this run only.
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TabArg {
    All,
    Beginner,
    Gevorderd,
    Populair,
    Favorieten,
}

impl From<TabArg> for TabKey {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::All => TabKey::All,
            TabArg::Beginner => TabKey::Beginner,
            TabArg::Gevorderd => TabKey::Gevorderd,
            TabArg::Populair => TabKey::Populair,
            TabArg::Favorieten => TabKey::Favorieten,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Populariteit,
    Rating,
    Duur,
}

impl From<SortArg> for SortKey {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Populariteit => SortKey::Populariteit,
            SortArg::Rating => SortKey::Rating,
            SortArg::Duur => SortKey::Duur,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CategoryMatchArg {
    Any,
    All,
}

impl From<CategoryMatchArg> for CategoryMatch {
    fn from(mode: CategoryMatchArg) -> Self {
        match mode {
            CategoryMatchArg::Any => CategoryMatch::Any,
            CategoryMatchArg::All => CategoryMatch::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_with_repeated_tabs() {
        let cli = Cli::try_parse_from([
            "course-browser",
            "list",
            "--tab",
            "beginner",
            "--tab",
            "favorieten",
            "--sort",
            "duur",
            "--search",
            "intro",
        ])
        .unwrap();

        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.tabs, vec![TabArg::Beginner, TabArg::Favorieten]);
        assert_eq!(args.sort, Some(SortArg::Duur));
        assert_eq!(args.search.as_deref(), Some("intro"));
    }

    #[test]
    fn test_policy_flags() {
        let cli = Cli::try_parse_from([
            "course-browser",
            "--category-match",
            "all",
            "--no-popular-sort-override",
            "--popular-min-views",
            "100",
            "list",
        ])
        .unwrap();

        let policy = cli.policy.to_policy();
        assert_eq!(policy.category_match, CategoryMatch::All);
        assert!(!policy.popular_forces_sort);
        assert_eq!(policy.popular_min_views, Some(100));
    }

    #[test]
    fn test_default_policy() {
        let cli = Cli::try_parse_from(["course-browser", "reset"]).unwrap();
        assert_eq!(cli.policy.to_policy(), QueryPolicy::default());
        assert_eq!(cli.catalog, PathBuf::from("courses.json"));
    }
}
