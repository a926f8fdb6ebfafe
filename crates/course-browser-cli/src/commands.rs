// SPDX-License-Identifier: AGPL-3.0
// Course Browser CLI - Command handlers

use crate::cli::{Cli, Command, ListArgs};
use course_browser_core::{
    effective_sort, open_course_media, AppError, Catalog, CourseDetail, Course, FileStore,
    KeyValueStore, MediaOutcome, PersistBridge, QueryPolicy, SelectionState, SelectionStore,
    SystemLauncher, TabKey, COURSE_NOT_FOUND_MESSAGE, EMPTY_RESULT_MESSAGE,
};
use std::sync::Arc;

type CommandResult<T> = Result<T, AppError>;

/// Load catalog and selection, run one command, wait for pending writes
pub fn run(cli: Cli) -> CommandResult<()> {
    let catalog = Catalog::load(&cli.catalog)?;
    let storage: Arc<dyn KeyValueStore> = match &cli.state_file {
        Some(path) => Arc::new(FileStore::open(path)?),
        None => Arc::new(FileStore::new()?),
    };
    let mut store = SelectionStore::restore(PersistBridge::new(storage)?);
    let policy = cli.policy.to_policy();

    match cli.command {
        Command::List(args) => list(&mut store, &catalog, &policy, args),
        Command::Tab { tab } => {
            store.toggle_tab(tab.into());
            println!("Tabs: {}", store.state().section_title());
        }
        Command::Category { category } => {
            store.toggle_category(&category);
            println!("Categories: {}", format_categories(store.state()));
        }
        Command::Favorite { id } => toggle_favorite(&mut store, &catalog, &id),
        Command::Show { id } => show(&store, &catalog, &id),
        Command::Open { id } => open(&catalog, &id),
        Command::Reset => {
            store.reset();
            println!("Filters reset ({} favorites kept)", store.state().favorites().len());
        }
        Command::Stats { top } => stats(&catalog, top),
        Command::Categories => categories(&store, &catalog),
    }

    store.flush();
    Ok(())
}

fn list(store: &mut SelectionStore, catalog: &Catalog, policy: &QueryPolicy, args: ListArgs) {
    if !args.tabs.is_empty() {
        store.set_active_tabs(args.tabs.into_iter().map(TabKey::from));
    }
    if !args.categories.is_empty() {
        store.set_categories(args.categories);
    }
    if let Some(sort) = args.sort {
        store.set_sort_by(sort.into());
    }
    if let Some(search) = args.search {
        store.set_search_text(&search);
    }

    let state = store.state();
    println!("{}", state.section_title());
    println!(
        "Sort: {} | Categories: {}",
        effective_sort(state, policy).label(),
        format_categories(state)
    );
    println!();

    let view = store.view(catalog, policy);
    if view.is_empty() {
        println!("{}", EMPTY_RESULT_MESSAGE);
        return;
    }
    for course in view {
        println!("{}", format_course_line(course, state.is_favorite(&course.id)));
    }
}

fn toggle_favorite(store: &mut SelectionStore, catalog: &Catalog, id: &str) {
    let id = favorite_id(catalog, id);
    if store.toggle_favorite(id) {
        println!("Added {} to favorites", id);
    } else {
        println!("Removed {} from favorites", id);
    }
}

/// Catalog id for a favorite; unknown ids are kept as given
fn favorite_id<'a>(catalog: &'a Catalog, id: &'a str) -> &'a str {
    match catalog.find(id) {
        Some(course) => course.id.as_str(),
        None => {
            tracing::warn!("Course {} is not in the catalog", id);
            id
        }
    }
}

fn show(store: &SelectionStore, catalog: &Catalog, id: &str) {
    let detail = CourseDetail::lookup(catalog, id);
    let Some(course) = detail.course() else {
        println!("{}", COURSE_NOT_FOUND_MESSAGE);
        return;
    };

    println!("{}", format_course_line(course, store.state().is_favorite(&course.id)));
    println!();
    println!("{}", course.description);
    if !course.categories.is_empty() {
        println!("Categorieën: {}", course.categories.join(", "));
    }
    if let Some(url) = &course.video_url {
        println!("Video: {}", url);
    }
    println!();
    println!("Leerdoelen");
    for goal in detail.goal_lines() {
        println!("  • {}", goal);
    }
}

fn open(catalog: &Catalog, id: &str) {
    let Some(course) = catalog.find(id) else {
        println!("{}", COURSE_NOT_FOUND_MESSAGE);
        return;
    };

    match open_course_media(&SystemLauncher, course) {
        MediaOutcome::Opened => println!("Opening video for {}", course.title),
        MediaOutcome::NoLink => println!("No video available for {}", course.title),
        MediaOutcome::Failed => println!("Could not open video for {}", course.title),
    }
}

fn stats(catalog: &Catalog, top: usize) {
    let stats = catalog.statistics();
    println!("Cursussen: {}", stats.course_count);
    println!(
        "  Beginner: {}, Gevorderd: {}, Overig: {}",
        stats.beginner_count, stats.gevorderd_count, stats.other_level_count
    );
    println!("Weergaven: {}", stats.total_views);
    println!("Leden: {}", stats.total_members);
    match stats.average_rating {
        Some(rating) => println!("Gemiddelde beoordeling: {:.1}", rating),
        None => println!("Gemiddelde beoordeling: -"),
    }

    println!();
    println!("{}", TabKey::Populair.label());
    for course in catalog.popular(top) {
        println!("  {} ({} weergaven)", course.title, course.views);
    }
}

fn categories(store: &SelectionStore, catalog: &Catalog) {
    let selected = store.state().categories();
    for category in catalog.categories() {
        let marker = if selected.contains(category) { "x" } else { " " };
        println!("[{}] {}", marker, category);
    }
}

fn format_categories(state: &SelectionState) -> String {
    if state.categories().is_empty() {
        "-".to_string()
    } else {
        state
            .categories()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One-line course card
pub fn format_course_line(course: &Course, is_favorite: bool) -> String {
    let heart = if is_favorite { "♥" } else { "♡" };
    let mut line = format!(
        "{} [{}] {} | {} | duur {} | {} weergaven | ★ {}",
        heart, course.id, course.title, course.level, course.duration, course.views, course.rating
    );
    if let Some(members) = course.members {
        line.push_str(&format!(" | {} leden", members));
    }
    line
}
