//! Listing command handlers

use anyhow::Result;
use chrono::Local;

use directorio_core::query::FEATURED_CATEGORIES;
use directorio_core::{CategoryFilter, Directory, SortKey};

use crate::output::Output;

/// Push command-line filter options into the directory state
pub fn apply_filters(
    directory: &mut Directory,
    search: Option<String>,
    category: Option<String>,
    sort: Option<SortKey>,
) {
    if let Some(text) = search {
        directory.set_query(text);
    }
    if let Some(category) = category {
        directory.set_category(category);
    }
    if let Some(sort) = sort {
        directory.set_sort(sort);
    }
}

/// List the officials visible under the current filters
pub fn list(directory: &Directory, output: &Output) -> Result<()> {
    let today = Local::now().date_naive();
    output.print_officials(&directory.visible(), today)
}

/// Print-friendly rendering of the visible officials
pub fn print(directory: &Directory, output: &Output) -> Result<()> {
    output.print_cards(&directory.visible())
}

/// Show one official in full
pub fn show(directory: &Directory, key: String, output: &Output) -> Result<()> {
    let official = super::resolve(directory, &key)?;
    output.print_official(official)
}

/// List categories with record counts
pub fn categories(directory: &Directory, featured: bool, output: &Output) -> Result<()> {
    let names: Vec<String> = if featured {
        FEATURED_CATEGORIES.iter().map(|c| c.to_string()).collect()
    } else {
        directory.categories()
    };

    let counted = count_by_category(directory, names);
    output.print_categories(&counted)
}

/// Pair each category with the number of records it would show
fn count_by_category(directory: &Directory, names: Vec<String>) -> Vec<(String, usize)> {
    names
        .into_iter()
        .map(|name| {
            let filter = CategoryFilter::from(name.as_str());
            let count = directory
                .records()
                .iter()
                .filter(|official| filter.matches(official))
                .count();
            (name, count)
        })
        .collect()
}
