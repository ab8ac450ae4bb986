use crate::pagination::PageItem;
use crate::Recipe;
use serde::{Deserialize, Serialize};

/// Query state supplied from outside on first load, typically restored from
/// URL parameters.
///
/// Unlike later changes, the starting page is honored (after clamping)
/// instead of being reset to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialQuery {
    pub search: String,
    /// Tag label; `None` or the "all" label means no tag filter
    pub tag: Option<String>,
    pub easy_only: bool,
    pub page: usize,
}

impl Default for InitialQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            tag: None,
            easy_only: false,
            page: 1,
        }
    }
}

/// Everything a list screen renders, derived from the current state.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView<'a> {
    pub tags: &'a [String],
    pub selected_tag: &'a str,
    /// Text as typed, echoed in the search box
    pub search_input: &'a str,
    /// Committed text the results are filtered by
    pub search_term: &'a str,
    pub easy_only: bool,
    /// Number of matching recipes across all pages
    pub result_count: usize,
    /// Recipes on the current page
    pub recipes: Vec<&'a Recipe>,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_numbers: Vec<PageItem>,
}

/// A recipe with the recipes shown next to it.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail<'a> {
    pub recipe: &'a Recipe,
    pub related: Vec<&'a Recipe>,
}
