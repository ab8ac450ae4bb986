use crate::Recipe;
use serde::{Deserialize, Serialize};

/// The tag filter currently applied.
///
/// `All` stands for the "all" sentinel label; the label itself is injected
/// through configuration and only matters at the UI boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TagSelection {
    #[default]
    All,
    Tag(String),
}

impl TagSelection {
    /// Maps a UI label to a selection, treating `all_tag` as no filter.
    pub fn from_label(label: &str, all_tag: &str) -> Self {
        if label == all_tag {
            TagSelection::All
        } else {
            TagSelection::Tag(label.to_string())
        }
    }

    /// Returns the UI label for this selection.
    pub fn label<'a>(&'a self, all_tag: &'a str) -> &'a str {
        match self {
            TagSelection::All => all_tag,
            TagSelection::Tag(tag) => tag,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            TagSelection::All => None,
            TagSelection::Tag(tag) => Some(tag),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, TagSelection::All)
    }

    /// Returns true if the recipe passes the tag clause (exact match).
    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            TagSelection::All => true,
            TagSelection::Tag(tag) => recipe.has_tag(tag),
        }
    }
}

/// The committed query state the recipe filter runs against.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecipeQuery {
    /// Committed (debounced) search text; empty matches everything
    pub search_term: String,
    pub tag: TagSelection,
    /// Keep only "quick and easy" recipes
    pub easy_only: bool,
}

impl RecipeQuery {
    pub fn new(search_term: impl Into<String>, tag: TagSelection, easy_only: bool) -> Self {
        Self {
            search_term: search_term.into(),
            tag,
            easy_only,
        }
    }

    /// Returns true if the recipe satisfies every clause of the query.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.matches_with_term(recipe, &self.search_term.to_lowercase())
    }

    pub(crate) fn matches_with_term(&self, recipe: &Recipe, term_lower: &str) -> bool {
        matches_search(recipe, term_lower)
            && self.tag.matches(recipe)
            && (!self.easy_only || recipe.easy)
    }
}

/// Case-insensitive substring match against name, normalized ingredients
/// and tags. `term_lower` must already be lowercase.
pub(crate) fn matches_search(recipe: &Recipe, term_lower: &str) -> bool {
    if term_lower.is_empty() {
        return true;
    }
    let contains = |s: &String| s.to_lowercase().contains(term_lower);

    contains(&recipe.name)
        || recipe.cleaned_ingredients.iter().any(contains)
        || recipe.tags.iter().any(contains)
}
