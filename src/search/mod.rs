use crate::Recipe;

mod model;

pub use model::*;

/// Filters recipes by search text, tag and the "easy only" flag.
///
/// A recipe is kept when all of these hold:
/// - the search term is empty, or it is a case-insensitive substring of the
///   recipe name, of a normalized ingredient, or of a tag
/// - the tag selection is `All`, or the recipe carries the tag exactly
/// - `easy_only` is off, or the recipe is marked easy
///
/// The input order is preserved. Accepts anything that yields `&Recipe`, so
/// a previous result can be filtered again.
pub fn filter_recipes<'a, I>(recipes: I, query: &RecipeQuery) -> Vec<&'a Recipe>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let term = query.search_term.to_lowercase();
    recipes
        .into_iter()
        .filter(|recipe| query.matches_with_term(recipe, &term))
        .collect()
}
