use crate::Recipe;

/// Default number of related recipes shown under a recipe.
pub const DEFAULT_MAX_RELATED: usize = 3;

/// Finds recipes sharing at least one tag with `recipe`.
///
/// The collection is scanned in order and the first `max_results` matches
/// win; there is no ranking by the number of shared tags. The reference
/// recipe itself (by id) is never included. An absent reference yields no
/// results.
pub fn related_recipes<'a>(
    recipes: &'a [Recipe],
    recipe: Option<&Recipe>,
    max_results: usize,
) -> Vec<&'a Recipe> {
    let Some(recipe) = recipe else {
        return Vec::new();
    };

    recipes
        .iter()
        .filter(|candidate| candidate.id != recipe.id && candidate.shares_tag_with(recipe))
        .take(max_results)
        .collect()
}
