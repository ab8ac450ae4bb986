use crate::search::TagSelection;
use crate::Recipe;
use std::collections::BTreeSet;

/// Index a selected tag is promoted to, right after the sentinel.
const SELECTED_TAG_SLOT: usize = 1;

/// Builds the ordered list of selectable tags.
///
/// The first featured tag is the "all" sentinel and is always kept at index
/// 0. Other featured tags are kept in their curated order only if at least
/// one recipe uses them. The remaining tags follow in ascending,
/// case-sensitive order. A selected tag that would land past index 1 is
/// moved to index 1, right after the sentinel. The slot is fixed, so with
/// no featured tags the first sorted tag keeps index 0.
///
/// A selected tag that no recipe uses is not added; resetting a stale
/// selection is up to the caller.
///
/// # Examples
///
/// ```
/// use recipe_catalog::{rank_tags, Recipe, TagSelection};
///
/// let recipes = vec![Recipe {
///     id: 1,
///     tags: vec!["Postres".into(), "Arándanos".into(), "Frutilla".into()],
///     ..Default::default()
/// }];
/// let selected = TagSelection::Tag("Frutilla".into());
///
/// let tags = rank_tags(&recipes, &["Todas", "Vegano", "Postres"], &selected);
/// assert_eq!(tags, vec!["Todas", "Frutilla", "Postres", "Arándanos"]);
/// ```
pub fn rank_tags<S: AsRef<str>>(
    recipes: &[Recipe],
    featured: &[S],
    selected: &TagSelection,
) -> Vec<String> {
    let universe: BTreeSet<&str> = recipes
        .iter()
        .flat_map(|r| r.tags.iter().map(String::as_str))
        .collect();
    let featured: Vec<&str> = featured.iter().map(AsRef::as_ref).collect();

    let mut ranked: Vec<String> = Vec::with_capacity(universe.len() + 1);
    for (i, tag) in featured.iter().enumerate() {
        let keep = i == 0 || universe.contains(tag);
        if keep && !ranked.iter().any(|t| t == tag) {
            ranked.push(tag.to_string());
        }
    }
    ranked.extend(
        universe
            .iter()
            .filter(|tag| !featured.contains(*tag))
            .map(|tag| tag.to_string()),
    );

    if let TagSelection::Tag(tag) = selected {
        if let Some(pos) = ranked.iter().position(|t| t == tag) {
            if pos > SELECTED_TAG_SLOT {
                let tag = ranked.remove(pos);
                ranked.insert(SELECTED_TAG_SLOT, tag);
            }
        }
    }

    ranked
}
