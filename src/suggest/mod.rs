use crate::Recipe;
use std::collections::HashSet;

/// Default number of suggestions shown under the search box.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Collects distinct suggestions while enforcing the cap.
struct Suggestions<'a> {
    items: Vec<String>,
    seen: HashSet<&'a str>,
    max: usize,
}

impl<'a> Suggestions<'a> {
    fn new(max: usize) -> Self {
        Self {
            items: Vec::with_capacity(max),
            seen: HashSet::new(),
            max,
        }
    }

    fn is_full(&self) -> bool {
        self.items.len() >= self.max
    }

    /// Scans candidates in order, adding matching ones until the cap is hit.
    fn scan<I>(&mut self, candidates: I, term: &str)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for candidate in candidates {
            if self.is_full() {
                return;
            }
            if candidate.to_lowercase().contains(term) && self.seen.insert(candidate.as_str()) {
                self.items.push(candidate.clone());
            }
        }
    }
}

/// Generates autocomplete suggestions for the typed text.
///
/// Candidates are searched by case-insensitive substring, in three tiers:
/// normalized ingredients first, then recipe names, then tags. Later tiers
/// are only consulted while the cap is not reached. A candidate is never
/// suggested twice. Empty input returns no suggestions without scanning.
///
/// # Examples
///
/// ```
/// use recipe_catalog::{suggest, Recipe};
///
/// let recipes = vec![Recipe {
///     id: 1,
///     name: "Chocotorta".into(),
///     cleaned_ingredients: vec!["galletita de chocolate".into()],
///     ..Default::default()
/// }];
///
/// assert_eq!(
///     suggest("choc", &recipes, 5),
///     vec!["galletita de chocolate", "Chocotorta"]
/// );
/// ```
pub fn suggest(input: &str, recipes: &[Recipe], max_suggestions: usize) -> Vec<String> {
    if input.is_empty() || max_suggestions == 0 {
        return Vec::new();
    }
    let term = input.to_lowercase();
    let mut suggestions = Suggestions::new(max_suggestions);

    suggestions.scan(recipes.iter().flat_map(|r| &r.cleaned_ingredients), &term);
    suggestions.scan(recipes.iter().map(|r| &r.name), &term);
    suggestions.scan(recipes.iter().flat_map(|r| &r.tags), &term);

    suggestions.items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: u64, name: &str, tags: &[&str], ingredients: &[&str]) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            cleaned_ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn setup_test_recipes() -> Vec<Recipe> {
        vec![
            recipe(1, "🍫 Turrón casero", &["Chocolate", "Navidad"], &["chocolate", "leche condensada"]),
            recipe(2, "🍰 Cheesecake", &["Postres", "Frutilla"], &["queso crema", "leche"]),
            recipe(3, "🍓 Mermelada de frutilla", &["Frutilla", "Desayuno"], &["frutilla", "azúcar"]),
            recipe(4, "🍲 Polenta", &["Comidaregional"], &["polenta", "leche", "queso"]),
        ]
    }

    #[test]
    fn test_empty_input() {
        let recipes = setup_test_recipes();
        assert!(suggest("", &recipes, 5).is_empty());
    }

    #[test]
    fn test_ingredients_before_names_and_tags() {
        let recipes = setup_test_recipes();
        let results = suggest("frutilla", &recipes, 5);
        assert_eq!(results, vec!["frutilla", "🍓 Mermelada de frutilla", "Frutilla"]);
    }

    #[test]
    fn test_name_tier_used_when_no_ingredient_matches() {
        let recipes = vec![recipe(1, "🍫 Chocolate de taza", &["Invierno"], &["cacao", "leche"])];
        let results = suggest("choc", &recipes, 5);
        assert_eq!(results, vec!["🍫 Chocolate de taza"]);
    }

    #[test]
    fn test_duplicates_are_skipped() {
        let recipes = setup_test_recipes();
        let results = suggest("leche", &recipes, 5);
        assert_eq!(results, vec!["leche condensada", "leche"]);
    }

    #[test]
    fn test_exact_string_dedup_is_case_sensitive() {
        let recipes = vec![recipe(1, "Chocolate", &["Chocolate"], &["chocolate"])];
        let results = suggest("CHOCO", &recipes, 5);
        // "chocolate" and "Chocolate" differ; the tag repeats the name
        assert_eq!(results, vec!["chocolate", "Chocolate"]);
    }

    #[test]
    fn test_cap_short_circuits() {
        let recipes = setup_test_recipes();
        let results = suggest("e", &recipes, 2);
        assert_eq!(results, vec!["chocolate", "leche condensada"]);

        let results = suggest("e", &recipes, 0);
        assert!(results.is_empty());
    }

    #[test]
    fn test_cap_is_respected() {
        let recipes = setup_test_recipes();
        for input in ["", "a", "e", "o", "leche", "zzz", "FRUT"] {
            for max in 0..8 {
                assert!(suggest(input, &recipes, max).len() <= max);
            }
        }
    }

    #[test]
    fn test_no_matches() {
        let recipes = setup_test_recipes();
        assert!(suggest("sushi", &recipes, 5).is_empty());
    }
}
