use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A single catalog recipe.
///
/// Recipes are loaded once from the static dataset and never mutated
/// afterwards. Field names on the wire follow the dataset format
/// (`instagramUrl`, `imageUrl`, `cleaned_ingredientes`, ...).
///
/// # Examples
///
/// ```
/// use recipe_catalog::Recipe;
///
/// let recipe: Recipe = serde_json::from_str(r#"{
///     "id": 4,
///     "name": "Turrón casero",
///     "tags": ["Chocolate", "Navidad"],
///     "ingredients": ["350 g de chocolate"],
///     "easy": true
/// }"#)?;
///
/// assert!(recipe.has_tag("Navidad"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique, stable identity key
    pub id: u64,
    /// Display name, may embed emoji
    pub name: String,
    /// Free text description, may contain line breaks
    #[serde(default)]
    pub description: String,
    /// Tags in authored order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Raw ingredient lines, quantities included
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Normalized ingredient names used for search matching
    #[serde(
        default,
        rename = "cleaned_ingredientes",
        alias = "cleanedIngredients"
    )]
    pub cleaned_ingredients: Vec<String>,
    #[serde(default)]
    pub instagram_url: String,
    #[serde(default)]
    pub facebook_url: String,
    /// Relative path to the cover image
    #[serde(default)]
    pub image_url: String,
    /// Marks "quick and easy" recipes
    #[serde(default)]
    pub easy: bool,
    /// Hidden recipes are dropped by the catalog loader
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Recipe {}

impl Hash for Recipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Recipe {
    /// Returns true if the recipe carries exactly this tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Returns true if the recipe shares at least one tag with `other`.
    pub fn shares_tag_with(&self, other: &Recipe) -> bool {
        self.tags.iter().any(|tag| other.has_tag(tag))
    }

    /// Description split on line breaks, for renderers that emit one
    /// paragraph per line.
    pub fn description_lines(&self) -> impl Iterator<Item = &str> {
        self.description.split('\n')
    }

    /// Extracts the post shortcode from the Instagram URL.
    ///
    /// Supports `/p/<code>/` and `/reel/<code>/` links. Returns `None` when
    /// the recipe has no Instagram link or the link has another shape.
    pub fn instagram_shortcode(&self) -> Option<&str> {
        ["/p/", "/reel/"].iter().find_map(|marker| {
            let (_, rest) = self.instagram_url.split_once(marker)?;
            let code = rest.split('/').next()?;
            (!code.is_empty()).then_some(code)
        })
    }
}
