use crate::model::{normalize_ingredients, Recipe};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur when loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse catalog YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(Utf8PathBuf),

    #[error("Duplicate recipe id: {0}")]
    DuplicateId(u64),
}

/// Accepted dataset shapes: a bare array or `{ "recipes": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Dataset {
    List(Vec<Recipe>),
    Wrapped { recipes: Vec<Recipe> },
}

impl Dataset {
    fn into_recipes(self) -> Vec<Recipe> {
        match self {
            Dataset::List(recipes) | Dataset::Wrapped { recipes } => recipes,
        }
    }
}

/// The read-only recipe collection.
///
/// Recipes keep the order in which they appear in the dataset; every query
/// that preserves "collection order" refers to this order.
///
/// # Examples
///
/// ```no_run
/// use recipe_catalog::Catalog;
/// use camino::Utf8Path;
///
/// let catalog = Catalog::from_path(Utf8Path::new("data/recipes.json"))?;
/// if let Some(recipe) = catalog.get(4) {
///     println!("{}", recipe.name);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    index: HashMap<u64, usize>,
}

impl Catalog {
    /// Loads a catalog from a `.json`, `.yaml` or `.yml` file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read, cannot be parsed,
    /// has an unknown extension, or contains duplicate recipe ids.
    pub fn from_path(path: &Utf8Path) -> Result<Self, CatalogError> {
        let recipes = match path.extension() {
            Some("json") => {
                let content = std::fs::read_to_string(path)?;
                serde_json::from_str::<Dataset>(&content)?.into_recipes()
            }
            Some("yaml") | Some("yml") => {
                let content = std::fs::read_to_string(path)?;
                serde_yaml::from_str::<Dataset>(&content)?.into_recipes()
            }
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        };

        let catalog = Self::from_recipes(recipes)?;
        info!(path = %path, recipes = catalog.len(), "loaded recipe catalog");
        Ok(catalog)
    }

    /// Loads a catalog from JSON content.
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let recipes = serde_json::from_str::<Dataset>(content)?.into_recipes();
        Self::from_recipes(recipes)
    }

    /// Builds a catalog from already deserialized recipes.
    ///
    /// Hidden recipes are dropped and missing normalized ingredients are
    /// derived from the raw ingredient lines.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two visible recipes share an id.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Result<Self, CatalogError> {
        let total = recipes.len();
        let mut kept = Vec::with_capacity(total);
        let mut index = HashMap::with_capacity(total);

        for mut recipe in recipes.into_iter().filter(|r| !r.hidden) {
            if index.insert(recipe.id, kept.len()).is_some() {
                warn!(id = recipe.id, "rejecting catalog with duplicate recipe id");
                return Err(CatalogError::DuplicateId(recipe.id));
            }
            if recipe.cleaned_ingredients.is_empty() && !recipe.ingredients.is_empty() {
                recipe.cleaned_ingredients = normalize_ingredients(&recipe.ingredients);
            }
            kept.push(recipe);
        }

        if kept.len() < total {
            debug!(hidden = total - kept.len(), "dropped hidden recipes");
        }

        Ok(Catalog {
            recipes: kept,
            index,
        })
    }

    /// Returns all recipes in collection order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Looks up a recipe by id.
    ///
    /// Returns `None` for unknown (for example stale) ids.
    pub fn get(&self, id: u64) -> Option<&Recipe> {
        self.index.get(&id).map(|&i| &self.recipes[i])
    }

    /// Returns the position of a recipe in collection order.
    pub fn position(&self, id: u64) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Returns every distinct tag used by at least one recipe.
    pub fn tag_universe(&self) -> BTreeSet<&str> {
        self.recipes
            .iter()
            .flat_map(|r| r.tags.iter().map(String::as_str))
            .collect()
    }
}
