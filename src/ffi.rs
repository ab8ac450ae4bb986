//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! The browser is exposed as a shared object guarded by a mutex; everything
//! it returns is copied into plain records so hosts never hold references
//! into the catalog. Counts and pages cross the boundary as `u32`.

use crate::browser::{Browser, CatalogView, RecipeDetail};
use crate::catalog::{Catalog, CatalogError};
use crate::config::{BrowseConfig, ConfigError};
use crate::pagination::{page_numbers as page_numbers_internal, PageItem};
use crate::Recipe;
use camino::Utf8Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum CatalogBrowserError {
    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Invalid catalog: {message}")]
    InvalidCatalog { message: String },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },
}

impl From<CatalogError> for CatalogBrowserError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::IoError(e) => CatalogBrowserError::IoError {
                message: e.to_string(),
            },
            CatalogError::JsonError(e) => CatalogBrowserError::ParseError {
                message: e.to_string(),
            },
            CatalogError::YamlError(e) => CatalogBrowserError::ParseError {
                message: e.to_string(),
            },
            e @ (CatalogError::UnsupportedFormat(_) | CatalogError::DuplicateId(_)) => {
                CatalogBrowserError::InvalidCatalog {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<ConfigError> for CatalogBrowserError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::IoError(e) => CatalogBrowserError::IoError {
                message: e.to_string(),
            },
            e => CatalogBrowserError::InvalidConfig {
                message: e.to_string(),
            },
        }
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipe {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Raw ingredient lines
    pub ingredients: Vec<String>,
    /// Normalized ingredient names
    pub cleaned_ingredients: Vec<String>,
    pub instagram_url: String,
    /// Post shortcode parsed from the Instagram URL, for embeds
    pub instagram_shortcode: Option<String>,
    pub facebook_url: String,
    pub image_url: String,
    pub easy: bool,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            id: r.id,
            name: r.name.clone(),
            description: r.description.clone(),
            tags: r.tags.clone(),
            ingredients: r.ingredients.clone(),
            cleaned_ingredients: r.cleaned_ingredients.clone(),
            instagram_url: r.instagram_url.clone(),
            instagram_shortcode: r.instagram_shortcode().map(str::to_string),
            facebook_url: r.facebook_url.clone(),
            image_url: r.image_url.clone(),
            easy: r.easy,
        }
    }
}

/// One entry of a pager layout.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum FfiPageItem {
    Page { number: u32 },
    /// Elided range; `key` is stable within a layout
    Ellipsis { key: String },
}

impl From<PageItem> for FfiPageItem {
    fn from(item: PageItem) -> Self {
        match item {
            PageItem::Page(n) => FfiPageItem::Page { number: to_u32(n) },
            PageItem::Ellipsis(marker) => FfiPageItem::Ellipsis {
                key: marker.key().to_string(),
            },
        }
    }
}

/// FFI-safe snapshot of the list screen.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCatalogView {
    pub tags: Vec<String>,
    pub selected_tag: String,
    pub search_input: String,
    pub search_term: String,
    pub easy_only: bool,
    pub result_count: u32,
    pub recipes: Vec<FfiRecipe>,
    pub current_page: u32,
    pub total_pages: u32,
    pub page_numbers: Vec<FfiPageItem>,
}

impl From<CatalogView<'_>> for FfiCatalogView {
    fn from(v: CatalogView<'_>) -> Self {
        FfiCatalogView {
            tags: v.tags.to_vec(),
            selected_tag: v.selected_tag.to_string(),
            search_input: v.search_input.to_string(),
            search_term: v.search_term.to_string(),
            easy_only: v.easy_only,
            result_count: to_u32(v.result_count),
            recipes: v.recipes.into_iter().map(FfiRecipe::from).collect(),
            current_page: to_u32(v.current_page),
            total_pages: to_u32(v.total_pages),
            page_numbers: v.page_numbers.into_iter().map(FfiPageItem::from).collect(),
        }
    }
}

/// FFI-safe representation of the detail screen.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipeDetail {
    pub recipe: FfiRecipe,
    pub related: Vec<FfiRecipe>,
}

impl From<RecipeDetail<'_>> for FfiRecipeDetail {
    fn from(d: RecipeDetail<'_>) -> Self {
        FfiRecipeDetail {
            recipe: FfiRecipe::from(d.recipe),
            related: d.related.into_iter().map(FfiRecipe::from).collect(),
        }
    }
}

/// Catalog browser shared with the host application.
///
/// The host forwards user input and calls `tick` from a timer while
/// `search_pending` is true; `search_remaining_ms` tells it when to fire.
#[derive(uniffi::Object)]
pub struct FfiCatalogBrowser {
    inner: Mutex<Browser>,
}

impl FfiCatalogBrowser {
    fn new(browser: Browser) -> Self {
        FfiCatalogBrowser {
            inner: Mutex::new(browser),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Browser> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[uniffi::export]
impl FfiCatalogBrowser {
    /// Creates a browser from JSON catalog content and optional YAML config.
    #[uniffi::constructor]
    pub fn from_json(
        catalog_json: String,
        config_yaml: Option<String>,
    ) -> Result<Arc<Self>, CatalogBrowserError> {
        let catalog = Catalog::from_json_str(&catalog_json)?;
        let config = match config_yaml {
            Some(yaml) => BrowseConfig::from_yaml_str(&yaml)?,
            None => BrowseConfig::default(),
        };
        Ok(Arc::new(Self::new(Browser::new(catalog, config))))
    }

    /// Records typed search text. Results change once the quiet period
    /// elapses and `tick` is called.
    pub fn input(&self, text: String) {
        self.lock().input(&text);
    }

    /// Commits pending search text whose quiet period has elapsed.
    pub fn tick(&self) -> bool {
        self.lock().tick()
    }

    /// Commits a search term immediately, e.g. a picked suggestion.
    pub fn commit_search(&self, text: String) -> bool {
        self.lock().commit_search(&text)
    }

    pub fn clear_search(&self) -> bool {
        self.lock().clear_search()
    }

    pub fn select_tag(&self, label: String) -> bool {
        self.lock().select_tag(&label)
    }

    pub fn set_easy_only(&self, easy_only: bool) -> bool {
        self.lock().set_easy_only(easy_only)
    }

    pub fn toggle_easy_only(&self) -> bool {
        self.lock().toggle_easy_only()
    }

    /// Moves to a page, clamped to the available pages. Returns the page
    /// actually shown.
    pub fn go_to_page(&self, page: u32) -> u32 {
        to_u32(self.lock().go_to_page(page as usize))
    }

    pub fn next_page(&self) -> u32 {
        to_u32(self.lock().next_page())
    }

    pub fn previous_page(&self) -> u32 {
        to_u32(self.lock().previous_page())
    }

    pub fn search_pending(&self) -> bool {
        self.lock().search_pending()
    }

    /// Milliseconds until pending search text commits, if any.
    pub fn search_remaining_ms(&self) -> Option<u64> {
        self.lock()
            .search_remaining()
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.lock().suggestions()
    }

    pub fn tags(&self) -> Vec<String> {
        self.lock().tags().to_vec()
    }

    pub fn view(&self) -> FfiCatalogView {
        FfiCatalogView::from(self.lock().view())
    }

    pub fn recipe(&self, id: u64) -> Option<FfiRecipe> {
        self.lock().recipe(id).map(FfiRecipe::from)
    }

    /// Returns a recipe with its related recipes, or nothing for unknown ids.
    pub fn detail(&self, id: u64) -> Option<FfiRecipeDetail> {
        self.lock().detail(id).map(FfiRecipeDetail::from)
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Loads a catalog file and creates a browser over it.
///
/// # Arguments
/// * `path` - Path to a `.json`, `.yaml` or `.yml` catalog file
/// * `config_path` - Optional path to a YAML browse config
///
/// # Returns
/// The browser, or an error if either file cannot be loaded.
#[uniffi::export]
pub fn load_catalog(
    path: String,
    config_path: Option<String>,
) -> Result<Arc<FfiCatalogBrowser>, CatalogBrowserError> {
    let catalog = Catalog::from_path(Utf8Path::new(&path))?;
    let config = match config_path {
        Some(config_path) => BrowseConfig::from_path(Utf8Path::new(&config_path))?,
        None => BrowseConfig::default(),
    };
    Ok(Arc::new(FfiCatalogBrowser::new(Browser::new(catalog, config))))
}

/// Computes a pager layout without a browser.
#[uniffi::export]
pub fn page_numbers(current_page: u32, total_pages: u32) -> Vec<FfiPageItem> {
    page_numbers_internal(current_page as usize, total_pages as usize)
        .into_iter()
        .map(FfiPageItem::from)
        .collect()
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
