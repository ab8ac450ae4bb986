uniffi::setup_scaffolding!();

pub mod browser;
pub mod catalog;
pub mod config;
pub mod debounce;
pub mod ffi;
pub mod model;
pub mod pagination;
pub mod related;
pub mod search;
pub mod suggest;
pub mod tags;

pub use browser::{Browser, CatalogView, InitialQuery, RecipeDetail};
pub use catalog::{Catalog, CatalogError};
pub use config::{BrowseConfig, ConfigError};
pub use model::*;
pub use related::related_recipes;
pub use search::{filter_recipes, RecipeQuery, TagSelection};
pub use suggest::suggest;
pub use tags::rank_tags;
