use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Page size must be at least 1, got {0}")]
    InvalidPageSize(usize),

    #[error("The \"all\" tag label must not be empty")]
    EmptyAllTag,
}

/// Settings that drive the catalog browser.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
///
/// # Examples
///
/// ```
/// use recipe_catalog::BrowseConfig;
///
/// let config = BrowseConfig::from_yaml_str("all_tag: All\npage_size: 12\n")?;
/// assert_eq!(config.page_size, 12);
/// assert_eq!(config.featured()[0], "All");
/// # Ok::<(), recipe_catalog::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// Tag label meaning "no tag filter"
    pub all_tag: String,
    /// Curated tags shown first in the filter bar
    pub featured_tags: Vec<String>,
    /// Recipes per page
    pub page_size: usize,
    pub max_suggestions: usize,
    pub max_related: usize,
    /// Quiet period before typed text is committed as the search term
    pub debounce_ms: u64,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        BrowseConfig {
            all_tag: "Todas".to_string(),
            featured_tags: ["Todas", "Vegano", "Navidad", "Postres", "Chocolate"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            page_size: 6,
            max_suggestions: 5,
            max_related: 3,
            debounce_ms: 300,
        }
    }
}

impl BrowseConfig {
    /// Loads a configuration from a YAML file.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parses and validates a configuration from YAML content.
    ///
    /// Empty content yields the default configuration.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config = if content.trim().is_empty() {
            BrowseConfig::default()
        } else {
            serde_yaml::from_str::<BrowseConfig>(content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        if self.all_tag.is_empty() {
            return Err(ConfigError::EmptyAllTag);
        }
        Ok(())
    }

    /// Returns the featured tags with the "all" sentinel first, exactly once,
    /// and without duplicates.
    pub fn featured(&self) -> Vec<String> {
        let mut featured = vec![self.all_tag.clone()];
        for tag in &self.featured_tags {
            if !featured.contains(tag) {
                featured.push(tag.clone());
            }
        }
        featured
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
