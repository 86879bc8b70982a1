//! Site configuration (_config.yml)

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use thiserror::Error;

/// Configuration problems detected after parsing
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("per_page must be greater than zero")]
    ZeroPageSize,

    #[error("No template mapping configured for category '{0}'")]
    MissingCategory(String),
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub tag_dir: String,

    // Pagination
    pub per_page: usize,
    pub pagination_dir: String,

    /// Template mapping per content category, keyed by front-matter `templateKey`
    pub categories: IndexMap<String, CategoryConfig>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut categories = IndexMap::new();
        categories.insert(
            "blog-post".to_string(),
            CategoryConfig {
                detail: "src/templates/blog-post.js".to_string(),
                listing: "src/templates/blog-list.js".to_string(),
                root: "/blog/".to_string(),
            },
        );
        categories.insert(
            "project".to_string(),
            CategoryConfig {
                detail: "src/templates/project-post.js".to_string(),
                listing: "src/templates/project-list.js".to_string(),
                root: "/projects/".to_string(),
            },
        );

        Self {
            title: "Folio".to_string(),

            source_dir: "content".to_string(),
            public_dir: "public".to_string(),
            tag_dir: "tags".to_string(),

            per_page: 2,
            pagination_dir: "page".to_string(),

            categories,
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Listing chunk size, rejecting zero
    pub fn page_size(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.per_page).ok_or(ConfigError::ZeroPageSize)
    }

    /// Look up the mapping for a template key
    pub fn category(&self, key: &str) -> Result<&CategoryConfig, ConfigError> {
        self.categories
            .get(key)
            .ok_or_else(|| ConfigError::MissingCategory(key.to_string()))
    }
}

/// Templates and listing root for one content category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Template used for each record's own page
    pub detail: String,
    /// Template used for the paginated listing pages
    pub listing: String,
    /// Path of the first listing page
    pub root: String,
}
