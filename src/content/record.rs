//! Content record and category models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while building a content record
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record '{0}' has no slug")]
    MissingSlug(String),
}

/// Content category, derived from the front-matter `templateKey`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Category {
    BlogPost,
    Project,
    /// A template key with no built-in meaning
    Other(String),
}

impl Category {
    /// Map a template key onto a category
    pub fn from_template_key(key: &str) -> Self {
        match key {
            "blog-post" => Category::BlogPost,
            "project" => Category::Project,
            other => Category::Other(other.to_string()),
        }
    }

    /// The front-matter key this category was read from
    pub fn template_key(&self) -> &str {
        match self {
            Category::BlogPost => "blog-post",
            Category::Project => "project",
            Category::Other(key) => key,
        }
    }

    /// Name of the group in a content query result
    pub fn group_name(&self) -> &str {
        match self {
            Category::BlogPost => "blogs",
            Category::Project => "projects",
            Category::Other(key) => key,
        }
    }

    /// Known categories sort ahead of unknown ones
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Category::BlogPost => 0,
            Category::Project => 1,
            Category::Other(_) => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_key())
    }
}

impl From<String> for Category {
    fn from(key: String) -> Self {
        Category::from_template_key(&key)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.template_key().to_string()
    }
}

/// A published content item (blog post or project)
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    /// URL fragment, unique across the site
    pub slug: String,

    pub category: Category,

    /// Publication date, used for ordering
    pub date: DateTime<Local>,

    pub title: String,

    pub excerpt: Option<String>,

    pub tags: Vec<String>,

    /// Estimated minutes to read the body
    pub reading_time: usize,

    /// Source file path relative to the content directory
    pub source: String,
}

impl ContentRecord {
    /// Create a record, rejecting an empty slug
    pub fn new(
        slug: impl Into<String>,
        category: Category,
        date: DateTime<Local>,
        title: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let slug = slug.into();
        let title = title.into();
        if slug.trim().is_empty() {
            return Err(RecordError::MissingSlug(title));
        }

        Ok(Self {
            slug,
            category,
            date,
            title,
            excerpt: None,
            tags: Vec::new(),
            reading_time: 0,
            source: String::new(),
        })
    }

    /// Reading time as shown on listings, e.g. `3 min read`
    pub fn reading_time_text(&self) -> String {
        format!("{} min read", self.reading_time)
    }
}
