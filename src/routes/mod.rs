//! Routes module - turns content records into the site's route table

mod materialize;
mod table;
mod templates;

pub use materialize::{listing_path, materialize};
pub use table::{RouteError, RouteTable};
pub use templates::{CategoryTemplates, TemplateResolver};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::content::Category;

/// Template a route renders with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateRef {
    /// Absolute path of a template file
    File(PathBuf),
    /// No template is mapped for the route's category
    Unresolved,
}

impl TemplateRef {
    pub fn is_resolved(&self) -> bool {
        matches!(self, TemplateRef::File(_))
    }
}

/// Data handed to the template when the route is rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteContext {
    /// A single record's page
    Detail { slug: String },
    /// One page of a category listing
    Listing {
        slugs: Vec<String>,
        skip: usize,
        limit: usize,
        /// 1-based page number
        current: usize,
        total: usize,
    },
}

/// One generated site route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    pub path: String,
    pub template: TemplateRef,
    pub context: RouteContext,
    pub category: Category,
}

impl RouteDefinition {
    pub fn is_listing(&self) -> bool {
        matches!(self.context, RouteContext::Listing { .. })
    }
}
