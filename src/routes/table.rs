//! Route table - registered routes and the routes.json manifest

use anyhow::Result;
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::RouteDefinition;

/// File name of the manifest written to the public directory
pub const MANIFEST_FILE: &str = "routes.json";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route for '{0}' has an empty path")]
    EmptyPath(String),

    #[error("Route path '{0}' is already registered")]
    DuplicatePath(String),
}

/// Routes in registration order, unique by path
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: IndexMap<String, RouteDefinition>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one route
    pub fn register(&mut self, route: RouteDefinition) -> Result<(), RouteError> {
        if route.path.trim().is_empty() {
            return Err(RouteError::EmptyPath(route.category.to_string()));
        }
        if self.routes.contains_key(&route.path) {
            return Err(RouteError::DuplicatePath(route.path));
        }

        tracing::debug!("Registered route {}", route.path);
        self.routes.insert(route.path.clone(), route);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&RouteDefinition> {
        self.routes.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Write `routes.json` into `public_dir`, returning its path
    pub fn save(&self, public_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(public_dir)?;
        let path = public_dir.join(MANIFEST_FILE);
        let routes: Vec<_> = self.iter().collect();
        fs::write(&path, serde_json::to_string_pretty(&routes)?)?;
        Ok(path)
    }

    /// Read a manifest written by [`RouteTable::save`]
    pub fn load(public_dir: &Path) -> Result<Self> {
        let content = fs::read_to_string(public_dir.join(MANIFEST_FILE))?;
        let routes: Vec<RouteDefinition> = serde_json::from_str(&content)?;
        let mut table = Self::new();
        for route in routes {
            table.register(route)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Category;
    use crate::routes::{RouteContext, TemplateRef};
    use tempfile::TempDir;

    fn detail(path: &str) -> RouteDefinition {
        RouteDefinition {
            path: path.to_string(),
            template: TemplateRef::File("/site/src/templates/blog-post.js".into()),
            context: RouteContext::Detail {
                slug: path.to_string(),
            },
            category: Category::BlogPost,
        }
    }

    #[test]
    fn test_register_keeps_order() {
        let mut table = RouteTable::new();
        table.register(detail("/blog/b/")).unwrap();
        table.register(detail("/blog/a/")).unwrap();
        let paths: Vec<_> = table.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/blog/b/", "/blog/a/"]);
        assert!(table.get("/blog/a/").is_some());
    }

    #[test]
    fn test_empty_path_rejected() {
        let mut table = RouteTable::new();
        let err = table.register(detail("")).unwrap_err();
        assert_eq!(err, RouteError::EmptyPath("blog-post".to_string()));
        assert!(table.is_empty());
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let mut table = RouteTable::new();
        table.register(detail("/blog/a/")).unwrap();
        let err = table.register(detail("/blog/a/")).unwrap_err();
        assert_eq!(err, RouteError::DuplicatePath("/blog/a/".to_string()));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_manifest_format() {
        let tmp = TempDir::new().unwrap();
        let mut table = RouteTable::new();
        table.register(detail("/blog/a/")).unwrap();
        table
            .register(RouteDefinition {
                path: "/talk/".to_string(),
                template: TemplateRef::Unresolved,
                context: RouteContext::Listing {
                    slugs: vec!["/talk/x/".to_string()],
                    skip: 0,
                    limit: 2,
                    current: 1,
                    total: 1,
                },
                category: Category::Other("talk".to_string()),
            })
            .unwrap();

        let path = table.save(tmp.path()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(json[0]["path"], "/blog/a/");
        assert_eq!(json[0]["template"], "/site/src/templates/blog-post.js");
        assert_eq!(json[0]["context"]["slug"], "/blog/a/");
        assert_eq!(json[0]["category"], "blog-post");
        assert!(json[1]["template"].is_null());
        assert_eq!(json[1]["context"]["slugs"][0], "/talk/x/");
        assert_eq!(json[1]["context"]["total"], 1);

        let reloaded = RouteTable::load(tmp.path()).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("/talk/"), table.get("/talk/"));
    }
}
