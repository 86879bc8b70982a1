//! Category to template resolution

use indexmap::IndexMap;
use std::path::Path;

use super::TemplateRef;
use crate::config::{CategoryConfig, ConfigError, SiteConfig};
use crate::content::Category;

/// Resolved templates and listing root for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTemplates {
    pub detail: TemplateRef,
    pub listing: TemplateRef,
    /// Always starts and ends with `/`
    pub root: String,
}

impl CategoryTemplates {
    fn resolve(config: &CategoryConfig, base_dir: &Path) -> Self {
        Self {
            detail: resolve_file(&config.detail, base_dir),
            listing: resolve_file(&config.listing, base_dir),
            root: normalize_root(&config.root),
        }
    }

    fn unresolved(root: String) -> Self {
        Self {
            detail: TemplateRef::Unresolved,
            listing: TemplateRef::Unresolved,
            root,
        }
    }
}

/// Static category mapping, resolved once per build
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    blog: CategoryTemplates,
    project: CategoryTemplates,
    others: IndexMap<String, CategoryTemplates>,
    pagination_dir: String,
}

impl TemplateResolver {
    /// Resolve template files against `base_dir`. Both built-in categories
    /// must be mapped.
    pub fn from_config(config: &SiteConfig, base_dir: &Path) -> Result<Self, ConfigError> {
        let blog = CategoryTemplates::resolve(
            config.category(Category::BlogPost.template_key())?,
            base_dir,
        );
        let project = CategoryTemplates::resolve(
            config.category(Category::Project.template_key())?,
            base_dir,
        );

        let others = config
            .categories
            .iter()
            .filter(|(key, _)| matches!(Category::from_template_key(key), Category::Other(_)))
            .map(|(key, c)| (key.clone(), CategoryTemplates::resolve(c, base_dir)))
            .collect();

        Ok(Self {
            blog,
            project,
            others,
            pagination_dir: config.pagination_dir.trim_matches('/').to_string(),
        })
    }

    /// Templates for a category. Unmapped keys get `TemplateRef::Unresolved`
    /// and a root derived from the key.
    pub fn templates(&self, category: &Category) -> CategoryTemplates {
        self.templates_excluding(category, &[])
    }

    /// Like [`TemplateResolver::templates`], but a root derived for an
    /// unmapped key also avoids `claimed` roots.
    pub fn templates_excluding(
        &self,
        category: &Category,
        claimed: &[String],
    ) -> CategoryTemplates {
        match category {
            Category::BlogPost => self.blog.clone(),
            Category::Project => self.project.clone(),
            Category::Other(key) => match self.others.get(key) {
                Some(templates) => templates.clone(),
                None => CategoryTemplates::unresolved(self.unmapped_root(key, claimed)),
            },
        }
    }

    /// `/<key>/`, or `/<key>-<n>/` when that is already a listing root
    fn unmapped_root(&self, key: &str, claimed: &[String]) -> String {
        let mut base = slug::slugify(key);
        if base.is_empty() {
            base = "category".to_string();
        }

        let preferred = normalize_root(&base);
        let mut root = preferred.clone();
        let mut n = 2;
        while self.is_root_taken(&root, claimed) {
            root = normalize_root(&format!("{}-{}", base, n));
            n += 1;
        }

        if root != preferred {
            tracing::warn!(
                "Listing root {} is taken, category '{}' is listed under {}",
                preferred,
                key,
                root
            );
        }
        root
    }

    fn is_root_taken(&self, root: &str, claimed: &[String]) -> bool {
        self.blog.root == root
            || self.project.root == root
            || self.others.values().any(|t| t.root == root)
            || claimed.iter().any(|r| r == root)
    }

    pub fn pagination_dir(&self) -> &str {
        &self.pagination_dir
    }
}

fn resolve_file(file: &str, base_dir: &Path) -> TemplateRef {
    if file.trim().is_empty() {
        TemplateRef::Unresolved
    } else {
        TemplateRef::File(base_dir.join(file))
    }
}

/// `blog` -> `/blog/`, empty -> `/`
fn normalize_root(root: &str) -> String {
    let trimmed = root.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}
