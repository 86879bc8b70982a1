//! Content loader - queries published records from the content directory

use anyhow::Result;
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{BodySummary, Category, ContentRecord, FrontMatter};
use crate::Folio;

/// Published records grouped by category, each group newest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentGraph {
    groups: IndexMap<Category, Vec<ContentRecord>>,
}

impl ContentGraph {
    /// Group records that are already sorted. Known categories come first,
    /// the rest keep their first-seen order.
    pub fn from_sorted(records: Vec<ContentRecord>) -> Self {
        let mut groups: IndexMap<Category, Vec<ContentRecord>> = IndexMap::new();
        for record in records {
            groups
                .entry(record.category.clone())
                .or_default()
                .push(record);
        }
        groups.sort_by(|a, _, b, _| a.rank().cmp(&b.rank()));
        Self { groups }
    }

    /// Records of one category, empty when there are none
    pub fn nodes(&self, category: &Category) -> &[ContentRecord] {
        self.groups
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate over (category, records) groups
    pub fn groups(&self) -> impl Iterator<Item = (&Category, &[ContentRecord])> {
        self.groups.iter().map(|(c, r)| (c, r.as_slice()))
    }

    /// All records, group by group
    pub fn records(&self) -> impl Iterator<Item = &ContentRecord> {
        self.groups.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Loads content records from the source directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Load every published record, sorted by date descending and grouped by category
    pub async fn query(&self) -> Result<ContentGraph> {
        let source_dir = &self.folio.source_dir;
        if !source_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", source_dir);
            return Ok(ContentGraph::default());
        }

        let mut records = Vec::new();
        for path in content_files(source_dir) {
            match self.load_record(&path).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => tracing::warn!("Failed to load {:?}: {}", path, e),
            }
        }

        // Stable, so equal dates keep walk order
        records.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(ContentGraph::from_sorted(records))
    }

    /// Load one file, `None` when it is unpublished or not categorized
    async fn load_record(&self, path: &Path) -> Result<Option<ContentRecord>> {
        let content = tokio::fs::read_to_string(path).await?;
        let modified = tokio::fs::metadata(path)
            .await?
            .modified()
            .ok()
            .map(DateTime::<Local>::from);

        let source = path
            .strip_prefix(&self.folio.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        parse_record(&source, &content, modified)
    }
}

/// Build a record from a file's text
pub fn parse_record(
    source: &str,
    content: &str,
    modified: Option<DateTime<Local>>,
) -> Result<Option<ContentRecord>> {
    let (fm, body) = FrontMatter::parse(content)?;

    let Some(key) = fm.template_key.as_deref() else {
        tracing::debug!("Skipping {}: no templateKey", source);
        return Ok(None);
    };

    if !fm.published {
        tracing::debug!("Skipping unpublished {}", source);
        return Ok(None);
    }

    let date = fm
        .parse_date()
        .unwrap_or_else(|| modified.unwrap_or_else(Local::now));

    let title = fm.title.clone().unwrap_or_else(|| {
        Path::new(source)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Untitled")
            .to_string()
    });

    let mut record = ContentRecord::new(
        fm.slug.clone().unwrap_or_default(),
        Category::from_template_key(key),
        date,
        title,
    )?;
    let summary = BodySummary::from_markdown(body);
    record.reading_time = summary.reading_time();
    record.excerpt = fm.excerpt.or(summary.excerpt);
    record.tags = fm.tags;
    record.source = source.to_string();

    Ok(Some(record))
}

/// Markdown files under `dir`, in a stable order
fn content_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_content_file(p))
        .collect()
}

/// Check if a file is a markdown (or MDX) file
fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e, "md" | "mdx" | "markdown"))
        .unwrap_or(false)
}
