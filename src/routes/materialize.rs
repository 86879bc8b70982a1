//! Page materializer - one detail route per record plus paginated listings

use indexmap::IndexMap;
use std::num::NonZeroUsize;

use super::{RouteContext, RouteDefinition, TemplateResolver};
use crate::content::{Category, ContentRecord};

/// Build the routes for `records`.
///
/// Records are grouped by category in first-seen order and are not
/// re-sorted. Per category the detail routes come first, in input order,
/// followed by its listing pages in ascending page order.
pub fn materialize(
    records: &[ContentRecord],
    templates: &TemplateResolver,
    per_page: NonZeroUsize,
) -> Vec<RouteDefinition> {
    let mut groups: IndexMap<&Category, Vec<&ContentRecord>> = IndexMap::new();
    for record in records {
        groups.entry(&record.category).or_default().push(record);
    }

    let capacity = records.len() + records.len() / per_page.get() + groups.len();
    let mut routes = Vec::with_capacity(capacity);
    let mut claimed_roots: Vec<String> = Vec::new();

    for (category, group) in groups {
        let resolved = templates.templates_excluding(category, &claimed_roots);
        claimed_roots.push(resolved.root.clone());
        if !resolved.detail.is_resolved() || !resolved.listing.is_resolved() {
            tracing::warn!(
                "No template mapped for category '{}', {} record(s) routed without one",
                category,
                group.len()
            );
        }

        for record in &group {
            routes.push(RouteDefinition {
                path: record.slug.clone(),
                template: resolved.detail.clone(),
                context: RouteContext::Detail {
                    slug: record.slug.clone(),
                },
                category: category.clone(),
            });
        }

        let total = group.len().div_ceil(per_page.get());
        for (index, chunk) in group.chunks(per_page.get()).enumerate() {
            routes.push(RouteDefinition {
                path: listing_path(&resolved.root, templates.pagination_dir(), index),
                template: resolved.listing.clone(),
                context: RouteContext::Listing {
                    slugs: chunk.iter().map(|r| r.slug.clone()).collect(),
                    skip: index * per_page.get(),
                    limit: per_page.get(),
                    current: index + 1,
                    total,
                },
                category: category.clone(),
            });
        }

        tracing::debug!(
            "Materialized {} detail and {} listing route(s) for '{}'",
            group.len(),
            total,
            category
        );
    }

    routes
}

/// Path of listing page `index` (0-based): the root for the first page,
/// `<root><dir><n>/` after that.
pub fn listing_path(root: &str, pagination_dir: &str, index: usize) -> String {
    if index == 0 {
        root.to_string()
    } else {
        format!("{}{}{}/", root, pagination_dir, index + 1)
    }
}
