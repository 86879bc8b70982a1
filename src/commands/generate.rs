//! Generate the route table

use anyhow::Result;

use crate::content::{Category, ContentGraph, ContentLoader, ContentRecord};
use crate::routes::{materialize, RouteTable, TemplateResolver};
use crate::Folio;

/// Query content, materialize routes and write `routes.json`
pub async fn run(folio: &Folio) -> Result<RouteTable> {
    let start = std::time::Instant::now();

    tracing::debug!("Building routes for {}", folio.config.title);
    let graph = ContentLoader::new(folio).query().await?;
    tracing::info!(
        "Loaded {} blog posts and {} projects ({} records total)",
        graph.nodes(&Category::BlogPost).len(),
        graph.nodes(&Category::Project).len(),
        graph.len()
    );

    let table = build_routes(folio, &graph)?;
    let manifest = table.save(&folio.public_dir)?;

    let duration = start.elapsed();
    tracing::info!(
        "Wrote {} routes to {:?} in {:.2}s",
        table.len(),
        manifest,
        duration.as_secs_f64()
    );

    Ok(table)
}

/// Materialize and register the routes for a loaded content graph
pub fn build_routes(folio: &Folio, graph: &ContentGraph) -> Result<RouteTable> {
    let per_page = folio.config.page_size()?;
    let templates = TemplateResolver::from_config(&folio.config, &folio.base_dir)?;

    let records: Vec<ContentRecord> = graph.records().cloned().collect();

    let mut table = RouteTable::new();
    for route in materialize(&records, &templates, per_page) {
        table.register(route)?;
    }

    Ok(table)
}
