//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::{Category, ContentGraph, ContentLoader};
use crate::routes::TemplateRef;
use crate::Folio;

/// List site content by type
pub async fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let graph = ContentLoader::new(folio).query().await?;

    match content_type {
        "post" | "posts" => print_records("Posts", &graph, &Category::BlogPost),
        "project" | "projects" => print_records("Projects", &graph, &Category::Project),
        "route" | "routes" => {
            let table = super::generate::build_routes(folio, &graph)?;
            println!("Routes ({}):", table.len());
            for route in table.iter() {
                let template = match &route.template {
                    TemplateRef::File(path) => path.display().to_string(),
                    TemplateRef::Unresolved => "<no template>".to_string(),
                };
                println!("  {} -> {}", route.path, template);
            }
        }
        "tag" | "tags" => {
            let tags = tag_counts(&graph);
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!(
                    "  {} ({}) /blog/{}/{}/",
                    tag,
                    count,
                    folio.config.tag_dir.trim_matches('/'),
                    slug::slugify(&tag)
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, project, route, tag",
                content_type
            );
        }
    }

    Ok(())
}

fn print_records(label: &str, graph: &ContentGraph, category: &Category) {
    let records = graph.nodes(category);
    println!("{} ({}):", label, records.len());
    for record in records {
        println!(
            "  {} - {} [{}] ({})",
            record.date.format("%Y-%m-%d"),
            record.title,
            record.slug,
            record.reading_time_text()
        );
        if let Some(excerpt) = &record.excerpt {
            println!("      {}", excerpt);
        }
    }
}

/// Blog post tags with their use count, most used first
fn tag_counts(graph: &ContentGraph) -> Vec<(String, usize)> {
    let mut tags: HashMap<String, usize> = HashMap::new();
    for record in graph.nodes(&Category::BlogPost) {
        for tag in &record.tags {
            *tags.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<_> = tags.into_iter().collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    tags
}
