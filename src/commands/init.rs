//! Initialize a new Folio site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Folio Configuration

# Site
title: Folio

# Directory
source_dir: content
public_dir: public
tag_dir: tags

# Pagination
per_page: 2
pagination_dir: page

# Templates per front-matter templateKey.
# blog-post and project are required.
categories:
  blog-post:
    detail: src/templates/blog-post.js
    listing: src/templates/blog-list.js
    root: /blog/
  project:
    detail: src/templates/project-post.js
    listing: src/templates/project-list.js
    root: /projects/
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("content/blog"))?;
    fs::create_dir_all(target_dir.join("content/projects"))?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }
    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let date = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    let sample_post = format!(
        r#"---
title: Hello World
date: {date}
slug: /blog/hello-world/
templateKey: blog-post
published: true
excerpt: The first post on this site.
tags:
  - meta
---

Welcome! Run `folio generate` to build the route table.
"#
    );
    fs::write(target_dir.join("content/blog/hello-world.md"), sample_post)?;

    let sample_project = format!(
        r#"---
title: First Project
date: {date}
slug: /projects/first-project/
templateKey: project
published: true
---

Describe the project here.
"#
    );
    fs::write(
        target_dir.join("content/projects/first-project.md"),
        sample_project,
    )?;

    tracing::debug!("Scaffolded site in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Folio;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_then_generate() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.config.per_page, 2);

        let table = folio.generate().await.unwrap();
        let paths: Vec<_> = table.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/blog/hello-world/",
                "/blog/",
                "/projects/first-project/",
                "/projects/",
            ]
        );
    }

    #[test]
    fn test_init_refuses_existing_config() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();
        assert!(init_site(tmp.path()).is_err());
    }
}
