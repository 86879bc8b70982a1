//! Front-matter parsing

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Accepts `tags: rust` as well as `tags: [rust, cli]`
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut tags = Vec::new();
            while let Some(tag) = seq.next_element::<String>()? {
                tags.push(tag);
            }
            Ok(tags)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter of a content file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub slug: Option<String>,
    /// Category key such as `blog-post` or `project`
    #[serde(rename = "templateKey")]
    pub template_key: Option<String>,
    /// Only an explicit `published: true` makes a record visible
    pub published: bool,
    pub excerpt: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split a file into its front-matter and body
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        if let Some(rest) = content.strip_prefix("---") {
            return Self::parse_yaml(rest, content);
        }

        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml<'a>(rest: &'a str, original: &'a str) -> Result<(Self, &'a str)> {
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // Unterminated block is body text
            return Ok((FrontMatter::default(), original));
        };

        let yaml = &rest[..end_pos];
        let body = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        match serde_yaml::from_str::<FrontMatter>(yaml) {
            Ok(fm) => Ok((fm, body)),
            Err(e) => {
                tracing::warn!("Failed to parse YAML front-matter, treating as content: {}", e);
                Ok((FrontMatter::default(), original))
            }
        }
    }

    fn parse_json(content: &str) -> Result<(Self, &str)> {
        if let Some(rest) = content.strip_prefix(";;;") {
            let end_pos = rest
                .find(";;;")
                .ok_or_else(|| anyhow!("Unterminated JSON front-matter"))?;
            let fm: FrontMatter = serde_json::from_str(&rest[..end_pos])
                .map_err(|e| anyhow!("Failed to parse JSON front-matter: {}", e))?;
            return Ok((fm, rest[end_pos + 3..].trim_start_matches(['\n', '\r'])));
        }

        // Bare object: the stream reports where the first value ends
        let mut stream = serde_json::Deserializer::from_str(content).into_iter::<FrontMatter>();
        match stream.next() {
            Some(Ok(fm)) => {
                let body = &content[stream.byte_offset()..];
                Ok((fm, body.trim_start_matches(['\n', '\r'])))
            }
            Some(Err(e)) => Err(anyhow!("Failed to parse JSON front-matter: {}", e)),
            None => Err(anyhow!("Invalid JSON front-matter")),
        }
    }

    /// Parse the `date` field
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date in the formats content files commonly use
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    const DATETIME_FORMATS: [&str; 5] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&dt).earliest();
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&d.and_hms_opt(0, 0, 0)?).earliest();
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
slug: /blog/hello-world/
templateKey: blog-post
published: true
tags:
  - rust
  - gatsby
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.slug.as_deref(), Some("/blog/hello-world/"));
        assert_eq!(fm.template_key.as_deref(), Some("blog-post"));
        assert!(fm.published);
        assert_eq!(fm.tags, vec!["rust", "gatsby"]);
        assert!(body.starts_with("This is the content."));
    }

    #[test]
    fn test_published_defaults_to_false() {
        let content = "---\ntitle: Draft\ntemplateKey: project\n---\nbody\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(!fm.published);
    }

    #[test]
    fn test_single_string_tag() {
        let content = "---\ntitle: One Tag\ntags: Notes\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#";;;
{"title": "Json Post", "slug": "/blog/json/", "published": true}
;;;
Body text.
"#;
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Json Post"));
        assert_eq!(fm.slug.as_deref(), Some("/blog/json/"));
        assert!(body.contains("Body text."));
    }

    #[test]
    fn test_parse_bare_json_object() {
        let content = "{\"title\": \"Bare\", \"tags\": [\"a\", \"b\"]}\n\nText.";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert_eq!(body, "Text.");
    }

    #[test]
    fn test_bare_json_with_brace_in_string() {
        let content = "{\"title\": \"a } b\", \"slug\": \"/blog/{x}/\"}\nBody.";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("a } b"));
        assert_eq!(fm.slug.as_deref(), Some("/blog/{x}/"));
        assert_eq!(body, "Body.");
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = FrontMatter::parse("# Just a heading\n").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, "# Just a heading\n");
    }

    #[test]
    fn test_unterminated_yaml_is_content() {
        let content = "---\ntitle: Never closed\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_parse_date_formats() {
        for raw in [
            "2024-01-15",
            "2024/01/15",
            "2024-01-15 10:30:00",
            "2024-01-15T10:30:00",
        ] {
            let fm = FrontMatter {
                date: Some(raw.to_string()),
                ..Default::default()
            };
            let dt = fm.parse_date().unwrap();
            assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15", "{raw}");
        }
    }

    #[test]
    fn test_parse_invalid_date() {
        let fm = FrontMatter {
            date: Some("next tuesday".to_string()),
            ..Default::default()
        };
        assert!(fm.parse_date().is_none());
    }
}
