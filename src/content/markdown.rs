//! Plain-text summaries of a Markdown body: excerpt and reading time

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Words read per minute
const WORDS_PER_MINUTE: usize = 200;

/// Maximum excerpt length in characters
pub const EXCERPT_LENGTH: usize = 140;

/// Text derived from a content body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodySummary {
    pub word_count: usize,
    /// First prose paragraph, pruned to [`EXCERPT_LENGTH`]
    pub excerpt: Option<String>,
}

impl BodySummary {
    pub fn from_markdown(markdown: &str) -> Self {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;

        let mut word_count = 0;
        let mut excerpt = None;
        let mut paragraph: Option<String> = None;

        for event in Parser::new_ext(markdown, options) {
            match event {
                Event::Start(Tag::Paragraph) if excerpt.is_none() => {
                    paragraph = Some(String::new());
                }
                Event::End(TagEnd::Paragraph) => {
                    if let Some(text) = paragraph.take() {
                        let text = text.trim();
                        if !text.is_empty() && !is_mdx_statement(text) {
                            excerpt = Some(prune(text, EXCERPT_LENGTH));
                        }
                    }
                }
                Event::Text(text) | Event::Code(text) => {
                    word_count += text.split_whitespace().count();
                    if let Some(p) = paragraph.as_mut() {
                        p.push_str(&text);
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    if let Some(p) = paragraph.as_mut() {
                        p.push(' ');
                    }
                }
                _ => {}
            }
        }

        Self {
            word_count,
            excerpt,
        }
    }

    /// Minutes to read, rounded up
    pub fn reading_time(&self) -> usize {
        self.word_count.div_ceil(WORDS_PER_MINUTE)
    }
}

/// MDX `import`/`export` lines parse as paragraphs
fn is_mdx_statement(text: &str) -> bool {
    text.starts_with("import ") || text.starts_with("export ")
}

/// Cut `text` at a word boundary so it fits in `max` characters, adding `…`
fn prune(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let cut: String = text.chars().take(max).collect();
    let cut = match cut.rfind(char::is_whitespace) {
        Some(pos) => &cut[..pos],
        None => cut.as_str(),
    };
    format!("{}…", cut.trim_end_matches(|c: char| c.is_whitespace() || c == ','))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_is_first_paragraph() {
        let body = "# Title\n\nFirst *emphasized* paragraph\nwith `code`.\n\nSecond paragraph.";
        let summary = BodySummary::from_markdown(body);
        assert_eq!(
            summary.excerpt.as_deref(),
            Some("First emphasized paragraph with code.")
        );
    }

    #[test]
    fn test_excerpt_skips_mdx_imports() {
        let body = "import { Chart } from \"../components/Chart\"\n\nActual prose.";
        let summary = BodySummary::from_markdown(body);
        assert_eq!(summary.excerpt.as_deref(), Some("Actual prose."));
    }

    #[test]
    fn test_excerpt_pruned() {
        let body = "word ".repeat(60);
        let excerpt = BodySummary::from_markdown(&body).excerpt.unwrap();
        assert!(excerpt.ends_with("word…"));
        assert!(excerpt.chars().count() <= EXCERPT_LENGTH + 1);
    }

    #[test]
    fn test_no_prose() {
        let summary = BodySummary::from_markdown("```\nlet x = 1;\n```\n");
        assert!(summary.excerpt.is_none());
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(BodySummary::from_markdown("").reading_time(), 0);
        assert_eq!(BodySummary::from_markdown("one two three").reading_time(), 1);
        let long = "word ".repeat(401);
        let summary = BodySummary::from_markdown(&long);
        assert_eq!(summary.word_count, 401);
        assert_eq!(summary.reading_time(), 3);
    }
}
