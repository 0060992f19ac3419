//! Plain-text excerpts of markdown summaries for board cards.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum excerpt length in characters, ellipsis included.
pub const EXCERPT_MAX_CHARS: usize = 160;
const ELLIPSIS: &str = "...";

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\*_`#>~\[\]]+").expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Strips markdown decoration and collapses whitespace.
///
/// Images are dropped, links keep their label. Returns `None` when nothing
/// readable remains.
pub fn markdown_excerpt(markdown: &str) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(markdown, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.chars().count() <= EXCERPT_MAX_CHARS {
        return Some(trimmed.to_string());
    }
    let mut excerpt: String = trimmed
        .chars()
        .take(EXCERPT_MAX_CHARS - ELLIPSIS.len())
        .collect();
    excerpt.push_str(ELLIPSIS);
    Some(excerpt)
}

#[cfg(test)]
mod tests {
    use super::{markdown_excerpt, EXCERPT_MAX_CHARS};

    #[test]
    fn strips_headings_emphasis_and_images() {
        let summary = "# Pods\n\n![diagram](pod.png) **Unidad** mínima, ver [docs](https://k8s.io)";
        let excerpt = markdown_excerpt(summary).expect("excerpt should exist");
        assert_eq!(excerpt, "Pods Unidad mínima, ver docs");
    }

    #[test]
    fn keeps_command_flags_intact() {
        let excerpt = markdown_excerpt("`docker run --rm -it alpine`").expect("excerpt");
        assert_eq!(excerpt, "docker run --rm -it alpine");
    }

    #[test]
    fn truncates_long_summaries() {
        let long = "ñ".repeat(EXCERPT_MAX_CHARS + 10);
        let excerpt = markdown_excerpt(&long).expect("excerpt");
        assert_eq!(excerpt.chars().count(), EXCERPT_MAX_CHARS);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn summary_of_exactly_max_length_is_kept_whole() {
        let exact = "b".repeat(EXCERPT_MAX_CHARS);
        assert_eq!(markdown_excerpt(&exact).as_deref(), Some(exact.as_str()));
    }

    #[test]
    fn symbols_only_yields_none() {
        assert_eq!(markdown_excerpt("## **"), None);
    }
}
