//! Topic and subtopic domain model.
//!
//! # Responsibility
//! - Define the canonical card records persisted and exported by the board.
//! - Apply typed partial patches with merge semantics.
//!
//! # Invariants
//! - `id` never changes after creation; patches cannot touch it.
//! - A subtopic is owned by exactly one topic (`Topic::subtopics`).
//! - A patched title is stored trimmed; blank titles keep the prior value.

use crate::model::excerpt::markdown_excerpt;
use serde::{Deserialize, Serialize};

/// Placeholder values for a freshly created topic.
pub const NEW_TOPIC_TITLE: &str = "Nuevo Tema";
pub const NEW_TOPIC_ICON: &str = "aws.svg";
pub const NEW_TOPIC_COLOR: &str = "from-slate-500/40 to-slate-700/30";
pub const NEW_TOPIC_SUMMARY: &str = "Agrega una descripción en markdown.";

/// Placeholder values for a freshly created subtopic.
pub const NEW_SUBTOPIC_TITLE: &str = "Nuevo Subtema";
pub const NEW_SUBTOPIC_SUMMARY: &str = "Describe brevemente el concepto o comandos relevantes.";

/// Identifier of a topic. Unique across the whole board.
pub type TopicId = String;

/// Identifier of a subtopic. Unique within its parent topic.
pub type SubtopicId = String;

/// Top-level card of the board.
///
/// Every field except `id` and `title` may be absent in stored or imported
/// documents and defaults to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    /// Emoji or image reference.
    #[serde(default)]
    pub icon: String,
    /// Gradient token, purely cosmetic.
    #[serde(default)]
    pub color: String,
    /// Markdown body.
    #[serde(default)]
    pub summary: String,
    /// Ordered; duplicates are kept as entered.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ordered by insertion.
    #[serde(default)]
    pub subtopics: Vec<Subtopic>,
}

/// Child card owned by one [`Topic`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtopic {
    pub id: SubtopicId,
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

/// Partial update for a topic. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicPatch {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Partial update for a subtopic. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtopicPatch {
    pub title: Option<String>,
    pub summary: Option<String>,
}

/// How a topic icon should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    /// Short glyph rendered inline.
    Emoji,
    /// Path or URL of an image asset.
    Image,
    /// No icon set.
    None,
}

impl Topic {
    /// Creates a topic with placeholder content and no subtopics.
    pub fn placeholder(id: impl Into<TopicId>) -> Self {
        Self {
            id: id.into(),
            title: NEW_TOPIC_TITLE.to_string(),
            icon: NEW_TOPIC_ICON.to_string(),
            color: NEW_TOPIC_COLOR.to_string(),
            summary: NEW_TOPIC_SUMMARY.to_string(),
            tags: Vec::new(),
            subtopics: Vec::new(),
        }
    }

    /// Merges `patch` into this topic.
    ///
    /// Returns whether any field value actually changed.
    pub fn apply_patch(&mut self, patch: &TopicPatch) -> bool {
        let before = self.clone();

        if let Some(title) = patch.title.as_deref().and_then(normalize_title) {
            self.title = title;
        }
        if let Some(icon) = &patch.icon {
            self.icon.clone_from(icon);
        }
        if let Some(color) = &patch.color {
            self.color.clone_from(color);
        }
        if let Some(summary) = &patch.summary {
            self.summary.clone_from(summary);
        }
        if let Some(tags) = &patch.tags {
            self.tags.clone_from(tags);
        }

        *self != before
    }

    pub fn subtopic(&self, subtopic_id: &str) -> Option<&Subtopic> {
        self.subtopics.iter().find(|sub| sub.id == subtopic_id)
    }

    pub fn icon_kind(&self) -> IconKind {
        classify_icon(&self.icon)
    }

    /// Plain-text summary excerpt used on board cards.
    pub fn card_excerpt(&self) -> Option<String> {
        markdown_excerpt(&self.summary)
    }

    /// Tags joined for a single-line edit field.
    pub fn tags_input(&self) -> String {
        self.tags.join(", ")
    }
}

impl Subtopic {
    /// Creates a subtopic with placeholder content.
    pub fn placeholder(id: impl Into<SubtopicId>) -> Self {
        Self {
            id: id.into(),
            title: NEW_SUBTOPIC_TITLE.to_string(),
            summary: NEW_SUBTOPIC_SUMMARY.to_string(),
        }
    }

    /// Merges `patch` into this subtopic. Returns whether anything changed.
    pub fn apply_patch(&mut self, patch: &SubtopicPatch) -> bool {
        let before = self.clone();

        if let Some(title) = patch.title.as_deref().and_then(normalize_title) {
            self.title = title;
        }
        if let Some(summary) = &patch.summary {
            self.summary.clone_from(summary);
        }

        *self != before
    }
}

/// Returns the trimmed title, or `None` when nothing but whitespace is left.
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Splits a comma-separated tag field into tags.
///
/// Parts are trimmed and empty parts dropped. Duplicates are kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classifies an icon value.
///
/// Emoji are at most three UTF-16 code units and look nothing like a path.
pub fn classify_icon(icon: &str) -> IconKind {
    if icon.is_empty() {
        return IconKind::None;
    }
    let short = icon.encode_utf16().count() <= 3;
    if short && !icon.contains('/') && !icon.contains('.') {
        IconKind::Emoji
    } else {
        IconKind::Image
    }
}

#[cfg(test)]
mod tests {
    use super::{
        classify_icon, normalize_title, parse_tags, IconKind, Subtopic, SubtopicPatch, Topic,
        TopicPatch, NEW_TOPIC_TITLE,
    };

    #[test]
    fn patch_keeps_unspecified_fields() {
        let mut topic = Topic::placeholder("topic-1");
        topic.tags = vec!["cloud".to_string()];

        let changed = topic.apply_patch(&TopicPatch {
            summary: Some("new body".to_string()),
            ..TopicPatch::default()
        });

        assert!(changed);
        assert_eq!(topic.summary, "new body");
        assert_eq!(topic.title, NEW_TOPIC_TITLE);
        assert_eq!(topic.tags, vec!["cloud".to_string()]);
    }

    #[test]
    fn blank_title_is_ignored_and_real_title_is_trimmed() {
        let mut sub = Subtopic::placeholder("subtopic-1");
        let changed = sub.apply_patch(&SubtopicPatch {
            title: Some("   ".to_string()),
            summary: None,
        });
        assert!(!changed);
        assert_eq!(sub.title, "Nuevo Subtema");

        sub.apply_patch(&SubtopicPatch {
            title: Some("  EC2 ".to_string()),
            summary: None,
        });
        assert_eq!(sub.title, "EC2");
    }

    #[test]
    fn empty_summary_is_accepted() {
        let mut topic = Topic::placeholder("topic-1");
        topic.apply_patch(&TopicPatch {
            summary: Some(String::new()),
            ..TopicPatch::default()
        });
        assert_eq!(topic.summary, "");
        assert_eq!(topic.card_excerpt(), None);
    }

    #[test]
    fn parse_tags_trims_and_keeps_duplicates() {
        assert_eq!(
            parse_tags(" cloud, ,aws ,cloud,"),
            vec!["cloud".to_string(), "aws".to_string(), "cloud".to_string()]
        );
        assert!(parse_tags("  ").is_empty());
    }

    #[test]
    fn icon_classification() {
        assert_eq!(classify_icon("🐳"), IconKind::Emoji);
        assert_eq!(classify_icon("aws.svg"), IconKind::Image);
        assert_eq!(classify_icon("/icons/k8s"), IconKind::Image);
        assert_eq!(classify_icon("abcd"), IconKind::Image);
        assert_eq!(classify_icon(""), IconKind::None);
    }

    #[test]
    fn normalize_title_rejects_whitespace() {
        assert_eq!(normalize_title("\t \n"), None);
        assert_eq!(normalize_title(" AWS ").as_deref(), Some("AWS"));
    }
}
