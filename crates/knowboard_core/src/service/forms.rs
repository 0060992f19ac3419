//! Edit-form state for topic and subtopic panels.
//!
//! Forms hold raw field text as typed by the user and turn into typed
//! patches on save.

use crate::model::topic::{
    parse_tags, Subtopic, SubtopicPatch, Topic, TopicPatch, NEW_TOPIC_COLOR,
};

/// Editable fields of a topic panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicForm {
    pub title: String,
    pub summary: String,
    /// Comma-separated tags.
    pub tags: String,
    pub icon: String,
    pub color: String,
}

impl TopicForm {
    /// Prefills the form from the stored topic.
    ///
    /// An empty color falls back to the placeholder gradient. A record stored
    /// without `color` deserializes to the empty string, so absent and empty
    /// colors are treated the same.
    pub fn from_topic(topic: &Topic) -> Self {
        let color = if topic.color.is_empty() {
            NEW_TOPIC_COLOR.to_string()
        } else {
            topic.color.clone()
        };
        Self {
            title: topic.title.clone(),
            summary: topic.summary.clone(),
            tags: topic.tags_input(),
            icon: topic.icon.clone(),
            color,
        }
    }

    /// Tags as they will be saved.
    pub fn parsed_tags(&self) -> Vec<String> {
        parse_tags(&self.tags)
    }

    /// Every field is submitted; blank titles are dropped by the patch.
    pub fn to_patch(&self) -> TopicPatch {
        TopicPatch {
            title: Some(self.title.clone()),
            icon: Some(self.icon.clone()),
            color: Some(self.color.clone()),
            summary: Some(self.summary.clone()),
            tags: Some(self.parsed_tags()),
        }
    }
}

/// Editable fields of a subtopic panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtopicForm {
    pub title: String,
    pub summary: String,
}

impl SubtopicForm {
    pub fn from_subtopic(subtopic: &Subtopic) -> Self {
        Self {
            title: subtopic.title.clone(),
            summary: subtopic.summary.clone(),
        }
    }

    pub fn to_patch(&self) -> SubtopicPatch {
        SubtopicPatch {
            title: Some(self.title.clone()),
            summary: Some(self.summary.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SubtopicForm, TopicForm};
    use crate::model::seed::seed_topics;

    #[test]
    fn topic_form_round_trips_tags_through_text() {
        let topic = &seed_topics()[0];
        let mut form = TopicForm::from_topic(topic);
        assert_eq!(form.tags, "cloud, aws");

        form.tags = "cloud,  aws, , storage".to_string();
        let patch = form.to_patch();
        assert_eq!(
            patch.tags,
            Some(vec![
                "cloud".to_string(),
                "aws".to_string(),
                "storage".to_string()
            ])
        );
    }

    #[test]
    fn topic_form_defaults_empty_color() {
        let mut topic = seed_topics()[0].clone();
        topic.color.clear();
        let form = TopicForm::from_topic(&topic);
        assert_eq!(form.color, "from-slate-500/40 to-slate-700/30");
    }

    #[test]
    fn subtopic_form_submits_both_fields() {
        let sub = &seed_topics()[0].subtopics[0];
        let form = SubtopicForm::from_subtopic(sub);
        let patch = form.to_patch();
        assert_eq!(patch.title.as_deref(), Some("EC2"));
        assert_eq!(patch.summary.as_deref(), Some(sub.summary.as_str()));
    }
}
