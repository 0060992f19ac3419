//! Case-insensitive substring filter over the topic collection.
//!
//! # Invariants
//! - Output order is the input order; nothing is ranked.
//! - A blank query returns every topic.
//! - Pure: no caching, no side effects.

use crate::model::topic::Topic;

/// Trims and lowercases raw search input.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Returns topics whose title, any tag or any subtopic title contains `query`.
pub fn filter_topics<'a>(topics: &'a [Topic], query: &str) -> Vec<&'a Topic> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return topics.iter().collect();
    }
    topics
        .iter()
        .filter(|topic| topic_matches(topic, &needle))
        .collect()
}

/// Whether `topic` matches an already normalized, non-empty `needle`.
pub fn topic_matches(topic: &Topic, needle: &str) -> bool {
    contains_folded(&topic.title, needle)
        || topic.tags.iter().any(|tag| contains_folded(tag, needle))
        || topic
            .subtopics
            .iter()
            .any(|sub| contains_folded(&sub.title, needle))
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::filter_topics;
    use crate::model::seed::seed_topics;

    fn ids(topics: &[&crate::model::topic::Topic]) -> Vec<String> {
        topics.iter().map(|topic| topic.id.clone()).collect()
    }

    #[test]
    fn subtopic_title_match_returns_parent() {
        let topics = seed_topics();
        assert_eq!(ids(&filter_topics(&topics, "s3")), vec!["topic-aws"]);
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        let topics = seed_topics();
        let all = filter_topics(&topics, "   ");
        assert_eq!(
            ids(&all),
            vec!["topic-aws", "topic-docker", "topic-kubernetes"]
        );
        assert_eq!(filter_topics(&topics, "").len(), 3);
    }

    #[test]
    fn tag_and_title_matching_is_case_insensitive() {
        let topics = seed_topics();
        assert_eq!(ids(&filter_topics(&topics, " K8S ")), vec!["topic-kubernetes"]);
        assert_eq!(ids(&filter_topics(&topics, "DOCK")), vec!["topic-docker"]);
        assert_eq!(
            ids(&filter_topics(&topics, "ervice")),
            vec!["topic-kubernetes"]
        );
    }

    #[test]
    fn summary_text_is_not_searched() {
        let topics = seed_topics();
        assert!(filter_topics(&topics, "almacenamiento").is_empty());
        assert!(filter_topics(&topics, "terraform").is_empty());
    }

    #[test]
    fn multiple_matches_keep_source_order() {
        let topics = seed_topics();
        // AWS and Kubernetes match by title, Docker by its "containers" tag.
        assert_eq!(
            ids(&filter_topics(&topics, "s")),
            vec!["topic-aws", "topic-docker", "topic-kubernetes"]
        );
    }
}
