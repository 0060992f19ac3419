//! Snapshot transformations for topics and subtopics.
//!
//! # Responsibility
//! - Turn one snapshot plus one [`BoardAction`] into the next snapshot.
//! - Keep id uniqueness, exclusive ownership and cascade delete intact.
//!
//! # Invariants
//! - The input snapshot is never mutated; callers keep it on error.
//! - Actions naming an unknown id are no-ops (`changed == false`).
//! - New entities are appended at the end of their sequence.

use crate::model::id::{new_subtopic_id, new_topic_id, IdError, IdGenerator};
use crate::model::topic::{Subtopic, SubtopicPatch, Topic, TopicPatch};
use log::debug;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from snapshot transformations.
#[derive(Debug)]
pub enum RepoError {
    /// Identifier generation failed; the create was aborted.
    Id(IdError),
    /// An id would appear twice in its scope.
    DuplicateId(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "duplicate id: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Id(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<IdError> for RepoError {
    fn from(value: IdError) -> Self {
        Self::Id(value)
    }
}

/// One mutation of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    AddTopic,
    UpdateTopic {
        topic_id: String,
        patch: TopicPatch,
    },
    DeleteTopic {
        topic_id: String,
    },
    AddSubtopic {
        topic_id: String,
    },
    UpdateSubtopic {
        topic_id: String,
        subtopic_id: String,
        patch: SubtopicPatch,
    },
    DeleteSubtopic {
        topic_id: String,
        subtopic_id: String,
    },
    /// Wholesale replacement with an already validated collection.
    ReplaceAll {
        topics: Vec<Topic>,
    },
}

impl BoardAction {
    /// Short stable name for log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddTopic => "add_topic",
            Self::UpdateTopic { .. } => "update_topic",
            Self::DeleteTopic { .. } => "delete_topic",
            Self::AddSubtopic { .. } => "add_subtopic",
            Self::UpdateSubtopic { .. } => "update_subtopic",
            Self::DeleteSubtopic { .. } => "delete_subtopic",
            Self::ReplaceAll { .. } => "replace_all",
        }
    }
}

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduced {
    pub topics: Vec<Topic>,
    /// `false` when the action left the snapshot as it was.
    pub changed: bool,
    /// Id of the entity created by an add action.
    pub created_id: Option<String>,
}

impl Reduced {
    fn unchanged(topics: &[Topic]) -> Self {
        Self {
            topics: topics.to_vec(),
            changed: false,
            created_id: None,
        }
    }

    fn changed(topics: Vec<Topic>) -> Self {
        Self {
            topics,
            changed: true,
            created_id: None,
        }
    }
}

/// Applies `action` to `topics` and returns the next snapshot.
///
/// # Errors
/// - `RepoError::Id` when an add action cannot obtain a secure id.
/// - `RepoError::DuplicateId` when a generated or replaced id collides.
pub fn reduce(
    topics: &[Topic],
    action: BoardAction,
    ids: &dyn IdGenerator,
) -> RepoResult<Reduced> {
    let action_name = action.name();
    let reduced = match action {
        BoardAction::AddTopic => add_topic(topics, ids)?,
        BoardAction::UpdateTopic { topic_id, patch } => update_topic(topics, &topic_id, &patch),
        BoardAction::DeleteTopic { topic_id } => delete_topic(topics, &topic_id),
        BoardAction::AddSubtopic { topic_id } => add_subtopic(topics, &topic_id, ids)?,
        BoardAction::UpdateSubtopic {
            topic_id,
            subtopic_id,
            patch,
        } => update_subtopic(topics, &topic_id, &subtopic_id, &patch),
        BoardAction::DeleteSubtopic {
            topic_id,
            subtopic_id,
        } => delete_subtopic(topics, &topic_id, &subtopic_id),
        BoardAction::ReplaceAll { topics: replacement } => replace_all(topics, replacement)?,
    };
    debug!(
        "event=board_reduce module=repo action={action_name} changed={} topics={}",
        reduced.changed,
        reduced.topics.len()
    );
    Ok(reduced)
}

fn add_topic(topics: &[Topic], ids: &dyn IdGenerator) -> RepoResult<Reduced> {
    let id = new_topic_id(ids)?;
    if topics.iter().any(|topic| topic.id == id) {
        return Err(RepoError::DuplicateId(id));
    }

    let mut next = topics.to_vec();
    next.push(Topic::placeholder(id.clone()));
    Ok(Reduced {
        created_id: Some(id),
        ..Reduced::changed(next)
    })
}

fn update_topic(topics: &[Topic], topic_id: &str, patch: &TopicPatch) -> Reduced {
    let mut next = topics.to_vec();
    let changed = next
        .iter_mut()
        .find(|topic| topic.id == topic_id)
        .is_some_and(|topic| topic.apply_patch(patch));
    Reduced {
        changed,
        ..Reduced::changed(next)
    }
}

fn delete_topic(topics: &[Topic], topic_id: &str) -> Reduced {
    if !topics.iter().any(|topic| topic.id == topic_id) {
        return Reduced::unchanged(topics);
    }
    // Cascade: subtopics are owned by value.
    Reduced::changed(
        topics
            .iter()
            .filter(|topic| topic.id != topic_id)
            .cloned()
            .collect(),
    )
}

fn add_subtopic(topics: &[Topic], topic_id: &str, ids: &dyn IdGenerator) -> RepoResult<Reduced> {
    let Some(index) = topics.iter().position(|topic| topic.id == topic_id) else {
        return Ok(Reduced::unchanged(topics));
    };

    let id = new_subtopic_id(ids)?;
    if topics[index].subtopic(&id).is_some() {
        return Err(RepoError::DuplicateId(id));
    }

    let mut next = topics.to_vec();
    next[index].subtopics.push(Subtopic::placeholder(id.clone()));
    Ok(Reduced {
        created_id: Some(id),
        ..Reduced::changed(next)
    })
}

fn update_subtopic(
    topics: &[Topic],
    topic_id: &str,
    subtopic_id: &str,
    patch: &SubtopicPatch,
) -> Reduced {
    let mut next = topics.to_vec();
    let changed = next
        .iter_mut()
        .find(|topic| topic.id == topic_id)
        .and_then(|topic| topic.subtopics.iter_mut().find(|sub| sub.id == subtopic_id))
        .is_some_and(|sub| sub.apply_patch(patch));
    Reduced {
        changed,
        ..Reduced::changed(next)
    }
}

fn delete_subtopic(topics: &[Topic], topic_id: &str, subtopic_id: &str) -> Reduced {
    let found = topics
        .iter()
        .find(|topic| topic.id == topic_id)
        .is_some_and(|topic| topic.subtopic(subtopic_id).is_some());
    if !found {
        return Reduced::unchanged(topics);
    }

    let mut next = topics.to_vec();
    if let Some(topic) = next.iter_mut().find(|topic| topic.id == topic_id) {
        topic.subtopics.retain(|sub| sub.id != subtopic_id);
    }
    Reduced::changed(next)
}

fn replace_all(current: &[Topic], replacement: Vec<Topic>) -> RepoResult<Reduced> {
    if let Some(id) = find_duplicate_id(&replacement) {
        return Err(RepoError::DuplicateId(id.to_string()));
    }
    let changed = current != replacement.as_slice();
    Ok(Reduced {
        changed,
        ..Reduced::changed(replacement)
    })
}

/// Returns the first id repeated in its scope: topic ids across the board,
/// subtopic ids within each topic.
pub fn find_duplicate_id(topics: &[Topic]) -> Option<&str> {
    let mut topic_ids = HashSet::with_capacity(topics.len());
    for topic in topics {
        if !topic_ids.insert(topic.id.as_str()) {
            return Some(&topic.id);
        }
        let mut subtopic_ids = HashSet::with_capacity(topic.subtopics.len());
        for sub in &topic.subtopics {
            if !subtopic_ids.insert(sub.id.as_str()) {
                return Some(&sub.id);
            }
        }
    }
    None
}
