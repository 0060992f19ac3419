//! Board use-case service.
//!
//! # Responsibility
//! - Own the persisted topic collection and route every mutation through
//!   the repository reducer.
//! - Keep selection and search state, deriving views from the snapshot.
//!
//! # Invariants
//! - The topic collection is the only source of truth; active topic,
//!   active subtopic and filtered list are looked up on every call.
//! - Storage failures never fail a mutation.
//! - Import clears selection whether or not the document is accepted.

use crate::config::BoardConfig;
use crate::model::id::IdGenerator;
use crate::model::seed::seed_topics;
use crate::model::topic::{Subtopic, SubtopicId, SubtopicPatch, Topic, TopicId, TopicPatch};
use crate::repo::topic_repo::{find_duplicate_id, reduce, BoardAction, Reduced, RepoError};
use crate::search::deferred::DeferredQuery;
use crate::search::filter::filter_topics;
use crate::service::forms::{SubtopicForm, TopicForm};
use crate::store::kv::KvStore;
use crate::store::persistent::{Hydration, PersistentState, WriteBack};
use crate::transfer::{export_json, parse_import, ImportError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type BoardResult<T> = Result<T, BoardError>;

/// Service error for board use-cases.
#[derive(Debug)]
pub enum BoardError {
    /// Reducer rejected the action.
    Repo(RepoError),
    /// Imported document was rejected; state is unchanged.
    Import(ImportError),
    /// Snapshot could not be rendered as JSON.
    Export(serde_json::Error),
    /// Internal consistency mismatch between action and result.
    InconsistentState(&'static str),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "failed to export board: {err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent board state: {details}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::Export(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<RepoError> for BoardError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ImportError> for BoardError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

/// Which panels are open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub topic_id: Option<TopicId>,
    pub subtopic_id: Option<SubtopicId>,
    /// Subtopic panel opens in edit mode.
    pub subtopic_editing: bool,
}

impl Selection {
    fn clear(&mut self) {
        *self = Self::default();
    }
}

struct Dispatched {
    changed: bool,
    created_id: Option<String>,
}

/// Board facade over a durable store and an id source.
pub struct BoardService<S: KvStore, G: IdGenerator> {
    state: PersistentState<Vec<Topic>, S>,
    ids: G,
    selection: Selection,
    search: DeferredQuery,
    hydration: Hydration,
}

impl<S: KvStore, G: IdGenerator> BoardService<S, G> {
    /// Opens the board stored under `config.storage_key`, hydrating once.
    ///
    /// Falls back to the starter board when nothing usable is stored.
    pub fn open(store: S, ids: G, config: &BoardConfig) -> Self {
        let mut state = PersistentState::new(store, config.storage_key.clone(), seed_topics());
        let mut hydration = state.hydrate();

        if let Some(id) = find_duplicate_id(state.get()) {
            warn!(
                "event=board_open module=service status=error error_code=duplicate_stored_id id={id}"
            );
            state.set(seed_topics());
            hydration = Hydration::Corrupt;
        }

        info!(
            "event=board_open module=service status=ok hydration={hydration:?} durable={} topics={}",
            state.is_durable(),
            state.get().len()
        );

        Self {
            state,
            ids,
            selection: Selection::default(),
            search: DeferredQuery::new(config.search_debounce),
            hydration,
        }
    }

    fn dispatch(&mut self, action: BoardAction) -> BoardResult<Dispatched> {
        let action_name = action.name();
        let Reduced {
            topics,
            changed,
            created_id,
        } = reduce(self.state.get(), action, &self.ids).map_err(|err| {
            error!(
                "event=board_mutation module=service status=error action={action_name} error={err}"
            );
            err
        })?;

        let write = if changed {
            self.state.set(topics)
        } else {
            WriteBack::Skipped
        };
        info!(
            "event=board_mutation module=service status=ok action={action_name} changed={changed} write={write:?}"
        );
        Ok(Dispatched {
            changed,
            created_id,
        })
    }

    /// Appends a placeholder topic and returns its id.
    pub fn add_topic(&mut self) -> BoardResult<TopicId> {
        self.dispatch(BoardAction::AddTopic)?
            .created_id
            .ok_or(BoardError::InconsistentState("added topic has no id"))
    }

    /// Merges `patch` into a topic. Returns whether anything changed.
    pub fn update_topic(&mut self, topic_id: &str, patch: TopicPatch) -> BoardResult<bool> {
        let outcome = self.dispatch(BoardAction::UpdateTopic {
            topic_id: topic_id.to_string(),
            patch,
        })?;
        Ok(outcome.changed)
    }

    /// Saves a topic edit form.
    pub fn save_topic_form(&mut self, topic_id: &str, form: &TopicForm) -> BoardResult<bool> {
        self.update_topic(topic_id, form.to_patch())
    }

    /// Removes a topic with its subtopics, closing its panels if open.
    pub fn delete_topic(&mut self, topic_id: &str) -> BoardResult<bool> {
        let outcome = self.dispatch(BoardAction::DeleteTopic {
            topic_id: topic_id.to_string(),
        })?;
        if self.selection.topic_id.as_deref() == Some(topic_id) {
            self.selection.clear();
        }
        Ok(outcome.changed)
    }

    /// Appends a placeholder subtopic. `None` when the topic does not exist.
    pub fn add_subtopic(&mut self, topic_id: &str) -> BoardResult<Option<SubtopicId>> {
        let outcome = self.dispatch(BoardAction::AddSubtopic {
            topic_id: topic_id.to_string(),
        })?;
        Ok(outcome.created_id)
    }

    pub fn update_subtopic(
        &mut self,
        topic_id: &str,
        subtopic_id: &str,
        patch: SubtopicPatch,
    ) -> BoardResult<bool> {
        let outcome = self.dispatch(BoardAction::UpdateSubtopic {
            topic_id: topic_id.to_string(),
            subtopic_id: subtopic_id.to_string(),
            patch,
        })?;
        Ok(outcome.changed)
    }

    /// Saves a subtopic edit form.
    pub fn save_subtopic_form(
        &mut self,
        topic_id: &str,
        subtopic_id: &str,
        form: &SubtopicForm,
    ) -> BoardResult<bool> {
        self.update_subtopic(topic_id, subtopic_id, form.to_patch())
    }

    /// Removes one subtopic, closing its panel if open.
    pub fn delete_subtopic(&mut self, topic_id: &str, subtopic_id: &str) -> BoardResult<bool> {
        let outcome = self.dispatch(BoardAction::DeleteSubtopic {
            topic_id: topic_id.to_string(),
            subtopic_id: subtopic_id.to_string(),
        })?;
        if self.selection.subtopic_id.as_deref() == Some(subtopic_id) {
            self.selection.subtopic_id = None;
            self.selection.subtopic_editing = false;
        }
        Ok(outcome.changed)
    }

    /// Replaces the whole collection with already typed topics.
    pub fn replace_all(&mut self, topics: Vec<Topic>) -> BoardResult<bool> {
        let outcome = self.dispatch(BoardAction::ReplaceAll { topics })?;
        Ok(outcome.changed)
    }

    /// Imports a board document, returning the number of topics loaded.
    ///
    /// Selection is cleared first, even if the document is rejected.
    pub fn import_json(&mut self, text: &str) -> BoardResult<usize> {
        self.selection.clear();

        let topics = parse_import(text).map_err(|err| {
            warn!("event=board_import module=service status=error error={err}");
            err
        })?;
        let count = topics.len();
        self.replace_all(topics)?;
        info!("event=board_import module=service status=ok topics={count}");
        Ok(count)
    }

    /// Renders the current board as an export document.
    pub fn export_json(&self) -> BoardResult<String> {
        export_json(self.state.get()).map_err(BoardError::Export)
    }

    pub fn topics(&self) -> &[Topic] {
        self.state.get()
    }

    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.topics().iter().find(|topic| topic.id == topic_id)
    }

    /// Opens a topic panel and closes any subtopic panel.
    pub fn select_topic(&mut self, topic_id: &str) {
        self.selection = Selection {
            topic_id: Some(topic_id.to_string()),
            subtopic_id: None,
            subtopic_editing: false,
        };
    }

    /// Opens a subtopic panel of the active topic.
    pub fn select_subtopic(&mut self, subtopic_id: &str, editing: bool) {
        self.selection.subtopic_id = Some(subtopic_id.to_string());
        self.selection.subtopic_editing = editing;
    }

    pub fn close_subtopic(&mut self) {
        self.selection.subtopic_id = None;
        self.selection.subtopic_editing = false;
    }

    pub fn close_panels(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected topic, if it still exists.
    pub fn active_topic(&self) -> Option<&Topic> {
        self.selection
            .topic_id
            .as_deref()
            .and_then(|id| self.topic(id))
    }

    /// Selected subtopic of the active topic, if both still exist.
    pub fn active_subtopic(&self) -> Option<&Subtopic> {
        let subtopic_id = self.selection.subtopic_id.as_deref()?;
        self.active_topic()?.subtopic(subtopic_id)
    }

    /// Records search field text typed at `now`.
    pub fn search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.search.input(text, now);
    }

    /// Promotes pending search text once quiet. Returns whether it changed.
    pub fn settle_search(&mut self, now: Instant) -> bool {
        self.search.settle(now)
    }

    pub fn flush_search(&mut self) -> bool {
        self.search.flush()
    }

    pub fn search(&self) -> &DeferredQuery {
        &self.search
    }

    /// Topics matching the settled search query, in board order.
    pub fn filtered_topics(&self) -> Vec<&Topic> {
        filter_topics(self.topics(), self.search.settled())
    }

    /// What the initial load found in storage.
    pub fn hydration(&self) -> Hydration {
        self.hydration
    }

    /// `false` once storage was found unreachable.
    pub fn is_durable(&self) -> bool {
        self.state.is_durable()
    }

    pub fn store(&self) -> &S {
        self.state.store()
    }

    pub fn store_mut(&mut self) -> &mut S {
        self.state.store_mut()
    }
}
