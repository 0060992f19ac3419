//! Core state logic for the knowledge board.
//! This crate is the single source of truth for board invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;
pub mod transfer;

pub use config::{BoardConfig, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::excerpt::markdown_excerpt;
pub use model::id::{IdError, IdGenerator, SecureIdGenerator};
pub use model::seed::seed_topics;
pub use model::topic::{
    classify_icon, normalize_title, parse_tags, IconKind, Subtopic, SubtopicId, SubtopicPatch,
    Topic, TopicId, TopicPatch,
};
pub use repo::topic_repo::{reduce, BoardAction, Reduced, RepoError, RepoResult};
pub use search::deferred::DeferredQuery;
pub use search::filter::filter_topics;
pub use service::board_service::{BoardError, BoardResult, BoardService, Selection};
pub use service::forms::{SubtopicForm, TopicForm};
pub use store::kv::{KvStore, MemoryKvStore, SqliteKvStore};
pub use store::persistent::{Hydration, PersistentState, WriteBack};
pub use store::{StoreError, StoreResult};
pub use transfer::{export_json, parse_import, ImportError, EXPORT_FILE_NAME};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
