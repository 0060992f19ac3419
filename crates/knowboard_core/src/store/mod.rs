//! Durable key-value storage and the persisted state container.
//!
//! # Responsibility
//! - Abstract the single-slot durable store behind [`KvStore`].
//! - Hydrate a typed value once and write it back after every change.
//!
//! # Invariants
//! - Storage failures never reach mutation callers; they are logged and the
//!   in-memory value stays authoritative.
//! - Nothing is written back before hydration completes.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv;
pub mod persistent;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from durable storage and snapshot (de)serialization.
#[derive(Debug)]
pub enum StoreError {
    /// Backing store cannot be reached at all.
    Unavailable(String),
    /// Store refused the write (e.g. quota exceeded).
    WriteRejected(String),
    /// Underlying SQLite failure.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Stored snapshot is not valid JSON for the expected type.
    Parse(serde_json::Error),
    /// In-memory value could not be serialized.
    Serialize(serde_json::Error),
}

impl StoreError {
    /// Whether a failed write ends durable storage for the rest of the session.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
            Self::WriteRejected(message) => write!(f, "storage write rejected: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "kv store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::Parse(err) => write!(f, "stored snapshot is corrupt: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize snapshot: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Parse(err) | Self::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
