//! Identifier generation for new board entities.
//!
//! # Invariants
//! - Ids come from the OS secure random source only; there is no weak
//!   fallback.
//! - The random part is a canonical lowercase version-4 UUID.

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::{Builder, Uuid};

/// Error raised when no secure random source is reachable.
#[derive(Debug)]
pub enum IdError {
    RandomUnavailable(String),
}

impl Display for IdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RandomUnavailable(message) => {
                write!(f, "secure random generator not available: {message}")
            }
        }
    }
}

impl Error for IdError {}

/// Source of fresh UUIDs for new topics and subtopics.
pub trait IdGenerator {
    fn next_uuid(&self) -> Result<Uuid, IdError>;
}

/// OS-backed generator using `getrandom`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureIdGenerator;

impl IdGenerator for SecureIdGenerator {
    fn next_uuid(&self) -> Result<Uuid, IdError> {
        let mut bytes = [0u8; 16];
        getrandom::getrandom(&mut bytes)
            .map_err(|err| IdError::RandomUnavailable(err.to_string()))?;
        Ok(Builder::from_random_bytes(bytes).into_uuid())
    }
}

/// Builds `topic-<uuid>`.
pub fn new_topic_id(ids: &dyn IdGenerator) -> Result<String, IdError> {
    Ok(format!("topic-{}", ids.next_uuid()?.hyphenated()))
}

/// Builds `subtopic-<uuid>`.
pub fn new_subtopic_id(ids: &dyn IdGenerator) -> Result<String, IdError> {
    Ok(format!("subtopic-{}", ids.next_uuid()?.hyphenated()))
}

#[cfg(test)]
mod tests {
    use super::{new_subtopic_id, new_topic_id, IdGenerator, SecureIdGenerator};
    use uuid::{Uuid, Variant, Version};

    #[test]
    fn secure_ids_are_v4_rfc4122() {
        let uuid = SecureIdGenerator.next_uuid().expect("os random should be available");
        assert_eq!(uuid.get_version(), Some(Version::Random));
        assert_eq!(uuid.get_variant(), Variant::RFC4122);
    }

    #[test]
    fn prefixed_ids_carry_canonical_uuid() {
        let topic_id = new_topic_id(&SecureIdGenerator).unwrap();
        let raw = topic_id.strip_prefix("topic-").expect("topic prefix");
        assert_eq!(raw.len(), 36);
        assert_eq!(raw, raw.to_lowercase());
        assert!(Uuid::parse_str(raw).is_ok());

        let sub_id = new_subtopic_id(&SecureIdGenerator).unwrap();
        assert!(sub_id.starts_with("subtopic-"));
        assert_ne!(
            new_topic_id(&SecureIdGenerator).unwrap(),
            new_topic_id(&SecureIdGenerator).unwrap()
        );
    }
}
