//! Board domain model.
//!
//! # Responsibility
//! - Define topics, subtopics and their typed partial patches.
//! - Generate identifiers for new entities.
//! - Provide the starter board used before anything is stored.
//!
//! # Invariants
//! - Topic ids are unique across the board; subtopic ids within their topic.
//! - The topic sequence is the only stored state; everything else is derived.

pub mod excerpt;
pub mod id;
pub mod seed;
pub mod topic;
