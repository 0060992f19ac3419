//! Board repository: pure snapshot transformations.
//!
//! # Responsibility
//! - Define the reducer-style mutation contract (`state + action -> state`).
//! - Enforce structural invariants of the topic collection.
//!
//! # Invariants
//! - Every operation returns a new snapshot; shared state is never mutated.
//! - Id collisions are errors, never silently inserted.

pub mod topic_repo;
