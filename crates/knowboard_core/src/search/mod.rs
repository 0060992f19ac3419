//! Search over the board.
//!
//! # Responsibility
//! - Derive the filtered topic view from a free-text query.
//! - Defer query changes so filtering does not follow every keystroke.

pub mod deferred;
pub mod filter;
