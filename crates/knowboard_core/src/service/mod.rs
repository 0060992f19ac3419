//! Board use-case services.
//!
//! # Responsibility
//! - Orchestrate reducer, persistence, selection and search for callers.
//! - Keep UI/CLI layers decoupled from storage details.

pub mod board_service;
pub mod forms;
