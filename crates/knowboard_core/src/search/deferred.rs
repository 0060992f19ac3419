//! Deferred search input.
//!
//! Keystrokes update the raw text immediately; the query used for filtering
//! only follows once input has been quiet for the configured period.

use std::time::{Duration, Instant};

/// Default quiet period before raw input becomes the active query.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone)]
pub struct DeferredQuery {
    raw: String,
    settled: String,
    last_input: Option<Instant>,
    quiet_period: Duration,
}

impl DeferredQuery {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            raw: String::new(),
            settled: String::new(),
            last_input: None,
            quiet_period,
        }
    }

    /// Records the current text of the search field.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.raw = text.into();
        self.last_input = Some(now);
    }

    /// Promotes the raw text when the quiet period has elapsed.
    ///
    /// Returns `true` when the settled query changed.
    pub fn settle(&mut self, now: Instant) -> bool {
        match self.last_input {
            Some(at) if now.saturating_duration_since(at) >= self.quiet_period => self.flush(),
            _ => false,
        }
    }

    /// Promotes the raw text immediately.
    pub fn flush(&mut self) -> bool {
        self.last_input = None;
        if self.settled == self.raw {
            return false;
        }
        self.settled.clone_from(&self.raw);
        true
    }

    /// Text currently shown in the search field.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Query the filter runs with.
    pub fn settled(&self) -> &str {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.last_input.is_some() && self.raw != self.settled
    }
}

impl Default for DeferredQuery {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}
