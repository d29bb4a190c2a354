//! Debounced query submission.
//!
//! Every keystroke submits the whole query. Evaluation starts only once the input has been
//! quiet for the debounce interval and the query differs from the one evaluated last. Each
//! evaluation run gets a new generation number; work queued for an older generation is stale.

use super::{compile, CompiledQuery};
use crate::normalize::normalize_text;
use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before a query is evaluated.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Clone, Debug)]
/// Submitted, compiled and evaluated query of the filter input.
pub struct FilterState {
    debounce: Duration,
    submitted: Option<String>,
    submitted_at: Option<Instant>,
    evaluated: Option<String>,
    compiled: Option<CompiledQuery>,
    generation: u64,
    error_reported: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl FilterState {
    #[must_use]
    /// Filter state with the given quiet period.
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            submitted: None,
            submitted_at: None,
            evaluated: None,
            compiled: None,
            generation: 0,
            error_reported: false,
        }
    }

    /// Records the current content of the filter input and restarts the quiet period.
    pub fn submit(&mut self, raw: &str, now: Instant) {
        self.submitted = Some(normalize_text(raw));
        self.submitted_at = Some(now);
    }

    /// Starts a new evaluation run if the input is quiet and changed since the last run.
    ///
    /// Returns the generation of the new run.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        let submitted = self.submitted.as_ref()?;
        let submitted_at = self.submitted_at?;
        if now.saturating_duration_since(submitted_at) < self.debounce {
            return None;
        }
        if self.evaluated.as_ref() == Some(submitted) {
            return None;
        }
        self.compiled = Some(compile(submitted));
        self.evaluated = Some(submitted.clone());
        self.generation += 1;
        self.error_reported = false;
        Some(self.generation)
    }

    #[must_use]
    /// Generation of the newest evaluation run, 0 before the first run.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    /// Whether work tagged with `generation` belongs to the newest run.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation && self.compiled.is_some()
    }

    #[must_use]
    /// Query of the newest run.
    pub fn compiled(&self) -> Option<&CompiledQuery> {
        self.compiled.as_ref()
    }

    #[must_use]
    /// Last submitted query, normalized.
    pub fn submitted(&self) -> Option<&str> {
        self.submitted.as_deref()
    }

    #[must_use]
    /// Query of the last run, normalized.
    pub fn evaluated(&self) -> Option<&str> {
        self.evaluated.as_deref()
    }

    #[must_use]
    /// Whether a submitted query still waits for its run.
    pub fn is_pending(&self) -> bool {
        self.submitted.is_some() && self.submitted != self.evaluated
    }

    /// Notes an evaluation error in the current run; true the first time per run.
    pub(crate) fn note_error(&mut self) -> bool {
        !std::mem::replace(&mut self.error_reported, true)
    }
}
