//! Last-issued-wins coordination for search-as-you-type.
//!
//! The UI issues one token per debounced search. A response is applied
//! only if its token is still the newest, so a slow response from an
//! earlier keystroke can never overwrite the results of a later one.
//! This is a correctness requirement of the search flow, not an
//! optimization.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued search within a [`SearchSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchToken(u64);

/// Tracks which search is the current one.
///
/// A single atomic counter; issuing a token atomically supersedes every
/// previously issued token.
#[derive(Debug, Default)]
pub struct SearchSession {
    current: AtomicU64,
}

impl SearchSession {
    /// Creates a session with no searches issued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new token, superseding all prior tokens.
    #[must_use = "a search without its token cannot be checked for staleness"]
    pub fn issue(&self) -> SearchToken {
        SearchToken(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns `true` if `token` is the most recently issued token.
    #[must_use]
    pub fn is_current(&self, token: SearchToken) -> bool {
        self.current.load(Ordering::SeqCst) == token.0
    }
}
