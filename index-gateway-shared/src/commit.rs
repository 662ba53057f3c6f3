//! Commit window types.

use serde::{Deserialize, Serialize};

/// Commit window applied to index writes when the caller did not ask for one.
pub const DEFAULT_COMMIT_WITHIN_MS: u64 = 1000;

/// The caller's commit window, if any.
///
/// The value handed to the index is always concrete (see [`effective_ms`]);
/// whether the caller supplied one is tracked separately because it decides
/// whether an explicit commit follows the write.
///
/// [`effective_ms`]: CommitWindow::effective_ms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitWindow {
    requested_ms: Option<u64>,
}

impl CommitWindow {
    /// Build a window from an optional caller-supplied value.
    pub fn new(requested_ms: Option<u64>) -> Self {
        Self { requested_ms }
    }

    /// A window the caller explicitly asked for.
    pub fn within(ms: u64) -> Self {
        Self {
            requested_ms: Some(ms),
        }
    }

    /// Whether the caller supplied a value.
    pub fn was_supplied(&self) -> bool {
        self.requested_ms.is_some()
    }

    /// The requested value, or [`DEFAULT_COMMIT_WITHIN_MS`].
    pub fn effective_ms(&self) -> u64 {
        self.requested_ms.unwrap_or(DEFAULT_COMMIT_WITHIN_MS)
    }
}

/// Attributes passed to the external reindex operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexAttributes {
    /// Commit window for the write, in milliseconds.
    pub commit_within_ms: u64,
}

impl From<&CommitWindow> for IndexAttributes {
    fn from(window: &CommitWindow) -> Self {
        Self {
            commit_within_ms: window.effective_ms(),
        }
    }
}
