//! Commit policy shared by the reindex and delete paths.

use index_gateway_shared::CommitWindow;

/// Whether a mutation must be followed by an explicit, synchronous commit.
///
/// True exactly when the caller did not supply a commit window.
pub fn should_force_commit(request_supplied_commit_window: bool) -> bool {
    !request_supplied_commit_window
}

/// How one mutation interacts with the index's commit machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitDecision {
    /// Window handed to the write; always concrete.
    pub commit_within_ms: u64,
    /// Issue an explicit commit once the write completes.
    pub force_commit: bool,
}

impl CommitDecision {
    pub fn for_window(window: &CommitWindow) -> Self {
        Self {
            commit_within_ms: window.effective_ms(),
            force_commit: should_force_commit(window.was_supplied()),
        }
    }
}
