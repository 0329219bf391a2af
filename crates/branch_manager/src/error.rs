use thiserror::Error;
use uuid::Uuid;

pub type TreeResult<T> = Result<T, TreeError>;

/// Errors that can occur while operating on a `BranchStore`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The operation referenced a branch id absent from the store.
    #[error("unknown branch: {0}")]
    UnknownBranch(Uuid),

    /// A fork was requested against a message the stated parent branch
    /// does not own.
    #[error("invalid fork point: branch {branch_id} does not own message {message_id}")]
    InvalidForkPoint { branch_id: Uuid, message_id: Uuid },

    /// An appended message reused an id already present in the store.
    #[error("duplicate message id: {0}")]
    DuplicateMessageId(Uuid),

    /// A parent-chain walk exceeded the total branch count. The parent
    /// graph is cyclic; the store needs repair before further use.
    #[error("cycle detected in parent chain starting at branch {branch_id}")]
    CycleDetected { branch_id: Uuid },
}
