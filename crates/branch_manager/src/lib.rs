//! `branch_manager` is a crate for robustly managing multi-branch
//! conversations: forking a linear conversation into named branches at any
//! prior message, and reconstructing for any branch the exact message
//! sequence a participant would see there.

// Declare the modules
pub mod error;
pub mod structs;
pub mod traits;

// Re-export the public API
pub use error::{TreeError, TreeResult};
pub use structs::branch::Branch;
pub use structs::message::Message;
pub use structs::store::{BranchStore, StoreSnapshot};
pub use structs::store_paths::{BranchPath, PathStep};
pub use structs::store_validation::ValidationReport;
pub use thread_core::{ContentPart, MessageContent, Role};
pub use traits::BranchSink;
