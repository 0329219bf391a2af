//! Persistence seam between the branch store and storage collaborators.
//!
//! The store performs no IO of its own. Mutations mark branches dirty;
//! `BranchStore::flush_dirty` hands each changed record to a sink, which
//! maps one branch record to one storage document (remote or local).

use crate::structs::branch::Branch;

/// Receives changed branch records, one at a time.
pub trait BranchSink {
    fn upsert(&mut self, branch: &Branch);
}

/// Collects upserted records; useful for tests and for batching layers.
impl BranchSink for Vec<Branch> {
    fn upsert(&mut self, branch: &Branch) {
        self.push(branch.clone());
    }
}
