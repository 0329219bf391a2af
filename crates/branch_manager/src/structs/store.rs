use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::structs::branch::Branch;
use crate::traits::BranchSink;

/// The root collection of branch records for one conversation, plus the
/// derived indexes the tree queries run on.
///
/// Branch records are only reachable through the store's methods so the
/// indexes cannot drift from the records they summarize. The indexes are
/// rebuilt from the records when a snapshot is loaded; they are never
/// serialized.
#[derive(Clone, Debug)]
pub struct BranchStore {
    /// Identifies the conversation this tree belongs to.
    pub id: Uuid,

    branches: HashMap<Uuid, Branch>,

    /// Parent branch id -> child branch ids, in creation order.
    children: HashMap<Uuid, Vec<Uuid>>,

    /// Fork-point message id -> branches forked at that message.
    fork_index: HashMap<Uuid, Vec<Uuid>>,

    /// Every message id in the store; enforces global uniqueness.
    message_ids: HashSet<Uuid>,

    /// Branch ids mutated since the last flush.
    dirty: HashSet<Uuid>,
}

impl BranchStore {
    /// Create an empty store for a new conversation.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Create an empty store with a caller-chosen conversation id.
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            branches: HashMap::new(),
            children: HashMap::new(),
            fork_index: HashMap::new(),
            message_ids: HashSet::new(),
            dirty: HashSet::new(),
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Get a branch by id
    pub fn get(&self, branch_id: Uuid) -> Option<&Branch> {
        self.branches.get(&branch_id)
    }

    /// Check if a branch exists
    pub fn contains(&self, branch_id: Uuid) -> bool {
        self.branches.contains_key(&branch_id)
    }

    /// Number of branches in the store
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Check if the store holds no branches
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Iterate over all branches, in no particular order
    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.values()
    }

    /// All root branches, oldest first.
    pub fn roots(&self) -> Vec<&Branch> {
        let mut roots: Vec<&Branch> = self.branches.values().filter(|b| b.is_root()).collect();
        roots.sort_by_key(|b| (b.created_at, b.id));
        roots
    }

    /// Child branch ids of a branch, in creation order.
    pub fn child_ids(&self, branch_id: Uuid) -> &[Uuid] {
        self.children
            .get(&branch_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Ids of branches forked at the given message, in creation order.
    pub(crate) fn forks_at(&self, message_id: Uuid) -> &[Uuid] {
        self.fork_index
            .get(&message_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether a message id is already taken anywhere in the store.
    pub(crate) fn has_message_id(&self, message_id: Uuid) -> bool {
        self.message_ids.contains(&message_id)
    }

    pub(crate) fn record_message_id(&mut self, message_id: Uuid) {
        self.message_ids.insert(message_id);
    }

    pub(crate) fn branch_mut(&mut self, branch_id: Uuid) -> Option<&mut Branch> {
        self.branches.get_mut(&branch_id)
    }

    /// Insert a branch record and keep the derived indexes in sync.
    /// Returns a reference to the stored record.
    pub(crate) fn insert_branch(&mut self, branch: Branch) -> &Branch {
        let branch_id = branch.id;
        if let Some(parent_id) = branch.parent_id {
            self.children.entry(parent_id).or_default().push(branch_id);
        }
        if let Some(fork_id) = branch.parent_message_id {
            self.fork_index.entry(fork_id).or_default().push(branch_id);
        }
        for message in &branch.messages {
            self.message_ids.insert(message.id);
        }
        self.branches.entry(branch_id).or_insert(branch)
    }

    // =========================================================================
    // Dirty tracking
    // =========================================================================

    /// Mark a branch as needing persistence.
    pub(crate) fn mark_dirty(&mut self, branch_id: Uuid) {
        self.dirty.insert(branch_id);
    }

    /// Check if any branch needs to be persisted
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Clear all pending-persistence marks (after a full-store save).
    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
    }

    /// Hand every branch mutated since the last flush to the sink, one
    /// record per call, then clear the dirty set. Returns the number of
    /// records delivered.
    pub fn flush_dirty<S: BranchSink>(&mut self, sink: &mut S) -> usize {
        let mut ids: Vec<Uuid> = self.dirty.drain().collect();
        // Stable order so persistence layers see deterministic upserts.
        ids.sort();

        let mut flushed = 0;
        for id in ids {
            if let Some(branch) = self.branches.get(&id) {
                sink.upsert(branch);
                flushed += 1;
            }
        }

        tracing::debug!(
            store_id = %self.id,
            flushed,
            "BranchStore: Flushed dirty branches to sink"
        );

        flushed
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Rebuild a live store from a loaded branch collection.
    ///
    /// The snapshot is taken as-is, inconsistencies included; `validate`
    /// reports on them and the read paths tolerate them.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut store = Self {
            id: snapshot.id,
            branches: snapshot.branches,
            children: HashMap::new(),
            fork_index: HashMap::new(),
            message_ids: HashSet::new(),
            dirty: HashSet::new(),
        };
        store.rebuild_indexes();

        tracing::info!(
            store_id = %store.id,
            branch_count = store.branches.len(),
            message_count = store.message_ids.len(),
            "BranchStore: Loaded snapshot"
        );

        store
    }

    /// Capture the serializable shape of the whole branch collection.
    pub fn to_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            id: self.id,
            branches: self.branches.clone(),
        }
    }

    fn rebuild_indexes(&mut self) {
        // Creation order keeps child listings stable across loads.
        let mut ordered: Vec<&Branch> = self.branches.values().collect();
        ordered.sort_by_key(|b| (b.created_at, b.id));

        let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        let mut fork_index: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        let mut message_ids: HashSet<Uuid> = HashSet::new();

        for branch in ordered {
            if let Some(parent_id) = branch.parent_id {
                children.entry(parent_id).or_default().push(branch.id);
            }
            if let Some(fork_id) = branch.parent_message_id {
                fork_index.entry(fork_id).or_default().push(branch.id);
            }
            for message in &branch.messages {
                message_ids.insert(message.id);
            }
        }

        self.children = children;
        self.fork_index = fork_index;
        self.message_ids = message_ids;
    }
}

impl Default for BranchStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The serializable shape of a branch collection: the conversation id and
/// a branch-id -> record map. This is the contract with persistence
/// collaborators, which load the full map and save one record at a time.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct StoreSnapshot {
    pub id: Uuid,
    pub branches: HashMap<Uuid, Branch>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::message::Message;

    #[test]
    fn test_empty_store() {
        let store = BranchStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(!store.is_dirty());
        assert!(store.roots().is_empty());
    }

    #[test]
    fn test_snapshot_rebuilds_indexes() {
        let mut store = BranchStore::new();
        let root_id = store.create_root("main").id;
        let m1 = store.append_message(root_id, Message::user("one")).unwrap();
        store.fork(root_id, m1, "alt").unwrap();

        let reloaded = BranchStore::from_snapshot(store.to_snapshot());
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.child_ids(root_id).len(), 1);
        assert!(reloaded.is_fork_point(m1));
        assert!(!reloaded.is_dirty());
    }
}
