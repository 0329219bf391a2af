use std::collections::{HashSet, VecDeque};

use uuid::Uuid;

use crate::error::{TreeError, TreeResult};
use crate::structs::branch::Branch;
use crate::structs::store::BranchStore;

/// Derived read-only queries over the tree shape.
impl BranchStore {
    /// Number of ancestors above `branch_id`; a root has depth 0.
    pub fn depth_of(&self, branch_id: Uuid) -> TreeResult<usize> {
        if !self.contains(branch_id) {
            return Err(TreeError::UnknownBranch(branch_id));
        }
        let path = self.resolve_path(branch_id)?;
        Ok(path.len().saturating_sub(1))
    }

    /// All branches sitting at the given depth.
    pub fn branches_at_depth(&self, depth: usize) -> Vec<&Branch> {
        let mut found: Vec<&Branch> = self
            .branches()
            .filter(|b| matches!(self.depth_of(b.id), Ok(d) if d == depth))
            .collect();
        found.sort_by_key(|b| (b.created_at, b.id));
        found
    }

    /// Ids of every ancestor of `branch_id`, root first, excluding the
    /// branch itself.
    pub fn ancestor_ids(&self, branch_id: Uuid) -> TreeResult<Vec<Uuid>> {
        let path = self.resolve_path(branch_id)?;
        let mut ids = path.branch_ids();
        ids.pop();
        Ok(ids)
    }

    /// Every branch reachable below `branch_id`, in BFS level order.
    pub fn descendants_of(&self, branch_id: Uuid) -> Vec<&Branch> {
        let mut queue: VecDeque<Uuid> = self.child_ids(branch_id).iter().copied().collect();
        let mut seen: HashSet<Uuid> = queue.iter().copied().collect();
        let mut out = Vec::new();

        while let Some(id) = queue.pop_front() {
            for child_id in self.child_ids(id) {
                if seen.insert(*child_id) {
                    queue.push_back(*child_id);
                }
            }
            if let Some(branch) = self.get(id) {
                out.push(branch);
            }
        }

        out
    }

    /// Whether any branch forks at the given message.
    pub fn is_fork_point(&self, message_id: Uuid) -> bool {
        !self.forks_at(message_id).is_empty()
    }

    /// Branches whose history diverges at the given message, oldest first.
    pub fn child_branches_of(&self, message_id: Uuid) -> Vec<&Branch> {
        self.forks_at(message_id)
            .iter()
            .filter_map(|id| self.get(*id))
            .collect()
    }
}
