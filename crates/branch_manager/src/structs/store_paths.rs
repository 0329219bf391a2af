use uuid::Uuid;

use crate::error::{TreeError, TreeResult};
use crate::structs::store::BranchStore;

/// One hop of a root-to-branch chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathStep {
    pub branch_id: Uuid,
    /// The fork point inside the previous step's branch; `None` for a root.
    pub parent_message_id: Option<Uuid>,
}

/// The ordered chain of branches from a root down to a target branch.
///
/// `rooted` is false when the walk hit a parent id absent from the store;
/// the steps then cover only the surviving suffix of the chain, and
/// callers should treat the result as degraded rather than fatal.
#[derive(Clone, Debug, Default)]
pub struct BranchPath {
    pub steps: Vec<PathStep>,
    pub rooted: bool,
}

impl BranchPath {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Branch ids along the chain, root first.
    pub fn branch_ids(&self) -> Vec<Uuid> {
        self.steps.iter().map(|s| s.branch_id).collect()
    }
}

impl BranchStore {
    /// Resolve the root-to-branch chain for `branch_id`.
    ///
    /// A parent id absent from the store degrades the result to the
    /// partial chain already walked instead of failing the read; an
    /// unknown starting id yields an empty, unrooted path. The walk is
    /// bounded by the total branch count, since a chain longer than that
    /// can only mean the parent graph is cyclic.
    pub fn resolve_path(&self, branch_id: Uuid) -> TreeResult<BranchPath> {
        let limit = self.len();
        let mut steps = Vec::new();
        let mut current = branch_id;

        loop {
            if steps.len() > limit {
                tracing::error!(
                    store_id = %self.id,
                    branch_id = %branch_id,
                    walked = steps.len(),
                    branch_count = limit,
                    "BranchStore: Parent chain exceeds branch count, tree is cyclic"
                );
                return Err(TreeError::CycleDetected { branch_id });
            }

            let Some(branch) = self.get(current) else {
                tracing::warn!(
                    store_id = %self.id,
                    branch_id = %branch_id,
                    missing = %current,
                    resolved = steps.len(),
                    "BranchStore: Missing branch while resolving path, returning partial chain"
                );
                steps.reverse();
                return Ok(BranchPath {
                    steps,
                    rooted: false,
                });
            };

            steps.push(PathStep {
                branch_id: current,
                parent_message_id: branch.parent_message_id,
            });

            match branch.parent_id {
                Some(parent_id) => current = parent_id,
                None => {
                    steps.reverse();
                    return Ok(BranchPath {
                        steps,
                        rooted: true,
                    });
                }
            }
        }
    }
}
