use uuid::Uuid;

use crate::error::TreeResult;
use crate::structs::message::Message;
use crate::structs::store::BranchStore;

impl BranchStore {
    /// Compute the linear message sequence visible when viewing
    /// `branch_id`: every ancestor message up to each fork point,
    /// followed by the branch's own messages.
    ///
    /// Each hop truncates the working sequence at the child's fork point
    /// (inclusive) before appending the child's own messages, so the
    /// sequence carries only the ancestor prefix actually shared with the
    /// branch. A fork pointer that cannot be found in the working
    /// sequence appends without truncating, keeping the read tolerant of
    /// inconsistent history.
    pub fn project_messages(&self, branch_id: Uuid) -> TreeResult<Vec<Message>> {
        let path = self.resolve_path(branch_id)?;

        let mut visible: Vec<Message> = Vec::new();
        for (hop, step) in path.steps.iter().enumerate() {
            // Path steps only name branches present during resolution.
            let Some(branch) = self.get(step.branch_id) else {
                continue;
            };

            if hop == 0 {
                visible = branch.messages.clone();
                continue;
            }

            let fork_index = step
                .parent_message_id
                .and_then(|fork_id| visible.iter().position(|m| m.id == fork_id));

            match fork_index {
                Some(index) => {
                    visible.truncate(index + 1);
                    visible.extend(branch.messages.iter().cloned());
                }
                None => {
                    tracing::warn!(
                        store_id = %self.id,
                        branch_id = %step.branch_id,
                        fork_message_id = ?step.parent_message_id,
                        "BranchStore: Fork point not in ancestor sequence, appending without truncation"
                    );
                    visible.extend(branch.messages.iter().cloned());
                }
            }
        }

        tracing::debug!(
            store_id = %self.id,
            branch_id = %branch_id,
            hops = path.steps.len(),
            rooted = path.rooted,
            visible = visible.len(),
            "BranchStore: Projected message sequence"
        );

        Ok(visible)
    }
}
