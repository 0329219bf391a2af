use uuid::Uuid;

use crate::error::{TreeError, TreeResult};
use crate::structs::branch::Branch;
use crate::structs::message::Message;
use crate::structs::store::BranchStore;

/// Write operations. This is the only surface that changes the store;
/// every other component is read-only. Failed writes leave the store
/// untouched.
impl BranchStore {
    /// Create a new root branch with no parent and no messages.
    pub fn create_root(&mut self, name: impl Into<String>) -> &Branch {
        let branch = Branch::new(name);
        let branch_id = branch.id;

        tracing::info!(
            store_id = %self.id,
            branch_id = %branch_id,
            name = %branch.name,
            "BranchStore: Creating root branch"
        );

        self.mark_dirty(branch_id);
        self.insert_branch(branch)
    }

    /// Fork a new branch off `parent_branch_id` at one of its own messages.
    ///
    /// The fork point must be a message the parent branch itself owns, not
    /// one inherited from further up the tree, and never one merely visible
    /// in the parent's projected sequence.
    pub fn fork(
        &mut self,
        parent_branch_id: Uuid,
        parent_message_id: Uuid,
        name: impl Into<String>,
    ) -> TreeResult<&Branch> {
        let Some(parent) = self.get(parent_branch_id) else {
            return Err(TreeError::UnknownBranch(parent_branch_id));
        };
        if !parent.owns_message(parent_message_id) {
            return Err(TreeError::InvalidForkPoint {
                branch_id: parent_branch_id,
                message_id: parent_message_id,
            });
        }

        let branch = Branch::forked(name, parent_branch_id, parent_message_id);
        let branch_id = branch.id;

        tracing::info!(
            store_id = %self.id,
            branch_id = %branch_id,
            name = %branch.name,
            parent_branch_id = %parent_branch_id,
            parent_message_id = %parent_message_id,
            "BranchStore: Forking branch"
        );

        self.mark_dirty(branch_id);
        Ok(self.insert_branch(branch))
    }

    /// Append a message to a branch.
    ///
    /// The message id must be unique across the whole store, not just the
    /// target branch. Returns the appended message's id.
    pub fn append_message(&mut self, branch_id: Uuid, message: Message) -> TreeResult<Uuid> {
        if !self.contains(branch_id) {
            return Err(TreeError::UnknownBranch(branch_id));
        }
        if self.has_message_id(message.id) {
            return Err(TreeError::DuplicateMessageId(message.id));
        }

        let message_id = message.id;
        let content_len = message.content_len();

        tracing::info!(
            store_id = %self.id,
            branch_id = %branch_id,
            message_id = %message_id,
            role = ?message.role,
            content_len,
            "BranchStore: Appending message to branch"
        );

        let thread_id = self.id;
        let branch_len = {
            let Some(branch) = self.branch_mut(branch_id) else {
                return Err(TreeError::UnknownBranch(branch_id));
            };
            let mut message = message;
            message.thread_id.get_or_insert(thread_id);
            message.branch_id.get_or_insert(branch_id);
            branch.messages.push(message);
            branch.messages.len()
        };

        self.record_message_id(message_id);
        self.mark_dirty(branch_id);

        tracing::debug!(
            store_id = %self.id,
            branch_id = %branch_id,
            branch_message_count = branch_len,
            "BranchStore: Message appended"
        );

        Ok(message_id)
    }

    /// Rename a branch.
    pub fn rename(&mut self, branch_id: Uuid, name: impl Into<String>) -> TreeResult<()> {
        let Some(branch) = self.branch_mut(branch_id) else {
            return Err(TreeError::UnknownBranch(branch_id));
        };
        branch.name = name.into();
        self.mark_dirty(branch_id);
        Ok(())
    }

    /// Set the display color hint of a branch.
    pub fn set_color(&mut self, branch_id: Uuid, color: impl Into<String>) -> TreeResult<()> {
        let Some(branch) = self.branch_mut(branch_id) else {
            return Err(TreeError::UnknownBranch(branch_id));
        };
        branch.color = Some(color.into());
        self.mark_dirty(branch_id);
        Ok(())
    }

    /// Remove the display color hint of a branch.
    pub fn clear_color(&mut self, branch_id: Uuid) -> TreeResult<()> {
        let Some(branch) = self.branch_mut(branch_id) else {
            return Err(TreeError::UnknownBranch(branch_id));
        };
        branch.color = None;
        self.mark_dirty(branch_id);
        Ok(())
    }
}
