use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::structs::branch::Branch;
use crate::structs::store::BranchStore;

/// Advisory integrity report over a whole store.
///
/// Validation never mutates; running it twice on an unmutated store
/// yields identical reports. Callers decide whether a failing report
/// should block further writes.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl BranchStore {
    /// Check every branch record for structural integrity: dangling
    /// parents, fork points the parent does not own, missing roots,
    /// cyclic parent chains, and message ids claimed by more than one
    /// branch.
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();

        // Branch-id order keeps the report deterministic.
        let mut ordered: Vec<&Branch> = self.branches().collect();
        ordered.sort_by_key(|b| b.id);

        if !self.is_empty() && !ordered.iter().any(|b| b.is_root()) {
            errors.push("store has no root branch".to_string());
        }

        for branch in &ordered {
            match branch.parent_id {
                Some(parent_id) => {
                    match self.get(parent_id) {
                        None => errors.push(format!(
                            "branch {} ({}) references missing parent {}",
                            branch.id, branch.name, parent_id
                        )),
                        Some(parent) => {
                            if let Some(fork_id) = branch.parent_message_id {
                                if !parent.owns_message(fork_id) {
                                    errors.push(format!(
                                        "branch {} forks at message {} which parent {} does not own",
                                        branch.id, fork_id, parent_id
                                    ));
                                }
                            }
                        }
                    }
                    if branch.parent_message_id.is_none() {
                        errors.push(format!(
                            "branch {} has a parent but no fork message",
                            branch.id
                        ));
                    }
                }
                None => {
                    if branch.parent_message_id.is_some() {
                        errors.push(format!(
                            "root branch {} carries a fork message reference",
                            branch.id
                        ));
                    }
                }
            }
        }

        // Cyclic parent chains: walk each branch's ancestry with a
        // visited set. Report each offender once.
        let mut cyclic: BTreeSet<Uuid> = BTreeSet::new();
        for branch in &ordered {
            let mut walked: HashSet<Uuid> = HashSet::new();
            let mut current = Some(branch.id);
            while let Some(id) = current {
                if !walked.insert(id) {
                    cyclic.insert(branch.id);
                    break;
                }
                current = self.get(id).and_then(|b| b.parent_id);
            }
        }
        for id in cyclic {
            errors.push(format!("branch {id} sits on a cyclic parent chain"));
        }

        // Message ids must be unique across the whole store.
        let mut owners: HashMap<Uuid, Uuid> = HashMap::new();
        for branch in &ordered {
            for message in &branch.messages {
                if let Some(first_owner) = owners.insert(message.id, branch.id) {
                    errors.push(format!(
                        "message {} appears in branches {} and {}",
                        message.id, first_owner, branch.id
                    ));
                }
            }
        }

        let valid = errors.is_empty();
        if !valid {
            tracing::warn!(
                store_id = %self.id,
                error_count = errors.len(),
                "BranchStore: Validation found integrity errors"
            );
        }

        ValidationReport { valid, errors }
    }
}
