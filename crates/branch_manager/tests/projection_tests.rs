//! Tests for message-sequence projection

use branch_manager::{BranchStore, Message};
use uuid::Uuid;

/// Build the shared fixture: root "main" with four messages, "b1" forked
/// at the second message with two of its own.
fn forked_store() -> (BranchStore, Uuid, Vec<Uuid>, Uuid, Vec<Uuid>) {
    let mut store = BranchStore::new();
    let main = store.create_root("main").id;

    let mut main_ids = Vec::new();
    for text in ["m1", "m2", "m3", "m4"] {
        main_ids.push(store.append_message(main, Message::user(text)).unwrap());
    }

    let b1 = store.fork(main, main_ids[1], "b1").unwrap().id;
    let mut b1_ids = Vec::new();
    for text in ["m5", "m6"] {
        b1_ids.push(store.append_message(b1, Message::assistant(text)).unwrap());
    }

    (store, main, main_ids, b1, b1_ids)
}

fn projected_ids(store: &BranchStore, branch_id: Uuid) -> Vec<Uuid> {
    store
        .project_messages(branch_id)
        .unwrap()
        .iter()
        .map(|m| m.id)
        .collect()
}

#[test]
fn test_root_projection_identity() {
    let (store, main, main_ids, _, _) = forked_store();
    assert_eq!(projected_ids(&store, main), main_ids);
}

#[test]
fn test_empty_root_projects_nothing() {
    let mut store = BranchStore::new();
    let root_id = store.create_root("main").id;
    assert!(store.project_messages(root_id).unwrap().is_empty());
}

#[test]
fn test_single_fork_splice() {
    let (store, _, main_ids, b1, b1_ids) = forked_store();

    // Ancestor prefix up to the fork point, then b1's own messages.
    let expected = vec![main_ids[0], main_ids[1], b1_ids[0], b1_ids[1]];
    assert_eq!(projected_ids(&store, b1), expected);
}

#[test]
fn test_multi_level_fork_splice() {
    let (mut store, _, main_ids, b1, b1_ids) = forked_store();

    let b2 = store.fork(b1, b1_ids[0], "b2").unwrap().id;
    let m7 = store.append_message(b2, Message::user("m7")).unwrap();

    // m6 is not an ancestor of the fork point and must not appear.
    let expected = vec![main_ids[0], main_ids[1], b1_ids[0], m7];
    assert_eq!(projected_ids(&store, b2), expected);
}

#[test]
fn test_missing_fork_point_appends_without_truncation() {
    let (store, _, main_ids, b1, b1_ids) = forked_store();

    // Corrupt b1's fork pointer through the serialized shape.
    let mut snapshot = store.to_snapshot();
    snapshot
        .branches
        .get_mut(&b1)
        .unwrap()
        .parent_message_id = Some(Uuid::new_v4());
    let corrupted = BranchStore::from_snapshot(snapshot);

    // The full ancestor sequence survives, followed by b1's messages.
    let mut expected = main_ids.clone();
    expected.extend(b1_ids.clone());
    assert_eq!(projected_ids(&corrupted, b1), expected);
}

#[test]
fn test_dangling_parent_projects_partial_context() {
    let (store, main, _, b1, b1_ids) = forked_store();

    // Drop the root branch from the serialized shape entirely.
    let mut snapshot = store.to_snapshot();
    snapshot.branches.remove(&main);
    let orphaned = BranchStore::from_snapshot(snapshot);

    // The projection degrades to the branch's own messages.
    assert_eq!(projected_ids(&orphaned, b1), b1_ids);

    let path = orphaned.resolve_path(b1).unwrap();
    assert!(!path.rooted);
    assert_eq!(path.len(), 1);
}

#[test]
fn test_unknown_branch_projects_empty() {
    let store = BranchStore::new();
    let visible = store.project_messages(Uuid::new_v4()).unwrap();
    assert!(visible.is_empty());
}

#[test]
fn test_sibling_forks_do_not_interfere() {
    let (mut store, main, main_ids, b1, _) = forked_store();

    // A second fork off main, taken at a later message.
    let b3 = store.fork(main, main_ids[2], "b3").unwrap().id;
    let m8 = store.append_message(b3, Message::assistant("m8")).unwrap();

    assert_eq!(
        projected_ids(&store, b3),
        vec![main_ids[0], main_ids[1], main_ids[2], m8]
    );
    // b1's projection is unchanged by the sibling.
    assert_eq!(projected_ids(&store, b1).len(), 4);
}
