use labbook_storage::{Role, Workspace, WorkspaceId, WorkspaceUser};

use crate::roles::{resolve_role, WorkspaceRole};
use crate::tests::common::uid;

fn workspace(owner: &str, publicly_readable: bool, users: Vec<WorkspaceUser>) -> Workspace {
    Workspace {
        workspace_id: WorkspaceId("w1".into()),
        owner_id: uid(owner),
        name: "test".into(),
        description: String::new(),
        users,
        publicly_readable,
        listed: false,
        timestamp_created: 0.0,
        timestamp_modified: 0.0,
        compute_resource_id: None,
    }
}

#[test]
fn owner_is_admin_even_with_lesser_membership_entry() {
    let ws = workspace(
        "github|alice",
        false,
        vec![WorkspaceUser {
            user_id: uid("github|alice"),
            role: Role::Viewer,
        }],
    );
    assert_eq!(
        resolve_role(&ws, Some(&uid("github|alice"))),
        WorkspaceRole::Admin
    );
}

#[test]
fn admin_tagged_identity_is_admin_everywhere() {
    let ws = workspace("github|alice", false, vec![]);
    assert_eq!(
        resolve_role(&ws, Some(&uid("admin|github|root"))),
        WorkspaceRole::Admin
    );
}

#[test]
fn member_gets_stored_role() {
    let ws = workspace(
        "github|alice",
        false,
        vec![WorkspaceUser {
            user_id: uid("github|bob"),
            role: Role::Editor,
        }],
    );
    assert_eq!(
        resolve_role(&ws, Some(&uid("github|bob"))),
        WorkspaceRole::Editor
    );
}

#[test]
fn public_workspace_grants_viewer_to_anyone() {
    let ws = workspace("github|alice", true, vec![]);
    assert_eq!(
        resolve_role(&ws, Some(&uid("github|stranger"))),
        WorkspaceRole::Viewer
    );
    assert_eq!(resolve_role(&ws, None), WorkspaceRole::Viewer);
}

#[test]
fn private_workspace_yields_none_for_outsiders() {
    let ws = workspace("github|alice", false, vec![]);
    assert_eq!(
        resolve_role(&ws, Some(&uid("github|stranger"))),
        WorkspaceRole::None
    );
    assert_eq!(resolve_role(&ws, None), WorkspaceRole::None);
}
