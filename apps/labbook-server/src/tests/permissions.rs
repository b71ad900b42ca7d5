use labbook_storage::{Role, Workspace, WorkspaceId, WorkspaceUser};

use crate::permissions::*;
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

fn member(id: &str, role: Role) -> WorkspaceUser {
    WorkspaceUser {
        user_id: uid(id),
        role,
    }
}

#[test]
fn create_workspace_requires_an_identity() {
    assert!(user_can_create_workspace(Some(&uid("github|alice"))));
    assert!(!user_can_create_workspace(None));
}

#[test]
fn delete_workspace_is_admin_only() {
    let ws = workspace("github|alice", true, vec![member("github|bob", Role::Editor)]);
    assert!(user_can_delete_workspace(&ws, Some(&uid("github|alice"))));
    assert!(!user_can_delete_workspace(&ws, Some(&uid("github|bob"))));
    assert!(!user_can_delete_workspace(&ws, None));
}

#[test]
fn editor_can_write_but_not_administer() {
    let ws = workspace("github|alice", false, vec![member("github|bob", Role::Editor)]);
    let bob = uid("github|bob");
    assert!(user_can_create_project(&ws, Some(&bob)));
    assert!(user_can_set_project_file(&ws, Some(&bob)));
    assert!(user_can_add_project_resource(&ws, Some(&bob)));
    assert!(!user_can_set_workspace_users(&ws, Some(&bob)));
    assert!(!user_can_set_workspace_property(&ws, Some(&bob)));
}

#[test]
fn viewer_cannot_mutate() {
    let ws = workspace("github|alice", false, vec![member("github|bob", Role::Viewer)]);
    let bob = uid("github|bob");
    assert!(user_can_read_workspace(&ws, Some(&bob)));
    assert!(!user_can_create_project(&ws, Some(&bob)));
    assert!(!user_can_set_project_file(&ws, Some(&bob)));
    assert!(!user_can_delete_project(&ws, Some(&bob)));
}

#[test]
fn anonymous_cannot_delete_even_on_public_workspaces() {
    // A public workspace grants viewer to anonymous; the delete
    // predicates additionally require a present identity.
    let ws = workspace("github|alice", true, vec![]);
    assert!(user_can_read_workspace(&ws, None));
    assert!(!user_can_delete_project(&ws, None));
    assert!(!user_can_delete_project_file(&ws, None));
    assert!(!user_can_delete_project_resource(&ws, None));
}
