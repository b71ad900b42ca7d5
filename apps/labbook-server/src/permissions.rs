//! Permission policy: pure predicates mapping (workspace, claimed user)
//! to allow/deny, built on role resolution.
//!
//! Anonymous reads of individual data blobs, project files and project
//! resources bypass this module entirely (a deliberate relaxation for
//! anonymous-read consumers); bulk listings go through
//! [`user_can_read_workspace`].

use labbook_storage::{UserId, Workspace};

use crate::roles::{resolve_role, WorkspaceRole};

pub fn user_can_read_workspace(workspace: &Workspace, user_id: Option<&UserId>) -> bool {
    resolve_role(workspace, user_id) >= WorkspaceRole::Viewer
}

pub fn user_can_create_workspace(user_id: Option<&UserId>) -> bool {
    user_id.is_some()
}

pub fn user_can_delete_workspace(workspace: &Workspace, user_id: Option<&UserId>) -> bool {
    user_id.is_some() && resolve_role(workspace, user_id) == WorkspaceRole::Admin
}

pub fn user_can_set_workspace_users(workspace: &Workspace, user_id: Option<&UserId>) -> bool {
    resolve_role(workspace, user_id) == WorkspaceRole::Admin
}

pub fn user_can_set_workspace_property(workspace: &Workspace, user_id: Option<&UserId>) -> bool {
    resolve_role(workspace, user_id) == WorkspaceRole::Admin
}

pub fn user_can_create_project(workspace: &Workspace, user_id: Option<&UserId>) -> bool {
    resolve_role(workspace, user_id) >= WorkspaceRole::Editor
}

pub fn user_can_delete_project(workspace: &Workspace, user_id: Option<&UserId>) -> bool {
    user_id.is_some() && resolve_role(workspace, user_id) >= WorkspaceRole::Editor
}

pub fn user_can_set_project_property(workspace: &Workspace, user_id: Option<&UserId>) -> bool {
    resolve_role(workspace, user_id) >= WorkspaceRole::Editor
}

pub fn user_can_set_project_file(workspace: &Workspace, user_id: Option<&UserId>) -> bool {
    resolve_role(workspace, user_id) >= WorkspaceRole::Editor
}

pub fn user_can_delete_project_file(workspace: &Workspace, user_id: Option<&UserId>) -> bool {
    // anonymous cannot delete
    user_id.is_some() && resolve_role(workspace, user_id) >= WorkspaceRole::Editor
}

pub fn user_can_add_project_resource(workspace: &Workspace, user_id: Option<&UserId>) -> bool {
    resolve_role(workspace, user_id) >= WorkspaceRole::Editor
}

pub fn user_can_delete_project_resource(workspace: &Workspace, user_id: Option<&UserId>) -> bool {
    user_id.is_some() && resolve_role(workspace, user_id) >= WorkspaceRole::Editor
}
