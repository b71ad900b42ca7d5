//! Per-request role resolution.

use labbook_storage::{Role, UserId, Workspace};

/// Effective role of a user within one workspace. Never persisted;
/// recomputed from current workspace state on every check, so cache
/// freshness of the workspace document is the only consistency lever.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceRole {
    None,
    Viewer,
    Editor,
    Admin,
}

impl From<Role> for WorkspaceRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => WorkspaceRole::Admin,
            Role::Editor => WorkspaceRole::Editor,
            Role::Viewer => WorkspaceRole::Viewer,
        }
    }
}

/// Resolve the effective role, in strict precedence order:
///
/// 1. an `admin|`-tagged identity is admin everywhere (superuser escape
///    hatch; the tag only survives identity verification if the id is
///    on the configured allow-list),
/// 2. the workspace owner is admin (ownership dominates membership),
/// 3. a listed member gets their stored role,
/// 4. anyone can view a publicly readable workspace,
/// 5. otherwise none.
///
/// Consults only the workspace document and the claimed id, never
/// project or file state.
pub fn resolve_role(workspace: &Workspace, user_id: Option<&UserId>) -> WorkspaceRole {
    if let Some(user_id) = user_id {
        if user_id.is_admin_tagged() {
            return WorkspaceRole::Admin;
        }
        if workspace.owner_id == *user_id {
            return WorkspaceRole::Admin;
        }
        if let Some(member) = workspace.users.iter().find(|u| u.user_id == *user_id) {
            return member.role.into();
        }
    }
    if workspace.publicly_readable {
        WorkspaceRole::Viewer
    } else {
        WorkspaceRole::None
    }
}
