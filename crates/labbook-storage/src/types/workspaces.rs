//! Workspace types.

use serde::{Deserialize, Serialize};

use super::{Role, UserId, WorkspaceId};

/// Workspace record. The permission boundary: projects, files and blobs
/// all hang off a workspace, and every role check resolves against this
/// document alone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub workspace_id: WorkspaceId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    /// Membership list; entries are unique per userId. The owner is
    /// implicitly admin whether or not they appear here.
    pub users: Vec<WorkspaceUser>,
    pub publicly_readable: bool,
    pub listed: bool,
    pub timestamp_created: f64,
    pub timestamp_modified: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_resource_id: Option<String>,
}

/// Membership entry on a workspace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceUser {
    pub user_id: UserId,
    pub role: Role,
}

/// Mutable workspace properties settable via setWorkspaceProperty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkspaceProperty {
    Name,
    PubliclyReadable,
    Listed,
    ComputeResourceId,
}
