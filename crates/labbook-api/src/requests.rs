//! Request payloads, one struct per operation.
//!
//! Every payload carries a `timestamp` (Unix seconds) used by the
//! dispatch layer for the anti-replay freshness window.

use labbook_storage::{ProjectId, ProjectProperty, ResourceType, WorkspaceId, WorkspaceProperty, WorkspaceUser};
use serde::{Deserialize, Serialize};

/// Discriminated request union, keyed by the `type` field on the wire.
///
/// Dispatch is an exhaustive match over these variants, so adding an
/// operation is one variant plus one match arm and the compiler flags
/// anything missed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RequestPayload {
    GetWorkspaces(GetWorkspacesRequest),
    GetWorkspace(GetWorkspaceRequest),
    CreateWorkspace(CreateWorkspaceRequest),
    DeleteWorkspace(DeleteWorkspaceRequest),
    SetWorkspaceUsers(SetWorkspaceUsersRequest),
    SetWorkspaceProperty(SetWorkspacePropertyRequest),
    GetProjects(GetProjectsRequest),
    GetProject(GetProjectRequest),
    CreateProject(CreateProjectRequest),
    DeleteProject(DeleteProjectRequest),
    CloneProject(CloneProjectRequest),
    SetProjectProperty(SetProjectPropertyRequest),
    GetProjectFiles(GetProjectFilesRequest),
    GetProjectFile(GetProjectFileRequest),
    SetProjectFile(SetProjectFileRequest),
    DeleteProjectFile(DeleteProjectFileRequest),
    DuplicateProjectFile(DuplicateProjectFileRequest),
    RenameProjectFile(RenameProjectFileRequest),
    GetProjectResources(GetProjectResourcesRequest),
    GetProjectResource(GetProjectResourceRequest),
    AddProjectResource(AddProjectResourceRequest),
    DeleteProjectResource(DeleteProjectResourceRequest),
    RenameProjectResource(RenameProjectResourceRequest),
    GetDataBlob(GetDataBlobRequest),
}

impl RequestPayload {
    /// The payload's claimed timestamp (Unix seconds).
    pub fn timestamp(&self) -> f64 {
        match self {
            RequestPayload::GetWorkspaces(r) => r.timestamp,
            RequestPayload::GetWorkspace(r) => r.timestamp,
            RequestPayload::CreateWorkspace(r) => r.timestamp,
            RequestPayload::DeleteWorkspace(r) => r.timestamp,
            RequestPayload::SetWorkspaceUsers(r) => r.timestamp,
            RequestPayload::SetWorkspaceProperty(r) => r.timestamp,
            RequestPayload::GetProjects(r) => r.timestamp,
            RequestPayload::GetProject(r) => r.timestamp,
            RequestPayload::CreateProject(r) => r.timestamp,
            RequestPayload::DeleteProject(r) => r.timestamp,
            RequestPayload::CloneProject(r) => r.timestamp,
            RequestPayload::SetProjectProperty(r) => r.timestamp,
            RequestPayload::GetProjectFiles(r) => r.timestamp,
            RequestPayload::GetProjectFile(r) => r.timestamp,
            RequestPayload::SetProjectFile(r) => r.timestamp,
            RequestPayload::DeleteProjectFile(r) => r.timestamp,
            RequestPayload::DuplicateProjectFile(r) => r.timestamp,
            RequestPayload::RenameProjectFile(r) => r.timestamp,
            RequestPayload::GetProjectResources(r) => r.timestamp,
            RequestPayload::GetProjectResource(r) => r.timestamp,
            RequestPayload::AddProjectResource(r) => r.timestamp,
            RequestPayload::DeleteProjectResource(r) => r.timestamp,
            RequestPayload::RenameProjectResource(r) => r.timestamp,
            RequestPayload::GetDataBlob(r) => r.timestamp,
        }
    }

    /// Wire name of the operation, for logs and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestPayload::GetWorkspaces(_) => "getWorkspaces",
            RequestPayload::GetWorkspace(_) => "getWorkspace",
            RequestPayload::CreateWorkspace(_) => "createWorkspace",
            RequestPayload::DeleteWorkspace(_) => "deleteWorkspace",
            RequestPayload::SetWorkspaceUsers(_) => "setWorkspaceUsers",
            RequestPayload::SetWorkspaceProperty(_) => "setWorkspaceProperty",
            RequestPayload::GetProjects(_) => "getProjects",
            RequestPayload::GetProject(_) => "getProject",
            RequestPayload::CreateProject(_) => "createProject",
            RequestPayload::DeleteProject(_) => "deleteProject",
            RequestPayload::CloneProject(_) => "cloneProject",
            RequestPayload::SetProjectProperty(_) => "setProjectProperty",
            RequestPayload::GetProjectFiles(_) => "getProjectFiles",
            RequestPayload::GetProjectFile(_) => "getProjectFile",
            RequestPayload::SetProjectFile(_) => "setProjectFile",
            RequestPayload::DeleteProjectFile(_) => "deleteProjectFile",
            RequestPayload::DuplicateProjectFile(_) => "duplicateProjectFile",
            RequestPayload::RenameProjectFile(_) => "renameProjectFile",
            RequestPayload::GetProjectResources(_) => "getProjectResources",
            RequestPayload::GetProjectResource(_) => "getProjectResource",
            RequestPayload::AddProjectResource(_) => "addProjectResource",
            RequestPayload::DeleteProjectResource(_) => "deleteProjectResource",
            RequestPayload::RenameProjectResource(_) => "renameProjectResource",
            RequestPayload::GetDataBlob(_) => "getDataBlob",
        }
    }
}

// ───────────────────────────── Workspaces ─────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetWorkspacesRequest {
    pub timestamp: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetWorkspaceRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceRequest {
    pub timestamp: f64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteWorkspaceRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetWorkspaceUsersRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
    pub users: Vec<WorkspaceUser>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetWorkspacePropertyRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
    pub property: WorkspaceProperty,
    pub value: serde_json::Value,
}

// ───────────────────────────── Projects ─────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectsRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectRequest {
    pub timestamp: f64,
    pub project_id: ProjectId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProjectRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneProjectRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub new_workspace_id: WorkspaceId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetProjectPropertyRequest {
    pub timestamp: f64,
    pub project_id: ProjectId,
    pub property: ProjectProperty,
    pub value: serde_json::Value,
}

// ─────────────────────────── Project files ──────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectFilesRequest {
    pub timestamp: f64,
    pub project_id: ProjectId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectFileRequest {
    pub timestamp: f64,
    pub project_id: ProjectId,
    pub file_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetProjectFileRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub file_name: String,
    pub file_content: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProjectFileRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub file_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateProjectFileRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub file_name: String,
    pub new_file_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameProjectFileRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub file_name: String,
    pub new_file_name: String,
}

// ─────────────────────────── Project resources ──────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectResourcesRequest {
    pub timestamp: f64,
    pub project_id: ProjectId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectResourceRequest {
    pub timestamp: f64,
    pub project_id: ProjectId,
    pub resource_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProjectResourceRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub resource_name: String,
    pub resource_type: ResourceType,
    pub resource_format: String,
    pub uri: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProjectResourceRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub resource_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameProjectResourceRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub resource_name: String,
    pub new_resource_name: String,
}

// ──────────────────────────── Data blobs ────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDataBlobRequest {
    pub timestamp: f64,
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub sha1: String,
}
