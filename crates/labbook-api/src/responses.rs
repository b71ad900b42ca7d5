//! Response payloads. The `type` tag always matches the request's.

use labbook_storage::{Project, ProjectFile, ProjectId, ProjectResource, Workspace, WorkspaceId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ResponsePayload {
    GetWorkspaces(GetWorkspacesResponse),
    GetWorkspace(GetWorkspaceResponse),
    CreateWorkspace(CreateWorkspaceResponse),
    DeleteWorkspace(DeleteWorkspaceResponse),
    SetWorkspaceUsers(SetWorkspaceUsersResponse),
    SetWorkspaceProperty(SetWorkspacePropertyResponse),
    GetProjects(GetProjectsResponse),
    GetProject(GetProjectResponse),
    CreateProject(CreateProjectResponse),
    DeleteProject(DeleteProjectResponse),
    CloneProject(CloneProjectResponse),
    SetProjectProperty(SetProjectPropertyResponse),
    GetProjectFiles(GetProjectFilesResponse),
    GetProjectFile(GetProjectFileResponse),
    SetProjectFile(SetProjectFileResponse),
    DeleteProjectFile(DeleteProjectFileResponse),
    DuplicateProjectFile(DuplicateProjectFileResponse),
    RenameProjectFile(RenameProjectFileResponse),
    GetProjectResources(GetProjectResourcesResponse),
    GetProjectResource(GetProjectResourceResponse),
    AddProjectResource(AddProjectResourceResponse),
    DeleteProjectResource(DeleteProjectResourceResponse),
    RenameProjectResource(RenameProjectResourceResponse),
    GetDataBlob(GetDataBlobResponse),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetWorkspacesResponse {
    pub workspaces: Vec<Workspace>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetWorkspaceResponse {
    pub workspace: Workspace,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceResponse {
    pub workspace_id: WorkspaceId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteWorkspaceResponse {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetWorkspaceUsersResponse {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetWorkspacePropertyResponse {}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectsResponse {
    pub projects: Vec<Project>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectResponse {
    pub project: Project,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectResponse {
    pub project_id: ProjectId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteProjectResponse {}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneProjectResponse {
    pub new_project_id: ProjectId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetProjectPropertyResponse {}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectFilesResponse {
    pub project_files: Vec<ProjectFile>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectFileResponse {
    pub project_file: ProjectFile,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetProjectFileResponse {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteProjectFileResponse {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DuplicateProjectFileResponse {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenameProjectFileResponse {}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectResourcesResponse {
    pub project_resources: Vec<ProjectResource>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectResourceResponse {
    pub project_resource: ProjectResource,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddProjectResourceResponse {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteProjectResourceResponse {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenameProjectResourceResponse {}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDataBlobResponse {
    pub content: String,
}
