//! Project handlers: list, get, create, delete, clone, set property.

use labbook_api::{
    CloneProjectRequest, CloneProjectResponse, CreateProjectRequest, CreateProjectResponse,
    DeleteProjectRequest, DeleteProjectResponse, GetProjectRequest, GetProjectResponse,
    GetProjectsRequest, GetProjectsResponse, SetProjectPropertyRequest, SetProjectPropertyResponse,
};
use labbook_storage::{Project, ProjectId, ProjectProperty, UserId};

use crate::error::ApiError;
use crate::permissions::{
    user_can_create_project, user_can_delete_project, user_can_read_workspace,
    user_can_set_project_property,
};
use crate::roles::{resolve_role, WorkspaceRole};
use crate::server::{now_timestamp, random_id, ApiServer};

pub async fn get_projects(
    server: &ApiServer,
    request: GetProjectsRequest,
    verified_user_id: Option<&UserId>,
) -> Result<GetProjectsResponse, ApiError> {
    let workspace = server.workspaces.get(&request.workspace_id, true).await?;
    if !user_can_read_workspace(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to read this workspace".into(),
        ));
    }

    let mut projects = server.store.list_projects(&request.workspace_id).await?;
    projects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(GetProjectsResponse { projects })
}

pub async fn get_project(
    server: &ApiServer,
    request: GetProjectRequest,
    verified_user_id: Option<&UserId>,
) -> Result<GetProjectResponse, ApiError> {
    let project = server.projects.get(&request.project_id, false).await?;
    let workspace = server.workspaces.get(&project.workspace_id, true).await?;
    if !user_can_read_workspace(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to read this workspace".into(),
        ));
    }
    Ok(GetProjectResponse { project })
}

pub async fn create_project(
    server: &ApiServer,
    request: CreateProjectRequest,
    verified_user_id: Option<&UserId>,
) -> Result<CreateProjectResponse, ApiError> {
    let workspace = server.workspaces.get(&request.workspace_id, false).await?;
    if !user_can_create_project(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to create a project in this workspace".into(),
        ));
    }

    let project_id = ProjectId(random_id(8));
    let now = now_timestamp();
    let project = Project {
        project_id: project_id.clone(),
        workspace_id: request.workspace_id.clone(),
        name: request.name,
        description: String::new(),
        timestamp_created: now,
        timestamp_modified: now,
    };
    server.store.create_project(&project).await?;

    server
        .store
        .touch_workspace(&request.workspace_id, now_timestamp())
        .await?;
    server.workspaces.invalidate(&request.workspace_id);

    Ok(CreateProjectResponse { project_id })
}

pub async fn delete_project(
    server: &ApiServer,
    request: DeleteProjectRequest,
    verified_user_id: Option<&UserId>,
) -> Result<DeleteProjectResponse, ApiError> {
    let workspace = server.workspaces.get(&request.workspace_id, false).await?;
    if !user_can_delete_project(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to delete a project in this workspace".into(),
        ));
    }

    let project = server.projects.get(&request.project_id, false).await?;
    if project.workspace_id != request.workspace_id {
        return Err(ApiError::Integrity("Incorrect workspace ID".into()));
    }

    // Ordered cascade, children first, each step awaited.
    server
        .store
        .delete_files_in_project(&request.project_id)
        .await?;
    server
        .store
        .delete_blobs_in_project(&request.project_id)
        .await?;
    server.store.delete_project(&request.project_id).await?;
    server.projects.invalidate(&request.project_id);

    server
        .store
        .touch_workspace(&request.workspace_id, now_timestamp())
        .await?;
    server.workspaces.invalidate(&request.workspace_id);

    Ok(DeleteProjectResponse {})
}

pub async fn clone_project(
    server: &ApiServer,
    request: CloneProjectRequest,
    verified_user_id: Option<&UserId>,
) -> Result<CloneProjectResponse, ApiError> {
    let workspace = server.workspaces.get(&request.workspace_id, false).await?;
    if resolve_role(&workspace, verified_user_id) < WorkspaceRole::Viewer {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to clone a project in this workspace".into(),
        ));
    }
    let new_workspace = server
        .workspaces
        .get(&request.new_workspace_id, false)
        .await?;
    if resolve_role(&new_workspace, verified_user_id) < WorkspaceRole::Editor {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to create new projects in this workspace".into(),
        ));
    }

    let project = server.projects.get(&request.project_id, false).await?;
    if project.workspace_id != request.workspace_id {
        return Err(ApiError::Integrity("Incorrect workspace ID".into()));
    }

    // The " (copy)" suffix only applies within the same workspace; a
    // cross-workspace clone keeps the original name.
    let name = if request.workspace_id != request.new_workspace_id {
        project.name.clone()
    } else {
        format!("{} (copy)", project.name)
    };
    let now = now_timestamp();
    let new_project = Project {
        project_id: ProjectId(random_id(8)),
        workspace_id: request.new_workspace_id.clone(),
        name,
        description: project.description.clone(),
        timestamp_created: now,
        timestamp_modified: now,
    };
    server.store.create_project(&new_project).await?;

    // Deep-copy file records and blobs with rewritten ids. Resources
    // are not part of a project clone.
    let files = server.store.list_project_files(&request.project_id).await?;
    for mut file in files {
        file.workspace_id = new_project.workspace_id.clone();
        file.project_id = new_project.project_id.clone();
        server.store.upsert_project_file(&file).await?;
    }
    let blobs = server.store.list_data_blobs(&request.project_id).await?;
    for mut blob in blobs {
        blob.workspace_id = new_project.workspace_id.clone();
        blob.project_id = new_project.project_id.clone();
        server.store.upsert_data_blob(&blob).await?;
    }

    server
        .store
        .touch_workspace(&request.new_workspace_id, now_timestamp())
        .await?;
    server.workspaces.invalidate(&request.new_workspace_id);

    Ok(CloneProjectResponse {
        new_project_id: new_project.project_id,
    })
}

pub async fn set_project_property(
    server: &ApiServer,
    request: SetProjectPropertyRequest,
    verified_user_id: Option<&UserId>,
) -> Result<SetProjectPropertyResponse, ApiError> {
    let mut project = server.projects.get(&request.project_id, false).await?;
    let workspace = server.workspaces.get(&project.workspace_id, true).await?;
    if !user_can_set_project_property(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to set a project property in this workspace".into(),
        ));
    }

    match request.property {
        ProjectProperty::Name => {
            project.name = request
                .value
                .as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| ApiError::MalformedEnvelope("Invalid value for name".into()))?;
        }
    }
    project.timestamp_modified = now_timestamp();
    server.store.update_project(&project).await?;
    server.projects.invalidate(&request.project_id);

    server
        .store
        .touch_workspace(&project.workspace_id, now_timestamp())
        .await?;
    server.workspaces.invalidate(&project.workspace_id);

    Ok(SetProjectPropertyResponse {})
}
