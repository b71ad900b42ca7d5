//! Project resource handlers: list, get, add, delete, rename.

use labbook_api::{
    AddProjectResourceRequest, AddProjectResourceResponse, DeleteProjectResourceRequest,
    DeleteProjectResourceResponse, GetProjectResourceRequest, GetProjectResourceResponse,
    GetProjectResourcesRequest, GetProjectResourcesResponse, RenameProjectResourceRequest,
    RenameProjectResourceResponse,
};
use labbook_storage::{ProjectResource, StoreError, UserId};

use crate::error::ApiError;
use crate::permissions::{
    user_can_add_project_resource, user_can_delete_project_resource, user_can_read_workspace,
};
use crate::server::{now_timestamp, ApiServer};

pub async fn get_project_resources(
    server: &ApiServer,
    request: GetProjectResourcesRequest,
    verified_user_id: Option<&UserId>,
) -> Result<GetProjectResourcesResponse, ApiError> {
    let project = server.projects.get(&request.project_id, true).await?;
    let workspace = server.workspaces.get(&project.workspace_id, true).await?;
    if !user_can_read_workspace(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to read this workspace".into(),
        ));
    }

    let project_resources = server
        .store
        .list_project_resources(&request.project_id)
        .await?;
    Ok(GetProjectResourcesResponse { project_resources })
}

/// Single-record fetch by (projectId, resourceName). Not permission
/// gated, matching the other single-record reads.
pub async fn get_project_resource(
    server: &ApiServer,
    request: GetProjectResourceRequest,
    _verified_user_id: Option<&UserId>,
) -> Result<GetProjectResourceResponse, ApiError> {
    let project_resource = server
        .store
        .get_project_resource(&request.project_id, &request.resource_name)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Project resource not found".into()),
            other => other.into(),
        })?;
    Ok(GetProjectResourceResponse { project_resource })
}

pub async fn add_project_resource(
    server: &ApiServer,
    request: AddProjectResourceRequest,
    verified_user_id: Option<&UserId>,
) -> Result<AddProjectResourceResponse, ApiError> {
    let workspace = server.workspaces.get(&request.workspace_id, false).await?;
    if !user_can_add_project_resource(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to add a project resource in this workspace".into(),
        ));
    }

    let project = server.projects.get(&request.project_id, false).await?;
    if project.workspace_id != request.workspace_id {
        return Err(ApiError::Integrity("Incorrect workspace ID".into()));
    }

    server
        .store
        .insert_project_resource(&ProjectResource {
            project_id: request.project_id.clone(),
            workspace_id: request.workspace_id.clone(),
            resource_name: request.resource_name,
            resource_type: request.resource_type,
            resource_format: request.resource_format,
            timestamp_created: now_timestamp(),
            uri: request.uri,
        })
        .await
        .map_err(|e| match e {
            StoreError::AlreadyExists => {
                ApiError::Conflict("Project resource already exists".into())
            }
            other => other.into(),
        })?;

    server
        .store
        .touch_project(&request.project_id, now_timestamp())
        .await?;
    server.projects.invalidate(&request.project_id);
    server
        .store
        .touch_workspace(&request.workspace_id, now_timestamp())
        .await?;
    server.workspaces.invalidate(&request.workspace_id);

    Ok(AddProjectResourceResponse {})
}

pub async fn delete_project_resource(
    server: &ApiServer,
    request: DeleteProjectResourceRequest,
    verified_user_id: Option<&UserId>,
) -> Result<DeleteProjectResourceResponse, ApiError> {
    let workspace = server.workspaces.get(&request.workspace_id, false).await?;
    if !user_can_delete_project_resource(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to delete a project resource in this workspace".into(),
        ));
    }

    let project = server.projects.get(&request.project_id, false).await?;
    if project.workspace_id != request.workspace_id {
        return Err(ApiError::Integrity("Incorrect workspace ID".into()));
    }

    server
        .store
        .get_project_resource(&request.project_id, &request.resource_name)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Project resource not found".into()),
            other => other.into(),
        })?;
    server
        .store
        .delete_project_resource(&request.project_id, &request.resource_name)
        .await?;

    Ok(DeleteProjectResourceResponse {})
}

pub async fn rename_project_resource(
    server: &ApiServer,
    request: RenameProjectResourceRequest,
    verified_user_id: Option<&UserId>,
) -> Result<RenameProjectResourceResponse, ApiError> {
    let workspace = server.workspaces.get(&request.workspace_id, false).await?;
    if !user_can_add_project_resource(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to rename a project resource in this workspace".into(),
        ));
    }

    let project = server.projects.get(&request.project_id, false).await?;
    if project.workspace_id != request.workspace_id {
        return Err(ApiError::Integrity("Incorrect workspace ID".into()));
    }

    server
        .store
        .get_project_resource(&request.project_id, &request.resource_name)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Project resource not found".into()),
            other => other.into(),
        })?;
    server
        .store
        .rename_project_resource(
            &request.project_id,
            &request.resource_name,
            &request.new_resource_name,
        )
        .await
        .map_err(|e| match e {
            StoreError::AlreadyExists => {
                ApiError::Conflict("Project resource already exists".into())
            }
            other => other.into(),
        })?;

    Ok(RenameProjectResourceResponse {})
}
