//! Workspace handlers: list, get, create, delete, set users, set property.

use labbook_api::{
    CreateWorkspaceRequest, CreateWorkspaceResponse, DeleteWorkspaceRequest,
    DeleteWorkspaceResponse, GetWorkspaceRequest, GetWorkspaceResponse, GetWorkspacesRequest,
    GetWorkspacesResponse, SetWorkspacePropertyRequest, SetWorkspacePropertyResponse,
    SetWorkspaceUsersRequest, SetWorkspaceUsersResponse,
};
use labbook_storage::{UserId, Workspace, WorkspaceId, WorkspaceProperty};

use crate::error::ApiError;
use crate::permissions::{
    user_can_create_workspace, user_can_delete_workspace, user_can_read_workspace,
    user_can_set_workspace_property, user_can_set_workspace_users,
};
use crate::server::{now_timestamp, random_id, ApiServer};

pub async fn get_workspaces(
    server: &ApiServer,
    _request: GetWorkspacesRequest,
    verified_user_id: Option<&UserId>,
) -> Result<GetWorkspacesResponse, ApiError> {
    let workspaces = server
        .store
        .list_workspaces()
        .await?
        .into_iter()
        .filter(|w| user_can_read_workspace(w, verified_user_id))
        .collect();
    Ok(GetWorkspacesResponse { workspaces })
}

pub async fn get_workspace(
    server: &ApiServer,
    request: GetWorkspaceRequest,
    verified_user_id: Option<&UserId>,
) -> Result<GetWorkspaceResponse, ApiError> {
    let workspace = server.workspaces.get(&request.workspace_id, false).await?;
    if !user_can_read_workspace(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to read this workspace".into(),
        ));
    }
    Ok(GetWorkspaceResponse { workspace })
}

pub async fn create_workspace(
    server: &ApiServer,
    request: CreateWorkspaceRequest,
    verified_user_id: Option<&UserId>,
) -> Result<CreateWorkspaceResponse, ApiError> {
    if !user_can_create_workspace(verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to create a workspace".into(),
        ));
    }
    let owner_id = verified_user_id
        .cloned()
        .ok_or_else(|| ApiError::PermissionDenied("Unexpected: no user ID".into()))?;

    let workspace_id = WorkspaceId(random_id(8));
    let now = now_timestamp();
    let workspace = Workspace {
        workspace_id: workspace_id.clone(),
        owner_id,
        name: request.name,
        description: String::new(),
        users: vec![],
        publicly_readable: true,
        listed: false,
        timestamp_created: now,
        timestamp_modified: now,
        compute_resource_id: None,
    };
    server.store.create_workspace(&workspace).await?;

    Ok(CreateWorkspaceResponse { workspace_id })
}

pub async fn delete_workspace(
    server: &ApiServer,
    request: DeleteWorkspaceRequest,
    verified_user_id: Option<&UserId>,
) -> Result<DeleteWorkspaceResponse, ApiError> {
    let workspace = server.workspaces.get(&request.workspace_id, false).await?;
    if !user_can_delete_workspace(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to delete this workspace".into(),
        ));
    }

    // Ordered cascade, children first, each step awaited. A crash
    // mid-sequence leaves orphaned child records but never a dangling
    // workspace whose children were already purged.
    server
        .store
        .delete_files_in_workspace(&request.workspace_id)
        .await?;
    server
        .store
        .delete_blobs_in_workspace(&request.workspace_id)
        .await?;
    server
        .store
        .delete_projects_in_workspace(&request.workspace_id)
        .await?;
    server.store.delete_workspace(&request.workspace_id).await?;
    server.workspaces.invalidate(&request.workspace_id);

    Ok(DeleteWorkspaceResponse {})
}

pub async fn set_workspace_users(
    server: &ApiServer,
    request: SetWorkspaceUsersRequest,
    verified_user_id: Option<&UserId>,
) -> Result<SetWorkspaceUsersResponse, ApiError> {
    let mut workspace = server.workspaces.get(&request.workspace_id, false).await?;
    if !user_can_set_workspace_users(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to set workspace users".into(),
        ));
    }

    workspace.users = request.users;
    workspace.timestamp_modified = now_timestamp();
    server.store.update_workspace(&workspace).await?;
    server.workspaces.invalidate(&request.workspace_id);

    Ok(SetWorkspaceUsersResponse {})
}

pub async fn set_workspace_property(
    server: &ApiServer,
    request: SetWorkspacePropertyRequest,
    verified_user_id: Option<&UserId>,
) -> Result<SetWorkspacePropertyResponse, ApiError> {
    let mut workspace = server.workspaces.get(&request.workspace_id, false).await?;
    if !user_can_set_workspace_property(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to set a workspace property".into(),
        ));
    }

    match request.property {
        WorkspaceProperty::Name => {
            workspace.name = as_string(&request.value, "name")?;
        }
        WorkspaceProperty::PubliclyReadable => {
            workspace.publicly_readable = as_bool(&request.value, "publiclyReadable")?;
        }
        WorkspaceProperty::Listed => {
            workspace.listed = as_bool(&request.value, "listed")?;
        }
        WorkspaceProperty::ComputeResourceId => {
            workspace.compute_resource_id = if request.value.is_null() {
                None
            } else {
                Some(as_string(&request.value, "computeResourceId")?)
            };
        }
    }
    workspace.timestamp_modified = now_timestamp();
    server.store.update_workspace(&workspace).await?;
    server.workspaces.invalidate(&request.workspace_id);

    Ok(SetWorkspacePropertyResponse {})
}

fn as_string(value: &serde_json::Value, property: &str) -> Result<String, ApiError> {
    value
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| ApiError::MalformedEnvelope(format!("Invalid value for {property}")))
}

fn as_bool(value: &serde_json::Value, property: &str) -> Result<bool, ApiError> {
    value
        .as_bool()
        .ok_or_else(|| ApiError::MalformedEnvelope(format!("Invalid value for {property}")))
}
