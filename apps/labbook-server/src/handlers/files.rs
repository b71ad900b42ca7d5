//! Project file handlers: list, get, set, delete, duplicate, rename.
//!
//! File content is content-addressed: the file record carries the sha1
//! of its content and the bytes live in the blob table keyed by
//! (projectId, sha1). Deleting a file record re-scans the project's
//! referenced hashes and garbage-collects unreferenced blobs.

use labbook_api::{
    DeleteProjectFileRequest, DeleteProjectFileResponse, DuplicateProjectFileRequest,
    DuplicateProjectFileResponse, GetProjectFileRequest, GetProjectFileResponse,
    GetProjectFilesRequest, GetProjectFilesResponse, RenameProjectFileRequest,
    RenameProjectFileResponse, SetProjectFileRequest, SetProjectFileResponse,
};
use labbook_storage::{DataBlob, ProjectFile, StoreError, UserId};

use crate::error::ApiError;
use crate::permissions::{
    user_can_delete_project_file, user_can_read_workspace, user_can_set_project_file,
};
use crate::server::{now_timestamp, sha1_of, ApiServer};

pub async fn get_project_files(
    server: &ApiServer,
    request: GetProjectFilesRequest,
    verified_user_id: Option<&UserId>,
) -> Result<GetProjectFilesResponse, ApiError> {
    let project = server.projects.get(&request.project_id, true).await?;
    let workspace = server.workspaces.get(&project.workspace_id, true).await?;
    if !user_can_read_workspace(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to read this workspace".into(),
        ));
    }

    let project_files = server.store.list_project_files(&request.project_id).await?;
    Ok(GetProjectFilesResponse { project_files })
}

/// Single-record fetch by (projectId, fileName). Not permission gated;
/// the record holds only metadata plus a content hash.
pub async fn get_project_file(
    server: &ApiServer,
    request: GetProjectFileRequest,
    _verified_user_id: Option<&UserId>,
) -> Result<GetProjectFileResponse, ApiError> {
    let project_file = server
        .store
        .get_project_file(&request.project_id, &request.file_name)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Project file not found".into()),
            other => other.into(),
        })?;
    Ok(GetProjectFileResponse { project_file })
}

pub async fn set_project_file(
    server: &ApiServer,
    request: SetProjectFileRequest,
    verified_user_id: Option<&UserId>,
) -> Result<SetProjectFileResponse, ApiError> {
    let workspace = server.workspaces.get(&request.workspace_id, false).await?;
    if !user_can_set_project_file(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to set a project file in this workspace".into(),
        ));
    }

    let project = server.projects.get(&request.project_id, false).await?;
    if project.workspace_id != request.workspace_id {
        return Err(ApiError::Integrity("Incorrect workspace ID".into()));
    }

    let sha1 = sha1_of(&request.file_content);
    let size = request.file_content.len() as i64;

    // Blob first so the file record never points at missing content.
    server
        .store
        .upsert_data_blob(&DataBlob {
            workspace_id: request.workspace_id.clone(),
            project_id: request.project_id.clone(),
            sha1: sha1.clone(),
            size,
            content: request.file_content,
        })
        .await?;
    server
        .store
        .upsert_project_file(&ProjectFile {
            project_id: request.project_id.clone(),
            workspace_id: request.workspace_id.clone(),
            file_name: request.file_name,
            content_sha1: sha1,
            content_size: size,
            timestamp_modified: now_timestamp(),
        })
        .await?;

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

    Ok(SetProjectFileResponse {})
}

pub async fn delete_project_file(
    server: &ApiServer,
    request: DeleteProjectFileRequest,
    verified_user_id: Option<&UserId>,
) -> Result<DeleteProjectFileResponse, ApiError> {
    let workspace = server.workspaces.get(&request.workspace_id, false).await?;
    if !user_can_delete_project_file(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to delete a project file in this workspace".into(),
        ));
    }

    let project = server.projects.get(&request.project_id, false).await?;
    if project.workspace_id != request.workspace_id {
        return Err(ApiError::Integrity("Incorrect workspace ID".into()));
    }

    server
        .store
        .get_project_file(&request.project_id, &request.file_name)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Project file not found".into()),
            other => other.into(),
        })?;
    server
        .store
        .delete_project_file(&request.project_id, &request.file_name)
        .await?;

    // Garbage-collect blobs no longer referenced by any file record.
    // The referenced set is recomputed after the delete so a hash
    // shared with another file survives.
    let referenced = server.store.referenced_hashes(&request.project_id).await?;
    server
        .store
        .delete_blobs_not_referenced(&request.project_id, &referenced)
        .await?;

    Ok(DeleteProjectFileResponse {})
}

pub async fn duplicate_project_file(
    server: &ApiServer,
    request: DuplicateProjectFileRequest,
    verified_user_id: Option<&UserId>,
) -> Result<DuplicateProjectFileResponse, ApiError> {
    let workspace = server.workspaces.get(&request.workspace_id, false).await?;
    if !user_can_set_project_file(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to duplicate a project file in this workspace".into(),
        ));
    }

    let project = server.projects.get(&request.project_id, false).await?;
    if project.workspace_id != request.workspace_id {
        return Err(ApiError::Integrity("Incorrect workspace ID".into()));
    }

    let source = server
        .store
        .get_project_file(&request.project_id, &request.file_name)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Project file not found".into()),
            other => other.into(),
        })?;

    // The copy shares the source's blob; only the record is new.
    server
        .store
        .insert_project_file(&ProjectFile {
            file_name: request.new_file_name,
            timestamp_modified: now_timestamp(),
            ..source
        })
        .await
        .map_err(|e| match e {
            StoreError::AlreadyExists => {
                ApiError::Conflict("Project file already exists".into())
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

    Ok(DuplicateProjectFileResponse {})
}

pub async fn rename_project_file(
    server: &ApiServer,
    request: RenameProjectFileRequest,
    verified_user_id: Option<&UserId>,
) -> Result<RenameProjectFileResponse, ApiError> {
    let workspace = server.workspaces.get(&request.workspace_id, false).await?;
    if !user_can_set_project_file(&workspace, verified_user_id) {
        return Err(ApiError::PermissionDenied(
            "User does not have permission to rename a project file in this workspace".into(),
        ));
    }

    let project = server.projects.get(&request.project_id, false).await?;
    if project.workspace_id != request.workspace_id {
        return Err(ApiError::Integrity("Incorrect workspace ID".into()));
    }

    server
        .store
        .get_project_file(&request.project_id, &request.file_name)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Project file not found".into()),
            other => other.into(),
        })?;
    server
        .store
        .rename_project_file(&request.project_id, &request.file_name, &request.new_file_name)
        .await
        .map_err(|e| match e {
            StoreError::AlreadyExists => {
                ApiError::Conflict("Project file already exists".into())
            }
            other => other.into(),
        })?;

    Ok(RenameProjectFileResponse {})
}
