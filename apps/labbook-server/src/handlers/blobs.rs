//! Data blob handler.

use labbook_api::{GetDataBlobRequest, GetDataBlobResponse};
use labbook_storage::{StoreError, UserId};

use crate::error::ApiError;
use crate::server::ApiServer;

/// Fetch blob content by (workspaceId, projectId, sha1). Not
/// permission gated: the caller must already hold the content hash,
/// which only workspace readers can obtain from file records.
pub async fn get_data_blob(
    server: &ApiServer,
    request: GetDataBlobRequest,
    _verified_user_id: Option<&UserId>,
) -> Result<GetDataBlobResponse, ApiError> {
    let blob = server
        .store
        .get_data_blob(&request.workspace_id, &request.project_id, &request.sha1)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Data blob not found".into()),
            other => other.into(),
        })?;
    Ok(GetDataBlobResponse {
        content: blob.content,
    })
}
