//! Project file types.

use serde::{Deserialize, Serialize};

use super::{ProjectId, WorkspaceId};

/// Project file record, unique per (projectId, fileName). The record is
/// a pointer plus metadata; the content itself lives in a data blob
/// addressed by `content_sha1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub project_id: ProjectId,
    pub workspace_id: WorkspaceId,
    pub file_name: String,
    pub content_sha1: String,
    pub content_size: i64,
    pub timestamp_modified: f64,
}
