//! Data blob types.

use serde::{Deserialize, Serialize};

use super::{ProjectId, WorkspaceId};

/// Content-addressed blob, keyed by sha1 within a project scope (not
/// deduplicated across projects). A blob persists only while at least
/// one project file references its hash.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBlob {
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub sha1: String,
    pub size: i64,
    pub content: String,
}
