//! Project types.

use serde::{Deserialize, Serialize};

use super::{ProjectId, WorkspaceId};

/// Project record. Always belongs to exactly one workspace; every
/// mutating operation re-checks the claimed workspaceId against this
/// record's.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: ProjectId,
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub description: String,
    pub timestamp_created: f64,
    pub timestamp_modified: f64,
}

/// Mutable project properties settable via setProjectProperty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectProperty {
    Name,
}
