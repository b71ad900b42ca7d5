//! Project resource types.

use serde::{Deserialize, Serialize};

use super::{ProjectId, WorkspaceId};

/// Kind of external reference a resource points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    File,
    Uri,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::File => "file",
            ResourceType::Uri => "uri",
        }
    }
}

/// Named external reference attached to a project, unique per
/// (projectId, resourceName). Distinct from managed project files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResource {
    pub project_id: ProjectId,
    pub workspace_id: WorkspaceId,
    pub resource_name: String,
    pub resource_type: ResourceType,
    pub resource_format: String,
    pub timestamp_created: f64,
    pub uri: String,
}
