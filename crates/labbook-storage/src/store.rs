//! The Store trait that backends implement.

use crate::types::*;
use crate::StoreError;

/// The collection-oriented storage trait the server depends on.
///
/// Mutations are individual statements, not transactions; multi-step
/// updates (cascading deletes, blob garbage collection) are sequenced
/// by the caller with documented partial-failure semantics.
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    // ──────────────────────────── Workspaces ────────────────────────────

    /// Insert a new workspace record.
    async fn create_workspace(&self, workspace: &Workspace) -> Result<(), StoreError>;

    /// Get workspace by id.
    async fn get_workspace(&self, workspace_id: &WorkspaceId) -> Result<Workspace, StoreError>;

    /// List all workspace records.
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, StoreError>;

    /// Replace a workspace record wholesale (keyed by workspaceId).
    async fn update_workspace(&self, workspace: &Workspace) -> Result<(), StoreError>;

    /// Set timestampModified on a workspace (denormalized last-activity signal).
    async fn touch_workspace(
        &self,
        workspace_id: &WorkspaceId,
        timestamp: f64,
    ) -> Result<(), StoreError>;

    /// Delete a workspace record. Child collections are NOT cascaded here;
    /// the caller issues those deletes explicitly, children first.
    async fn delete_workspace(&self, workspace_id: &WorkspaceId) -> Result<(), StoreError>;

    // ───────────────────────────── Projects ─────────────────────────────

    /// Insert a new project record.
    async fn create_project(&self, project: &Project) -> Result<(), StoreError>;

    /// Get project by id.
    async fn get_project(&self, project_id: &ProjectId) -> Result<Project, StoreError>;

    /// List projects in a workspace.
    async fn list_projects(&self, workspace_id: &WorkspaceId) -> Result<Vec<Project>, StoreError>;

    /// Replace a project record wholesale (keyed by projectId).
    async fn update_project(&self, project: &Project) -> Result<(), StoreError>;

    /// Set timestampModified on a project.
    async fn touch_project(
        &self,
        project_id: &ProjectId,
        timestamp: f64,
    ) -> Result<(), StoreError>;

    /// Delete a project record (children not cascaded, see delete_workspace).
    async fn delete_project(&self, project_id: &ProjectId) -> Result<(), StoreError>;

    /// Delete all project records in a workspace.
    async fn delete_projects_in_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), StoreError>;

    // ─────────────────────────── Project files ──────────────────────────

    /// Insert or replace a file record keyed by (projectId, fileName).
    async fn upsert_project_file(&self, file: &ProjectFile) -> Result<(), StoreError>;

    /// Insert a file record; AlreadyExists if (projectId, fileName) is taken.
    async fn insert_project_file(&self, file: &ProjectFile) -> Result<(), StoreError>;

    /// Get file record by (projectId, fileName).
    async fn get_project_file(
        &self,
        project_id: &ProjectId,
        file_name: &str,
    ) -> Result<ProjectFile, StoreError>;

    /// List file records in a project.
    async fn list_project_files(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectFile>, StoreError>;

    /// Rename a file record; AlreadyExists if the destination name is taken.
    async fn rename_project_file(
        &self,
        project_id: &ProjectId,
        file_name: &str,
        new_file_name: &str,
    ) -> Result<(), StoreError>;

    /// Delete a file record by (projectId, fileName).
    async fn delete_project_file(
        &self,
        project_id: &ProjectId,
        file_name: &str,
    ) -> Result<(), StoreError>;

    /// Delete all file records in a project.
    async fn delete_files_in_project(&self, project_id: &ProjectId) -> Result<(), StoreError>;

    /// Delete all file records in a workspace.
    async fn delete_files_in_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), StoreError>;

    /// Distinct contentSha1 values still referenced by files in a project.
    async fn referenced_hashes(&self, project_id: &ProjectId) -> Result<Vec<String>, StoreError>;

    // ──────────────────────────── Data blobs ────────────────────────────

    /// Insert or replace a blob keyed by (projectId, sha1).
    async fn upsert_data_blob(&self, blob: &DataBlob) -> Result<(), StoreError>;

    /// Get a blob by (workspaceId, projectId, sha1).
    async fn get_data_blob(
        &self,
        workspace_id: &WorkspaceId,
        project_id: &ProjectId,
        sha1: &str,
    ) -> Result<DataBlob, StoreError>;

    /// List blobs in a project.
    async fn list_data_blobs(&self, project_id: &ProjectId) -> Result<Vec<DataBlob>, StoreError>;

    /// Garbage-collect: delete blobs in a project whose sha1 is not in
    /// `referenced` (the caller recomputes the referenced set first).
    async fn delete_blobs_not_referenced(
        &self,
        project_id: &ProjectId,
        referenced: &[String],
    ) -> Result<(), StoreError>;

    /// Delete all blobs in a project.
    async fn delete_blobs_in_project(&self, project_id: &ProjectId) -> Result<(), StoreError>;

    /// Delete all blobs in a workspace.
    async fn delete_blobs_in_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), StoreError>;

    // ─────────────────────────── Project resources ──────────────────────

    /// Insert a resource; AlreadyExists if (projectId, resourceName) is taken.
    async fn insert_project_resource(&self, resource: &ProjectResource)
        -> Result<(), StoreError>;

    /// Get resource by (projectId, resourceName).
    async fn get_project_resource(
        &self,
        project_id: &ProjectId,
        resource_name: &str,
    ) -> Result<ProjectResource, StoreError>;

    /// List resources in a project.
    async fn list_project_resources(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectResource>, StoreError>;

    /// Rename a resource; AlreadyExists if the destination name is taken.
    async fn rename_project_resource(
        &self,
        project_id: &ProjectId,
        resource_name: &str,
        new_resource_name: &str,
    ) -> Result<(), StoreError>;

    /// Delete a resource by (projectId, resourceName).
    async fn delete_project_resource(
        &self,
        project_id: &ProjectId,
        resource_name: &str,
    ) -> Result<(), StoreError>;
}
