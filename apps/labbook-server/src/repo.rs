//! Typed repositories for workspace and project documents.
//!
//! Each repository pairs the store with its own [`ObjectCache`].
//! `use_cache = false` forces a fresh read and is required before any
//! permission-gated mutation, so authorization never acts on stale role
//! data. `invalidate` is part of the contract: every mutation path of a
//! cached record (including denormalized timestamp touches) must call
//! it to bound staleness.

use std::sync::Arc;
use std::time::Duration;

use labbook_storage::{Project, ProjectId, Store, StoreError, Workspace, WorkspaceId};

use crate::cache::ObjectCache;
use crate::error::ApiError;

/// Fixed TTL for both entity caches.
pub const CACHE_TTL: Duration = Duration::from_secs(60);

pub struct WorkspaceRepo {
    store: Arc<dyn Store>,
    cache: ObjectCache<Workspace>,
}

impl WorkspaceRepo {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            cache: ObjectCache::new(CACHE_TTL),
        }
    }

    pub async fn get(
        &self,
        workspace_id: &WorkspaceId,
        use_cache: bool,
    ) -> Result<Workspace, ApiError> {
        if use_cache {
            if let Some(workspace) = self.cache.get(&workspace_id.0) {
                return Ok(workspace);
            }
        }
        let workspace = self
            .store
            .get_workspace(workspace_id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => {
                    ApiError::NotFound(format!("Workspace {workspace_id} not found"))
                }
                other => other.into(),
            })?;
        self.cache.set(&workspace_id.0, workspace.clone());
        Ok(workspace)
    }

    pub fn invalidate(&self, workspace_id: &WorkspaceId) {
        self.cache.delete(&workspace_id.0);
    }
}

pub struct ProjectRepo {
    store: Arc<dyn Store>,
    cache: ObjectCache<Project>,
}

impl ProjectRepo {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            cache: ObjectCache::new(CACHE_TTL),
        }
    }

    pub async fn get(&self, project_id: &ProjectId, use_cache: bool) -> Result<Project, ApiError> {
        if use_cache {
            if let Some(project) = self.cache.get(&project_id.0) {
                return Ok(project);
            }
        }
        let project = self
            .store
            .get_project(project_id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => ApiError::NotFound("Project not found".into()),
                other => other.into(),
            })?;
        self.cache.set(&project_id.0, project.clone());
        Ok(project)
    }

    pub fn invalidate(&self, project_id: &ProjectId) {
        self.cache.delete(&project_id.0);
    }
}
