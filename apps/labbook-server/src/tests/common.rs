//! Shared fixtures: in-memory server, stub token verifier, entity helpers.

use std::collections::HashMap;
use std::sync::Arc;

use labbook_api::{CreateProjectRequest, CreateWorkspaceRequest, SetProjectFileRequest};
use labbook_storage::{ProjectId, UserId, WorkspaceId};
use labbook_store_sqlite::SqliteStore;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::github::TokenVerifier;
use crate::handlers::{files, projects, workspaces};
use crate::server::{now_timestamp, ApiServer};

/// Verifier backed by a fixed (external id, token) table.
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    pub fn new(tokens: &[(&str, &str)]) -> Self {
        Self {
            tokens: tokens
                .iter()
                .map(|(id, token)| (id.to_string(), token.to_string()))
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, external_id: &str, access_token: &str) -> Result<bool, ApiError> {
        Ok(self
            .tokens
            .get(external_id)
            .is_some_and(|t| t == access_token))
    }
}

pub async fn test_server() -> ApiServer {
    test_server_with(vec![], StaticTokenVerifier::new(&[])).await
}

pub async fn test_server_with(
    admin_user_ids: Vec<String>,
    verifier: StaticTokenVerifier,
) -> ApiServer {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let config = ServerConfig {
        admin_user_ids,
        ..ServerConfig::default()
    };
    ApiServer::new(store, Arc::new(verifier), config)
}

pub fn uid(s: &str) -> UserId {
    UserId(s.to_string())
}

pub async fn make_workspace(server: &ApiServer, owner: &UserId, name: &str) -> WorkspaceId {
    workspaces::create_workspace(
        server,
        CreateWorkspaceRequest {
            timestamp: now_timestamp(),
            name: name.to_string(),
        },
        Some(owner),
    )
    .await
    .unwrap()
    .workspace_id
}

pub async fn make_project(
    server: &ApiServer,
    user: &UserId,
    workspace_id: &WorkspaceId,
    name: &str,
) -> ProjectId {
    projects::create_project(
        server,
        CreateProjectRequest {
            timestamp: now_timestamp(),
            workspace_id: workspace_id.clone(),
            name: name.to_string(),
        },
        Some(user),
    )
    .await
    .unwrap()
    .project_id
}

pub async fn put_file(
    server: &ApiServer,
    user: &UserId,
    workspace_id: &WorkspaceId,
    project_id: &ProjectId,
    file_name: &str,
    content: &str,
) {
    files::set_project_file(
        server,
        SetProjectFileRequest {
            timestamp: now_timestamp(),
            workspace_id: workspace_id.clone(),
            project_id: project_id.clone(),
            file_name: file_name.to_string(),
            file_content: content.to_string(),
        },
        Some(user),
    )
    .await
    .unwrap();
}
