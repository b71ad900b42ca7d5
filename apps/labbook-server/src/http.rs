//! HTTP transport: the single dispatch endpoint plus health and
//! metrics routes.
//!
//! Every operation arrives as `POST /api` with an [`ApiRequest`]
//! envelope. Dispatch order is fixed: freshness check, identity
//! resolution, then an exhaustive match over the payload variants.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use labbook_api::{ApiRequest, RequestPayload, ResponsePayload};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;

use crate::error::ApiError;
use crate::github::resolve_identity;
use crate::handlers::{blobs, files, projects, resources, workspaces};
use crate::metrics::{record_request, record_request_error};
use crate::server::{now_timestamp, ApiServer};

/// Maximum age (and clock skew) of a request timestamp, in seconds.
pub const FRESHNESS_WINDOW_SECS: f64 = 30.0;

#[derive(Clone)]
pub struct AppState {
    pub server: Arc<ApiServer>,
    pub metrics: PrometheusHandle,
}

/// Run a request envelope through freshness, identity and dispatch.
pub async fn process(
    server: &ApiServer,
    request: ApiRequest,
) -> Result<ResponsePayload, ApiError> {
    // Freshness first: a stale envelope is rejected before identity
    // resolution or any store access, so the caller learns nothing
    // about the referenced entities.
    if (now_timestamp() - request.payload.timestamp()).abs() > FRESHNESS_WINDOW_SECS {
        return Err(ApiError::MalformedEnvelope("Invalid timestamp".into()));
    }

    let verified_user_id = resolve_identity(
        request.user_id.as_ref(),
        request.github_access_token.as_deref(),
        &server.config.admin_user_ids,
        server.verifier.as_ref(),
    )
    .await?;
    let user = verified_user_id.as_ref();

    match request.payload {
        RequestPayload::GetWorkspaces(r) => workspaces::get_workspaces(server, r, user)
            .await
            .map(ResponsePayload::GetWorkspaces),
        RequestPayload::GetWorkspace(r) => workspaces::get_workspace(server, r, user)
            .await
            .map(ResponsePayload::GetWorkspace),
        RequestPayload::CreateWorkspace(r) => workspaces::create_workspace(server, r, user)
            .await
            .map(ResponsePayload::CreateWorkspace),
        RequestPayload::DeleteWorkspace(r) => workspaces::delete_workspace(server, r, user)
            .await
            .map(ResponsePayload::DeleteWorkspace),
        RequestPayload::SetWorkspaceUsers(r) => workspaces::set_workspace_users(server, r, user)
            .await
            .map(ResponsePayload::SetWorkspaceUsers),
        RequestPayload::SetWorkspaceProperty(r) => {
            workspaces::set_workspace_property(server, r, user)
                .await
                .map(ResponsePayload::SetWorkspaceProperty)
        }
        RequestPayload::GetProjects(r) => projects::get_projects(server, r, user)
            .await
            .map(ResponsePayload::GetProjects),
        RequestPayload::GetProject(r) => projects::get_project(server, r, user)
            .await
            .map(ResponsePayload::GetProject),
        RequestPayload::CreateProject(r) => projects::create_project(server, r, user)
            .await
            .map(ResponsePayload::CreateProject),
        RequestPayload::DeleteProject(r) => projects::delete_project(server, r, user)
            .await
            .map(ResponsePayload::DeleteProject),
        RequestPayload::CloneProject(r) => projects::clone_project(server, r, user)
            .await
            .map(ResponsePayload::CloneProject),
        RequestPayload::SetProjectProperty(r) => projects::set_project_property(server, r, user)
            .await
            .map(ResponsePayload::SetProjectProperty),
        RequestPayload::GetProjectFiles(r) => files::get_project_files(server, r, user)
            .await
            .map(ResponsePayload::GetProjectFiles),
        RequestPayload::GetProjectFile(r) => files::get_project_file(server, r, user)
            .await
            .map(ResponsePayload::GetProjectFile),
        RequestPayload::SetProjectFile(r) => files::set_project_file(server, r, user)
            .await
            .map(ResponsePayload::SetProjectFile),
        RequestPayload::DeleteProjectFile(r) => files::delete_project_file(server, r, user)
            .await
            .map(ResponsePayload::DeleteProjectFile),
        RequestPayload::DuplicateProjectFile(r) => files::duplicate_project_file(server, r, user)
            .await
            .map(ResponsePayload::DuplicateProjectFile),
        RequestPayload::RenameProjectFile(r) => files::rename_project_file(server, r, user)
            .await
            .map(ResponsePayload::RenameProjectFile),
        RequestPayload::GetProjectResources(r) => resources::get_project_resources(server, r, user)
            .await
            .map(ResponsePayload::GetProjectResources),
        RequestPayload::GetProjectResource(r) => resources::get_project_resource(server, r, user)
            .await
            .map(ResponsePayload::GetProjectResource),
        RequestPayload::AddProjectResource(r) => resources::add_project_resource(server, r, user)
            .await
            .map(ResponsePayload::AddProjectResource),
        RequestPayload::DeleteProjectResource(r) => {
            resources::delete_project_resource(server, r, user)
                .await
                .map(ResponsePayload::DeleteProjectResource)
        }
        RequestPayload::RenameProjectResource(r) => {
            resources::rename_project_resource(server, r, user)
                .await
                .map(ResponsePayload::RenameProjectResource)
        }
        RequestPayload::GetDataBlob(r) => blobs::get_data_blob(server, r, user)
            .await
            .map(ResponsePayload::GetDataBlob),
    }
}

async fn api_handler(State(state): State<AppState>, body: String) -> Response {
    // Parse by hand so a malformed envelope maps to the same
    // "Error: ..." plain-text shape as every other failure.
    let request: ApiRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            record_request_error("unknown", "malformed_envelope");
            return ApiError::MalformedEnvelope(e.to_string()).into_response();
        }
    };

    let op = request.payload.kind();
    let start = Instant::now();
    match process(&state.server, request).await {
        Ok(payload) => {
            record_request(op, start.elapsed());
            Json(payload).into_response()
        }
        Err(e) => {
            tracing::debug!(op, error = %e, "request failed");
            record_request_error(op, e.label());
            e.into_response()
        }
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn metrics_handler(State(state): State<AppState>) -> String {
    state.metrics.render()
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.server.config.cors_origins);
    Router::new()
        .route("/api", post(api_handler))
        .route("/healthz", get(health_handler))
        .route("/readyz", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(cors)
        .with_state(state)
}
