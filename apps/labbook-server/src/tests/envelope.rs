//! Dispatch-order tests: freshness and identity resolution happen
//! before any handler runs.

use labbook_api::{
    ApiRequest, CreateWorkspaceRequest, DeleteWorkspaceRequest, GetWorkspaceRequest,
    RequestPayload,
};
use labbook_storage::{StoreError, WorkspaceId};

use crate::error::ApiError;
use crate::http::process;
use crate::server::now_timestamp;
use crate::tests::common::{make_workspace, test_server, test_server_with, uid, StaticTokenVerifier};

fn envelope(payload: RequestPayload, user_id: Option<&str>, token: Option<&str>) -> ApiRequest {
    ApiRequest {
        payload,
        user_id: user_id.map(uid),
        github_access_token: token.map(|t| t.to_string()),
        signature: None,
    }
}

#[tokio::test]
async fn stale_timestamp_is_rejected_before_any_lookup() {
    let server = test_server().await;
    // Nonexistent workspace: a NotFound here would prove the handler
    // ran; the stale envelope must short-circuit first.
    let request = envelope(
        RequestPayload::GetWorkspace(GetWorkspaceRequest {
            timestamp: now_timestamp() - 45.0,
            workspace_id: WorkspaceId("does-not-exist".into()),
        }),
        None,
        None,
    );
    let err = process(&server, request).await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedEnvelope(_)));
}

#[tokio::test]
async fn invalid_token_is_fatal() {
    let server = test_server_with(vec![], StaticTokenVerifier::new(&[("alice", "tok")])).await;
    let request = envelope(
        RequestPayload::CreateWorkspace(CreateWorkspaceRequest {
            timestamp: now_timestamp(),
            name: "lab".into(),
        }),
        Some("github|alice"),
        Some("wrong"),
    );
    let err = process(&server, request).await.unwrap_err();
    assert!(matches!(err, ApiError::IdentityVerificationFailed(_)));
}

#[tokio::test]
async fn claim_without_token_proceeds_anonymous() {
    let server = test_server().await;
    // The claimed id is dropped, and anonymous users cannot create
    // workspaces.
    let request = envelope(
        RequestPayload::CreateWorkspace(CreateWorkspaceRequest {
            timestamp: now_timestamp(),
            name: "lab".into(),
        }),
        Some("github|alice"),
        None,
    );
    let err = process(&server, request).await.unwrap_err();
    assert!(matches!(err, ApiError::PermissionDenied(_)));
}

#[tokio::test]
async fn admin_claim_requires_allow_list() {
    let server = test_server_with(vec![], StaticTokenVerifier::new(&[("root", "sekrit")])).await;
    let request = envelope(
        RequestPayload::CreateWorkspace(CreateWorkspaceRequest {
            timestamp: now_timestamp(),
            name: "lab".into(),
        }),
        Some("admin|github|root"),
        Some("sekrit"),
    );
    let err = process(&server, request).await.unwrap_err();
    assert!(matches!(err, ApiError::IdentityVerificationFailed(_)));
}

#[tokio::test]
async fn allow_listed_admin_bypasses_workspace_roles() {
    let server = test_server_with(
        vec!["github|root".into()],
        StaticTokenVerifier::new(&[("root", "sekrit")]),
    )
    .await;
    let alice = uid("github|alice");
    let workspace_id = make_workspace(&server, &alice, "lab").await;

    let request = envelope(
        RequestPayload::DeleteWorkspace(DeleteWorkspaceRequest {
            timestamp: now_timestamp(),
            workspace_id: workspace_id.clone(),
        }),
        Some("admin|github|root"),
        Some("sekrit"),
    );
    process(&server, request).await.unwrap();
    assert!(matches!(
        server.store.get_workspace(&workspace_id).await,
        Err(StoreError::NotFound)
    ));
}
