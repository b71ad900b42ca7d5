use labbook_api::{
    AddProjectResourceRequest, DeleteProjectResourceRequest, GetProjectResourceRequest,
    GetProjectResourcesRequest, RenameProjectResourceRequest,
};
use labbook_storage::{ProjectId, ResourceType, UserId, WorkspaceId};

use crate::error::ApiError;
use crate::handlers::resources;
use crate::server::{now_timestamp, ApiServer};
use crate::tests::common::{make_project, make_workspace, test_server, uid};

async fn add_resource(
    server: &ApiServer,
    user: &UserId,
    workspace_id: &WorkspaceId,
    project_id: &ProjectId,
    name: &str,
) {
    resources::add_project_resource(
        server,
        AddProjectResourceRequest {
            timestamp: now_timestamp(),
            workspace_id: workspace_id.clone(),
            project_id: project_id.clone(),
            resource_name: name.to_string(),
            resource_type: ResourceType::Uri,
            resource_format: "nwb".into(),
            uri: format!("https://example.org/{name}"),
        },
        Some(user),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn add_get_and_list_resources() {
    let server = test_server().await;
    let alice = uid("github|alice");
    let workspace_id = make_workspace(&server, &alice, "lab").await;
    let project_id = make_project(&server, &alice, &workspace_id, "p1").await;
    add_resource(&server, &alice, &workspace_id, &project_id, "session1").await;
    add_resource(&server, &alice, &workspace_id, &project_id, "session2").await;

    let one = resources::get_project_resource(
        &server,
        GetProjectResourceRequest {
            timestamp: now_timestamp(),
            project_id: project_id.clone(),
            resource_name: "session1".into(),
        },
        Some(&alice),
    )
    .await
    .unwrap()
    .project_resource;
    assert_eq!(one.resource_type, ResourceType::Uri);
    assert_eq!(one.uri, "https://example.org/session1");

    let all = resources::get_project_resources(
        &server,
        GetProjectResourcesRequest {
            timestamp: now_timestamp(),
            project_id,
        },
        Some(&alice),
    )
    .await
    .unwrap()
    .project_resources;
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn adding_duplicate_resource_name_conflicts() {
    let server = test_server().await;
    let alice = uid("github|alice");
    let workspace_id = make_workspace(&server, &alice, "lab").await;
    let project_id = make_project(&server, &alice, &workspace_id, "p1").await;
    add_resource(&server, &alice, &workspace_id, &project_id, "session1").await;

    let err = resources::add_project_resource(
        &server,
        AddProjectResourceRequest {
            timestamp: now_timestamp(),
            workspace_id,
            project_id,
            resource_name: "session1".into(),
            resource_type: ResourceType::File,
            resource_format: "csv".into(),
            uri: "https://example.org/other".into(),
        },
        Some(&alice),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn rename_resource_conflicts_on_taken_name() {
    let server = test_server().await;
    let alice = uid("github|alice");
    let workspace_id = make_workspace(&server, &alice, "lab").await;
    let project_id = make_project(&server, &alice, &workspace_id, "p1").await;
    add_resource(&server, &alice, &workspace_id, &project_id, "a").await;
    add_resource(&server, &alice, &workspace_id, &project_id, "b").await;

    let err = resources::rename_project_resource(
        &server,
        RenameProjectResourceRequest {
            timestamp: now_timestamp(),
            workspace_id: workspace_id.clone(),
            project_id: project_id.clone(),
            resource_name: "a".into(),
            new_resource_name: "b".into(),
        },
        Some(&alice),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    resources::rename_project_resource(
        &server,
        RenameProjectResourceRequest {
            timestamp: now_timestamp(),
            workspace_id,
            project_id: project_id.clone(),
            resource_name: "a".into(),
            new_resource_name: "c".into(),
        },
        Some(&alice),
    )
    .await
    .unwrap();
    assert!(server.store.get_project_resource(&project_id, "c").await.is_ok());
}

#[tokio::test]
async fn delete_resource_removes_it() {
    let server = test_server().await;
    let alice = uid("github|alice");
    let workspace_id = make_workspace(&server, &alice, "lab").await;
    let project_id = make_project(&server, &alice, &workspace_id, "p1").await;
    add_resource(&server, &alice, &workspace_id, &project_id, "a").await;

    resources::delete_project_resource(
        &server,
        DeleteProjectResourceRequest {
            timestamp: now_timestamp(),
            workspace_id,
            project_id: project_id.clone(),
            resource_name: "a".into(),
        },
        Some(&alice),
    )
    .await
    .unwrap();

    let err = resources::get_project_resource(
        &server,
        GetProjectResourceRequest {
            timestamp: now_timestamp(),
            project_id,
            resource_name: "a".into(),
        },
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
