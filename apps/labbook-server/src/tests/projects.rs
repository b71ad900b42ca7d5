use labbook_api::{
    AddProjectResourceRequest, CloneProjectRequest, DeleteProjectRequest, GetProjectsRequest,
    SetProjectPropertyRequest, SetWorkspaceUsersRequest,
};
use labbook_storage::{ProjectProperty, ResourceType, Role, StoreError, WorkspaceUser};

use crate::error::ApiError;
use crate::handlers::{projects, resources, workspaces};
use crate::server::now_timestamp;
use crate::tests::common::{make_project, make_workspace, put_file, test_server, uid};

#[tokio::test]
async fn projects_are_listed_sorted_by_name() {
    let server = test_server().await;
    let alice = uid("github|alice");
    let workspace_id = make_workspace(&server, &alice, "lab").await;
    make_project(&server, &alice, &workspace_id, "zeta").await;
    make_project(&server, &alice, &workspace_id, "alpha").await;
    make_project(&server, &alice, &workspace_id, "mid").await;

    let listed = projects::get_projects(
        &server,
        GetProjectsRequest {
            timestamp: now_timestamp(),
            workspace_id,
        },
        Some(&alice),
    )
    .await
    .unwrap()
    .projects;
    let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}

#[tokio::test]
async fn delete_project_rejects_mismatched_workspace() {
    let server = test_server().await;
    let alice = uid("github|alice");
    let ws_a = make_workspace(&server, &alice, "a").await;
    let ws_b = make_workspace(&server, &alice, "b").await;
    let project_id = make_project(&server, &alice, &ws_a, "p1").await;

    let err = projects::delete_project(
        &server,
        DeleteProjectRequest {
            timestamp: now_timestamp(),
            workspace_id: ws_b,
            project_id: project_id.clone(),
        },
        Some(&alice),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Integrity(_)));
    assert!(server.store.get_project(&project_id).await.is_ok());
}

#[tokio::test]
async fn delete_project_purges_files_and_blobs() {
    let server = test_server().await;
    let alice = uid("github|alice");
    let workspace_id = make_workspace(&server, &alice, "lab").await;
    let project_id = make_project(&server, &alice, &workspace_id, "p1").await;
    put_file(&server, &alice, &workspace_id, &project_id, "a.txt", "aaa").await;

    projects::delete_project(
        &server,
        DeleteProjectRequest {
            timestamp: now_timestamp(),
            workspace_id,
            project_id: project_id.clone(),
        },
        Some(&alice),
    )
    .await
    .unwrap();

    assert!(matches!(
        server.store.get_project(&project_id).await,
        Err(StoreError::NotFound)
    ));
    assert!(server
        .store
        .list_project_files(&project_id)
        .await
        .unwrap()
        .is_empty());
    assert!(server
        .store
        .list_data_blobs(&project_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn clone_within_workspace_appends_copy_suffix() {
    let server = test_server().await;
    let alice = uid("github|alice");
    let workspace_id = make_workspace(&server, &alice, "lab").await;
    let project_id = make_project(&server, &alice, &workspace_id, "analysis").await;

    let new_project_id = projects::clone_project(
        &server,
        CloneProjectRequest {
            timestamp: now_timestamp(),
            workspace_id: workspace_id.clone(),
            project_id,
            new_workspace_id: workspace_id,
        },
        Some(&alice),
    )
    .await
    .unwrap()
    .new_project_id;

    let clone = server.store.get_project(&new_project_id).await.unwrap();
    assert_eq!(clone.name, "analysis (copy)");
}

#[tokio::test]
async fn clone_across_workspaces_keeps_name_and_copies_content() {
    let server = test_server().await;
    let alice = uid("github|alice");
    let ws_a = make_workspace(&server, &alice, "a").await;
    let ws_b = make_workspace(&server, &alice, "b").await;
    let project_id = make_project(&server, &alice, &ws_a, "analysis").await;
    put_file(&server, &alice, &ws_a, &project_id, "data.csv", "1,2,3").await;
    resources::add_project_resource(
        &server,
        AddProjectResourceRequest {
            timestamp: now_timestamp(),
            workspace_id: ws_a.clone(),
            project_id: project_id.clone(),
            resource_name: "raw".into(),
            resource_type: ResourceType::Uri,
            resource_format: "nwb".into(),
            uri: "https://example.org/raw.nwb".into(),
        },
        Some(&alice),
    )
    .await
    .unwrap();

    let new_project_id = projects::clone_project(
        &server,
        CloneProjectRequest {
            timestamp: now_timestamp(),
            workspace_id: ws_a,
            project_id,
            new_workspace_id: ws_b.clone(),
        },
        Some(&alice),
    )
    .await
    .unwrap()
    .new_project_id;

    let clone = server.store.get_project(&new_project_id).await.unwrap();
    assert_eq!(clone.name, "analysis");
    assert_eq!(clone.workspace_id, ws_b);

    let files = server
        .store
        .list_project_files(&new_project_id)
        .await
        .unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name, "data.csv");
    assert_eq!(files[0].workspace_id, ws_b);

    let blobs = server.store.list_data_blobs(&new_project_id).await.unwrap();
    assert_eq!(blobs.len(), 1);
    assert_eq!(blobs[0].content, "1,2,3");

    // Resources stay with the source project.
    assert!(server
        .store
        .list_project_resources(&new_project_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn clone_requires_editor_on_destination() {
    let server = test_server().await;
    let alice = uid("github|alice");
    let bob = uid("github|bob");
    let ws_src = make_workspace(&server, &alice, "src").await;
    let ws_dst = make_workspace(&server, &alice, "dst").await;
    let project_id = make_project(&server, &alice, &ws_src, "p1").await;
    // bob can view both (public), but cannot write the destination
    let err = projects::clone_project(
        &server,
        CloneProjectRequest {
            timestamp: now_timestamp(),
            workspace_id: ws_src.clone(),
            project_id: project_id.clone(),
            new_workspace_id: ws_dst.clone(),
        },
        Some(&bob),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::PermissionDenied(_)));

    workspaces::set_workspace_users(
        &server,
        SetWorkspaceUsersRequest {
            timestamp: now_timestamp(),
            workspace_id: ws_dst.clone(),
            users: vec![WorkspaceUser {
                user_id: bob.clone(),
                role: Role::Editor,
            }],
        },
        Some(&alice),
    )
    .await
    .unwrap();

    projects::clone_project(
        &server,
        CloneProjectRequest {
            timestamp: now_timestamp(),
            workspace_id: ws_src,
            project_id,
            new_workspace_id: ws_dst,
        },
        Some(&bob),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn set_project_property_renames() {
    let server = test_server().await;
    let alice = uid("github|alice");
    let workspace_id = make_workspace(&server, &alice, "lab").await;
    let project_id = make_project(&server, &alice, &workspace_id, "old").await;

    projects::set_project_property(
        &server,
        SetProjectPropertyRequest {
            timestamp: now_timestamp(),
            project_id: project_id.clone(),
            property: ProjectProperty::Name,
            value: serde_json::json!("new"),
        },
        Some(&alice),
    )
    .await
    .unwrap();

    let project = server.store.get_project(&project_id).await.unwrap();
    assert_eq!(project.name, "new");
}
