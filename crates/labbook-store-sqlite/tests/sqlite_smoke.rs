use labbook_storage::{
    DataBlob, Project, ProjectFile, ProjectId, ProjectResource, ResourceType, Role, Store,
    StoreError, UserId, Workspace, WorkspaceId, WorkspaceUser,
};
use labbook_store_sqlite::SqliteStore;

fn workspace(id: &str, owner: &str) -> Workspace {
    Workspace {
        workspace_id: WorkspaceId(id.into()),
        owner_id: UserId(owner.into()),
        name: "test-workspace".into(),
        description: String::new(),
        users: vec![],
        publicly_readable: true,
        listed: false,
        timestamp_created: 1000.0,
        timestamp_modified: 1000.0,
        compute_resource_id: None,
    }
}

fn project(id: &str, workspace_id: &str) -> Project {
    Project {
        project_id: ProjectId(id.into()),
        workspace_id: WorkspaceId(workspace_id.into()),
        name: "p1".into(),
        description: String::new(),
        timestamp_created: 1000.0,
        timestamp_modified: 1000.0,
    }
}

fn file(project_id: &str, workspace_id: &str, name: &str, sha1: &str) -> ProjectFile {
    ProjectFile {
        project_id: ProjectId(project_id.into()),
        workspace_id: WorkspaceId(workspace_id.into()),
        file_name: name.into(),
        content_sha1: sha1.into(),
        content_size: 4,
        timestamp_modified: 1000.0,
    }
}

#[tokio::test]
async fn end_to_end_happy_path_and_updates() {
    let s = SqliteStore::open_in_memory().await.unwrap();

    s.create_workspace(&workspace("w1", "github|100")).await.unwrap();
    let mut ws = s.get_workspace(&WorkspaceId("w1".into())).await.unwrap();
    assert_eq!(ws.name, "test-workspace");
    assert!(ws.publicly_readable);

    ws.users.push(WorkspaceUser {
        user_id: UserId("github|200".into()),
        role: Role::Viewer,
    });
    ws.publicly_readable = false;
    s.update_workspace(&ws).await.unwrap();
    let ws = s.get_workspace(&WorkspaceId("w1".into())).await.unwrap();
    assert_eq!(ws.users.len(), 1);
    assert_eq!(ws.users[0].role, Role::Viewer);
    assert!(!ws.publicly_readable);

    s.create_project(&project("p1", "w1")).await.unwrap();
    let projects = s.list_projects(&WorkspaceId("w1".into())).await.unwrap();
    assert_eq!(projects.len(), 1);

    s.touch_project(&ProjectId("p1".into()), 2000.0).await.unwrap();
    let p = s.get_project(&ProjectId("p1".into())).await.unwrap();
    assert_eq!(p.timestamp_modified, 2000.0);

    s.touch_workspace(&WorkspaceId("w1".into()), 2000.0).await.unwrap();
    let ws = s.get_workspace(&WorkspaceId("w1".into())).await.unwrap();
    assert_eq!(ws.timestamp_modified, 2000.0);
}

#[tokio::test]
async fn get_missing_workspace_is_not_found() {
    let s = SqliteStore::open_in_memory().await.unwrap();
    let err = s.get_workspace(&WorkspaceId("nope".into())).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
}

#[tokio::test]
async fn file_uniqueness_and_rename_conflicts() {
    let s = SqliteStore::open_in_memory().await.unwrap();
    s.create_workspace(&workspace("w1", "github|100")).await.unwrap();
    s.create_project(&project("p1", "w1")).await.unwrap();

    s.insert_project_file(&file("p1", "w1", "a.txt", "aaaa")).await.unwrap();
    s.insert_project_file(&file("p1", "w1", "b.txt", "bbbb")).await.unwrap();

    // second insert of the same name hits the unique constraint
    let err = s
        .insert_project_file(&file("p1", "w1", "a.txt", "cccc"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists));

    // upsert replaces in place
    s.upsert_project_file(&file("p1", "w1", "a.txt", "cccc")).await.unwrap();
    let f = s.get_project_file(&ProjectId("p1".into()), "a.txt").await.unwrap();
    assert_eq!(f.content_sha1, "cccc");

    // rename onto an existing name is a conflict; rename of a missing
    // name is NotFound
    let err = s
        .rename_project_file(&ProjectId("p1".into()), "a.txt", "b.txt")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists));
    let err = s
        .rename_project_file(&ProjectId("p1".into()), "zzz.txt", "q.txt")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound));

    s.rename_project_file(&ProjectId("p1".into()), "a.txt", "c.txt").await.unwrap();
    assert!(s.get_project_file(&ProjectId("p1".into()), "c.txt").await.is_ok());
}

#[tokio::test]
async fn blob_garbage_collection_by_reference_set() {
    let s = SqliteStore::open_in_memory().await.unwrap();
    s.create_workspace(&workspace("w1", "github|100")).await.unwrap();
    s.create_project(&project("p1", "w1")).await.unwrap();

    for sha1 in ["aaaa", "bbbb", "cccc"] {
        s.upsert_data_blob(&DataBlob {
            workspace_id: WorkspaceId("w1".into()),
            project_id: ProjectId("p1".into()),
            sha1: sha1.into(),
            size: 4,
            content: "data".into(),
        })
        .await
        .unwrap();
    }

    s.delete_blobs_not_referenced(&ProjectId("p1".into()), &["bbbb".into()])
        .await
        .unwrap();
    let blobs = s.list_data_blobs(&ProjectId("p1".into())).await.unwrap();
    assert_eq!(blobs.len(), 1);
    assert_eq!(blobs[0].sha1, "bbbb");

    // empty reference set deletes everything in the project
    s.delete_blobs_not_referenced(&ProjectId("p1".into()), &[]).await.unwrap();
    assert!(s.list_data_blobs(&ProjectId("p1".into())).await.unwrap().is_empty());
}

#[tokio::test]
async fn resource_uniqueness() {
    let s = SqliteStore::open_in_memory().await.unwrap();
    s.create_workspace(&workspace("w1", "github|100")).await.unwrap();
    s.create_project(&project("p1", "w1")).await.unwrap();

    let resource = ProjectResource {
        project_id: ProjectId("p1".into()),
        workspace_id: WorkspaceId("w1".into()),
        resource_name: "recording".into(),
        resource_type: ResourceType::Uri,
        resource_format: "nwb".into(),
        timestamp_created: 1000.0,
        uri: "https://example.org/recording.nwb".into(),
    };
    s.insert_project_resource(&resource).await.unwrap();
    let err = s.insert_project_resource(&resource).await.unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists));

    let got = s
        .get_project_resource(&ProjectId("p1".into()), "recording")
        .await
        .unwrap();
    assert_eq!(got.resource_type, ResourceType::Uri);
}
