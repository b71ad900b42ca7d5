//! SQLite backend for labbook-storage.
//!
//! One table per collection. Workspace membership lists are stored as a
//! JSON column; a row whose JSON fails to parse surfaces as
//! `StoreError::InvalidShape` rather than being repaired.

use labbook_storage::{
    DataBlob, Project, ProjectFile, ProjectId, ProjectResource, ResourceType, Store, StoreError,
    UserId, Workspace, WorkspaceId, WorkspaceUser,
};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        Self::open("sqlite::memory:").await
    }

    /// Open (creating if missing) a database at a filesystem path.
    pub async fn open_path(path: &str) -> Result<Self, StoreError> {
        Self::open(&format!("sqlite://{path}?mode=rwc")).await
    }

    pub async fn open(url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Self { pool })
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::AlreadyExists,
        _ => StoreError::Backend(e.to_string()),
    }
}

type WorkspaceRow = (
    String,         // workspace_id
    String,         // owner_id
    String,         // name
    String,         // description
    String,         // users (JSON)
    bool,           // publicly_readable
    bool,           // listed
    f64,            // timestamp_created
    f64,            // timestamp_modified
    Option<String>, // compute_resource_id
);

fn workspace_from_row(row: WorkspaceRow) -> Result<Workspace, StoreError> {
    let users: Vec<WorkspaceUser> = serde_json::from_str(&row.4)
        .map_err(|e| StoreError::InvalidShape(format!("workspace {} users: {e}", row.0)))?;
    Ok(Workspace {
        workspace_id: WorkspaceId(row.0),
        owner_id: UserId(row.1),
        name: row.2,
        description: row.3,
        users,
        publicly_readable: row.5,
        listed: row.6,
        timestamp_created: row.7,
        timestamp_modified: row.8,
        compute_resource_id: row.9,
    })
}

type ProjectRow = (String, String, String, String, f64, f64);

fn project_from_row(row: ProjectRow) -> Project {
    Project {
        project_id: ProjectId(row.0),
        workspace_id: WorkspaceId(row.1),
        name: row.2,
        description: row.3,
        timestamp_created: row.4,
        timestamp_modified: row.5,
    }
}

type FileRow = (String, String, String, String, i64, f64);

fn file_from_row(row: FileRow) -> ProjectFile {
    ProjectFile {
        project_id: ProjectId(row.0),
        workspace_id: WorkspaceId(row.1),
        file_name: row.2,
        content_sha1: row.3,
        content_size: row.4,
        timestamp_modified: row.5,
    }
}

type ResourceRow = (String, String, String, String, String, f64, String);

fn resource_from_row(row: ResourceRow) -> Result<ProjectResource, StoreError> {
    let resource_type = match row.3.as_str() {
        "file" => ResourceType::File,
        "uri" => ResourceType::Uri,
        other => {
            return Err(StoreError::InvalidShape(format!(
                "resource {} type: {other}",
                row.2
            )))
        }
    };
    Ok(ProjectResource {
        project_id: ProjectId(row.0),
        workspace_id: WorkspaceId(row.1),
        resource_name: row.2,
        resource_type,
        resource_format: row.4,
        timestamp_created: row.5,
        uri: row.6,
    })
}

#[async_trait::async_trait]
impl Store for SqliteStore {
    // ──────────────────────────── Workspaces ────────────────────────────

    async fn create_workspace(&self, workspace: &Workspace) -> Result<(), StoreError> {
        let users = serde_json::to_string(&workspace.users)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        sqlx::query(
            "INSERT INTO workspaces(workspace_id,owner_id,name,description,users,
                 publicly_readable,listed,timestamp_created,timestamp_modified,compute_resource_id)
             VALUES(?,?,?,?,?,?,?,?,?,?)",
        )
        .bind(&workspace.workspace_id.0)
        .bind(&workspace.owner_id.0)
        .bind(&workspace.name)
        .bind(&workspace.description)
        .bind(users)
        .bind(workspace.publicly_readable)
        .bind(workspace.listed)
        .bind(workspace.timestamp_created)
        .bind(workspace.timestamp_modified)
        .bind(&workspace.compute_resource_id)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn get_workspace(&self, workspace_id: &WorkspaceId) -> Result<Workspace, StoreError> {
        let row = sqlx::query_as::<_, WorkspaceRow>(
            "SELECT workspace_id,owner_id,name,description,users,publicly_readable,listed,
                    timestamp_created,timestamp_modified,compute_resource_id
             FROM workspaces WHERE workspace_id = ?",
        )
        .bind(&workspace_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?;
        workspace_from_row(row)
    }

    async fn list_workspaces(&self) -> Result<Vec<Workspace>, StoreError> {
        let rows = sqlx::query_as::<_, WorkspaceRow>(
            "SELECT workspace_id,owner_id,name,description,users,publicly_readable,listed,
                    timestamp_created,timestamp_modified,compute_resource_id
             FROM workspaces",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        rows.into_iter().map(workspace_from_row).collect()
    }

    async fn update_workspace(&self, workspace: &Workspace) -> Result<(), StoreError> {
        let users = serde_json::to_string(&workspace.users)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let result = sqlx::query(
            "UPDATE workspaces SET owner_id=?,name=?,description=?,users=?,publicly_readable=?,
                 listed=?,timestamp_created=?,timestamp_modified=?,compute_resource_id=?
             WHERE workspace_id=?",
        )
        .bind(&workspace.owner_id.0)
        .bind(&workspace.name)
        .bind(&workspace.description)
        .bind(users)
        .bind(workspace.publicly_readable)
        .bind(workspace.listed)
        .bind(workspace.timestamp_created)
        .bind(workspace.timestamp_modified)
        .bind(&workspace.compute_resource_id)
        .bind(&workspace.workspace_id.0)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn touch_workspace(
        &self,
        workspace_id: &WorkspaceId,
        timestamp: f64,
    ) -> Result<(), StoreError> {
        sqlx::query("UPDATE workspaces SET timestamp_modified = ? WHERE workspace_id = ?")
            .bind(timestamp)
            .bind(&workspace_id.0)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn delete_workspace(&self, workspace_id: &WorkspaceId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM workspaces WHERE workspace_id = ?")
            .bind(&workspace_id.0)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    // ───────────────────────────── Projects ─────────────────────────────

    async fn create_project(&self, project: &Project) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO projects(project_id,workspace_id,name,description,
                 timestamp_created,timestamp_modified)
             VALUES(?,?,?,?,?,?)",
        )
        .bind(&project.project_id.0)
        .bind(&project.workspace_id.0)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.timestamp_created)
        .bind(project.timestamp_modified)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn get_project(&self, project_id: &ProjectId) -> Result<Project, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "SELECT project_id,workspace_id,name,description,timestamp_created,timestamp_modified
             FROM projects WHERE project_id = ?",
        )
        .bind(&project_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?;
        Ok(project_from_row(row))
    }

    async fn list_projects(&self, workspace_id: &WorkspaceId) -> Result<Vec<Project>, StoreError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT project_id,workspace_id,name,description,timestamp_created,timestamp_modified
             FROM projects WHERE workspace_id = ?",
        )
        .bind(&workspace_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        Ok(rows.into_iter().map(project_from_row).collect())
    }

    async fn update_project(&self, project: &Project) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE projects SET workspace_id=?,name=?,description=?,
                 timestamp_created=?,timestamp_modified=?
             WHERE project_id=?",
        )
        .bind(&project.workspace_id.0)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.timestamp_created)
        .bind(project.timestamp_modified)
        .bind(&project.project_id.0)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn touch_project(
        &self,
        project_id: &ProjectId,
        timestamp: f64,
    ) -> Result<(), StoreError> {
        sqlx::query("UPDATE projects SET timestamp_modified = ? WHERE project_id = ?")
            .bind(timestamp)
            .bind(&project_id.0)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn delete_project(&self, project_id: &ProjectId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM projects WHERE project_id = ?")
            .bind(&project_id.0)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn delete_projects_in_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM projects WHERE workspace_id = ?")
            .bind(&workspace_id.0)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    // ─────────────────────────── Project files ──────────────────────────

    async fn upsert_project_file(&self, file: &ProjectFile) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO project_files(project_id,workspace_id,file_name,content_sha1,
                 content_size,timestamp_modified)
             VALUES(?,?,?,?,?,?)
             ON CONFLICT(project_id,file_name) DO UPDATE SET
                 workspace_id=excluded.workspace_id,
                 content_sha1=excluded.content_sha1,
                 content_size=excluded.content_size,
                 timestamp_modified=excluded.timestamp_modified",
        )
        .bind(&file.project_id.0)
        .bind(&file.workspace_id.0)
        .bind(&file.file_name)
        .bind(&file.content_sha1)
        .bind(file.content_size)
        .bind(file.timestamp_modified)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn insert_project_file(&self, file: &ProjectFile) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO project_files(project_id,workspace_id,file_name,content_sha1,
                 content_size,timestamp_modified)
             VALUES(?,?,?,?,?,?)",
        )
        .bind(&file.project_id.0)
        .bind(&file.workspace_id.0)
        .bind(&file.file_name)
        .bind(&file.content_sha1)
        .bind(file.content_size)
        .bind(file.timestamp_modified)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn get_project_file(
        &self,
        project_id: &ProjectId,
        file_name: &str,
    ) -> Result<ProjectFile, StoreError> {
        let row = sqlx::query_as::<_, FileRow>(
            "SELECT project_id,workspace_id,file_name,content_sha1,content_size,timestamp_modified
             FROM project_files WHERE project_id = ? AND file_name = ?",
        )
        .bind(&project_id.0)
        .bind(file_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?;
        Ok(file_from_row(row))
    }

    async fn list_project_files(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectFile>, StoreError> {
        let rows = sqlx::query_as::<_, FileRow>(
            "SELECT project_id,workspace_id,file_name,content_sha1,content_size,timestamp_modified
             FROM project_files WHERE project_id = ?",
        )
        .bind(&project_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        Ok(rows.into_iter().map(file_from_row).collect())
    }

    async fn rename_project_file(
        &self,
        project_id: &ProjectId,
        file_name: &str,
        new_file_name: &str,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE project_files SET file_name = ? WHERE project_id = ? AND file_name = ?",
        )
        .bind(new_file_name)
        .bind(&project_id.0)
        .bind(file_name)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_project_file(
        &self,
        project_id: &ProjectId,
        file_name: &str,
    ) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM project_files WHERE project_id = ? AND file_name = ?")
            .bind(&project_id.0)
            .bind(file_name)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn delete_files_in_project(&self, project_id: &ProjectId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM project_files WHERE project_id = ?")
            .bind(&project_id.0)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn delete_files_in_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM project_files WHERE workspace_id = ?")
            .bind(&workspace_id.0)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn referenced_hashes(&self, project_id: &ProjectId) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query_as::<_, (String,)>(
            "SELECT DISTINCT content_sha1 FROM project_files WHERE project_id = ?",
        )
        .bind(&project_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        Ok(rows.into_iter().map(|(sha1,)| sha1).collect())
    }

    // ──────────────────────────── Data blobs ────────────────────────────

    async fn upsert_data_blob(&self, blob: &DataBlob) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO data_blobs(project_id,workspace_id,sha1,size,content)
             VALUES(?,?,?,?,?)
             ON CONFLICT(project_id,sha1) DO UPDATE SET
                 workspace_id=excluded.workspace_id,
                 size=excluded.size,
                 content=excluded.content",
        )
        .bind(&blob.project_id.0)
        .bind(&blob.workspace_id.0)
        .bind(&blob.sha1)
        .bind(blob.size)
        .bind(&blob.content)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn get_data_blob(
        &self,
        workspace_id: &WorkspaceId,
        project_id: &ProjectId,
        sha1: &str,
    ) -> Result<DataBlob, StoreError> {
        let row = sqlx::query_as::<_, (String, String, String, i64, String)>(
            "SELECT project_id,workspace_id,sha1,size,content
             FROM data_blobs WHERE workspace_id = ? AND project_id = ? AND sha1 = ?",
        )
        .bind(&workspace_id.0)
        .bind(&project_id.0)
        .bind(sha1)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?;
        Ok(DataBlob {
            project_id: ProjectId(row.0),
            workspace_id: WorkspaceId(row.1),
            sha1: row.2,
            size: row.3,
            content: row.4,
        })
    }

    async fn list_data_blobs(&self, project_id: &ProjectId) -> Result<Vec<DataBlob>, StoreError> {
        let rows = sqlx::query_as::<_, (String, String, String, i64, String)>(
            "SELECT project_id,workspace_id,sha1,size,content
             FROM data_blobs WHERE project_id = ?",
        )
        .bind(&project_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        Ok(rows
            .into_iter()
            .map(|row| DataBlob {
                project_id: ProjectId(row.0),
                workspace_id: WorkspaceId(row.1),
                sha1: row.2,
                size: row.3,
                content: row.4,
            })
            .collect())
    }

    async fn delete_blobs_not_referenced(
        &self,
        project_id: &ProjectId,
        referenced: &[String],
    ) -> Result<(), StoreError> {
        let mut qb = sqlx::QueryBuilder::new("DELETE FROM data_blobs WHERE project_id = ");
        qb.push_bind(&project_id.0);
        if !referenced.is_empty() {
            qb.push(" AND sha1 NOT IN (");
            let mut sep = qb.separated(", ");
            for sha1 in referenced {
                sep.push_bind(sha1);
            }
            qb.push(")");
        }
        qb.build().execute(&self.pool).await.map_err(backend)?;
        Ok(())
    }

    async fn delete_blobs_in_project(&self, project_id: &ProjectId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM data_blobs WHERE project_id = ?")
            .bind(&project_id.0)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn delete_blobs_in_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM data_blobs WHERE workspace_id = ?")
            .bind(&workspace_id.0)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    // ─────────────────────────── Project resources ──────────────────────

    async fn insert_project_resource(
        &self,
        resource: &ProjectResource,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO project_resources(project_id,workspace_id,resource_name,resource_type,
                 resource_format,timestamp_created,uri)
             VALUES(?,?,?,?,?,?,?)",
        )
        .bind(&resource.project_id.0)
        .bind(&resource.workspace_id.0)
        .bind(&resource.resource_name)
        .bind(resource.resource_type.as_str())
        .bind(&resource.resource_format)
        .bind(resource.timestamp_created)
        .bind(&resource.uri)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn get_project_resource(
        &self,
        project_id: &ProjectId,
        resource_name: &str,
    ) -> Result<ProjectResource, StoreError> {
        let row = sqlx::query_as::<_, ResourceRow>(
            "SELECT project_id,workspace_id,resource_name,resource_type,resource_format,
                    timestamp_created,uri
             FROM project_resources WHERE project_id = ? AND resource_name = ?",
        )
        .bind(&project_id.0)
        .bind(resource_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?;
        resource_from_row(row)
    }

    async fn list_project_resources(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectResource>, StoreError> {
        let rows = sqlx::query_as::<_, ResourceRow>(
            "SELECT project_id,workspace_id,resource_name,resource_type,resource_format,
                    timestamp_created,uri
             FROM project_resources WHERE project_id = ?",
        )
        .bind(&project_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        rows.into_iter().map(resource_from_row).collect()
    }

    async fn rename_project_resource(
        &self,
        project_id: &ProjectId,
        resource_name: &str,
        new_resource_name: &str,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE project_resources SET resource_name = ?
             WHERE project_id = ? AND resource_name = ?",
        )
        .bind(new_resource_name)
        .bind(&project_id.0)
        .bind(resource_name)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_project_resource(
        &self,
        project_id: &ProjectId,
        resource_name: &str,
    ) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM project_resources WHERE project_id = ? AND resource_name = ?")
            .bind(&project_id.0)
            .bind(resource_name)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
