//! Request handlers, one async fn per operation, organized by entity:
//! - workspaces: list, get, create, delete, set users, set property
//! - projects: list, get, create, delete, clone, set property
//! - files: list, get, set, delete, duplicate, rename
//! - resources: list, get, add, delete, rename
//! - blobs: get
//!
//! Shared shape: re-fetch authoritative entities uncached, validate
//! claimed foreign keys (IntegrityError), evaluate the permission
//! policy (PermissionDenied), perform mutations sequentially, then
//! touch denormalized timestamps best-effort.

pub mod blobs;
pub mod files;
pub mod projects;
pub mod resources;
pub mod workspaces;
