//! Entity types shared between the server and storage backends.
//!
//! These serialize directly to the wire shapes (camelCase fields), so a
//! stored document that fails to deserialize is a corruption signal
//! (`StoreError::InvalidShape`), not something to auto-repair.

mod blobs;
mod files;
mod ids;
mod projects;
mod resources;
mod roles;
mod workspaces;

pub use blobs::*;
pub use files::*;
pub use ids::*;
pub use projects::*;
pub use resources::*;
pub use roles::*;
pub use workspaces::*;
