//! Storage abstraction for labbook.
//!
//! Backend crates (e.g., labbook-store-sqlite) implement the [`Store`]
//! trait so the server doesn't depend on any specific database engine or
//! schema details.

mod store;
mod types;

pub use store::Store;
pub use types::*;

#[cfg(feature = "test-support")]
pub use store::MockStore;

use thiserror::Error;

/// Uniform error type for all storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error("invalid stored document: {0}")]
    InvalidShape(String),
    #[error("backend error: {0}")]
    Backend(String),
}
