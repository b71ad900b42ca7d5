//! Server state shared by all request handlers.

use std::sync::Arc;

use chrono::Utc;
use labbook_storage::Store;
use rand::Rng;
use sha1::{Digest, Sha1};

use crate::config::ServerConfig;
use crate::github::TokenVerifier;
use crate::repo::{ProjectRepo, WorkspaceRepo};

pub struct ApiServer {
    pub store: Arc<dyn Store>,
    pub workspaces: WorkspaceRepo,
    pub projects: ProjectRepo,
    pub verifier: Arc<dyn TokenVerifier>,
    pub config: ServerConfig,
}

impl ApiServer {
    pub fn new(store: Arc<dyn Store>, verifier: Arc<dyn TokenVerifier>, config: ServerConfig) -> Self {
        Self {
            workspaces: WorkspaceRepo::new(store.clone()),
            projects: ProjectRepo::new(store.clone()),
            store,
            verifier,
            config,
        }
    }
}

/// Current wall-clock time as Unix seconds (sub-second resolution).
pub fn now_timestamp() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

const ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Random lowercase-alphanumeric identifier of the given length.
pub fn random_id(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ID_CHARS[rng.gen_range(0..ID_CHARS.len())] as char)
        .collect()
}

/// Hex sha1 of a file's content, the blob address within a project.
pub fn sha1_of(content: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_id_has_requested_length_and_charset() {
        let id = random_id(8);
        assert_eq!(id.len(), 8);
        assert!(id.bytes().all(|b| ID_CHARS.contains(&b)));
    }

    #[test]
    fn sha1_matches_known_digest() {
        // sha1("abc")
        assert_eq!(sha1_of("abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }
}
