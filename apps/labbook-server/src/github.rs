//! Identity verification against the GitHub API.
//!
//! The verifier is an opaque capability behind a trait so tests can
//! inject a stub: "does `access_token` belong to account
//! `external_id`?".

use labbook_storage::UserId;
use serde::Deserialize;

use crate::error::ApiError;

#[async_trait::async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Whether `access_token` authenticates the GitHub account
    /// identified by `external_id` (login or numeric id).
    async fn verify(&self, external_id: &str, access_token: &str) -> Result<bool, ApiError>;
}

pub struct GithubTokenVerifier {
    client: reqwest::Client,
    api_base: String,
}

#[derive(Deserialize)]
struct GithubUser {
    id: u64,
    login: String,
}

impl GithubTokenVerifier {
    pub fn new(api_base: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
        }
    }
}

#[async_trait::async_trait]
impl TokenVerifier for GithubTokenVerifier {
    async fn verify(&self, external_id: &str, access_token: &str) -> Result<bool, ApiError> {
        let response = self
            .client
            .get(format!("{}/user", self.api_base))
            .header("Authorization", format!("token {access_token}"))
            .header("User-Agent", "labbook-server")
            .send()
            .await
            .map_err(|e| ApiError::IdentityVerificationFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Ok(false);
        }
        let user: GithubUser = response
            .json()
            .await
            .map_err(|e| ApiError::IdentityVerificationFailed(e.to_string()))?;
        Ok(user.login == external_id || user.id.to_string() == external_id)
    }
}

/// Resolve the claimed identity into a verified one, or anonymous.
///
/// - `github|<ext>` with a token: verified against the provider; a
///   failed verification is fatal for the request. Without a token the
///   claim is ignored and the request proceeds anonymous.
/// - `admin|github|<ext>`: must be on the injected allow-list, carry
///   the `github|` provider prefix, and verify; any failure on this
///   path is fatal.
/// - anything else: anonymous.
pub async fn resolve_identity(
    user_id: Option<&UserId>,
    github_access_token: Option<&str>,
    admin_user_ids: &[String],
    verifier: &dyn TokenVerifier,
) -> Result<Option<UserId>, ApiError> {
    let Some(user_id) = user_id else {
        return Ok(None);
    };

    if let Some(external_id) = user_id.0.strip_prefix("github|") {
        let Some(token) = github_access_token else {
            return Ok(None);
        };
        if !verifier.verify(external_id, token).await? {
            return Err(ApiError::IdentityVerificationFailed(
                "Unable to verify github user ID".into(),
            ));
        }
        return Ok(Some(user_id.clone()));
    }

    if let Some(inner) = user_id.0.strip_prefix("admin|") {
        if !admin_user_ids.iter().any(|id| id == inner) {
            return Err(ApiError::IdentityVerificationFailed(
                "Invalid admin user ID".into(),
            ));
        }
        let Some(external_id) = inner.strip_prefix("github|") else {
            return Err(ApiError::IdentityVerificationFailed(
                "Invalid admin user ID (does not start with github|)".into(),
            ));
        };
        let Some(token) = github_access_token else {
            return Err(ApiError::IdentityVerificationFailed(
                "Unable to verify github user ID (for admin)".into(),
            ));
        };
        if !verifier.verify(external_id, token).await? {
            return Err(ApiError::IdentityVerificationFailed(
                "Unable to verify github user ID (for admin)".into(),
            ));
        }
        return Ok(Some(user_id.clone()));
    }

    Ok(None)
}
