//! JSON wire contract for the labbook dispatch endpoint.
//!
//! A single POST endpoint accepts an [`ApiRequest`] envelope whose
//! `payload` is a discriminated union keyed by a `type` string. The
//! matching [`ResponsePayload`] variant carries the same `type` value.

mod requests;
mod responses;

pub use requests::*;
pub use responses::*;

use labbook_storage::UserId;
use serde::{Deserialize, Serialize};

/// Request envelope. `user_id` is a claimed identity; it is only
/// trusted after token verification succeeds.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    pub payload: RequestPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}
