// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response envelope every HTTP endpoint replies with.
///
/// Bad input is surfaced as HTTP 200 with `code: 400` and a `meta.reason`
/// string, not as a non-2xx status — the envelope carries the outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CenturionResponse {
    pub message: String,
    pub code: u16,
    pub meta: Option<Value>,
}

impl CenturionResponse {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self { message: message.into(), code: 200, meta: None }
    }

    #[must_use]
    pub fn ok_with_meta(message: impl Into<String>, meta: Value) -> Self {
        Self { message: message.into(), code: 200, meta: Some(meta) }
    }

    #[must_use]
    pub fn bad_request(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            message: "bad request".to_string(),
            code: 400,
            meta: Some(serde_json::json!({ "reason": reason })),
        }
    }
}

/// `POST /team/register` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub team: String,
}

/// `POST /team/register` success payload, nested under `meta`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub id: String,
}

/// One challenge as exposed over `GET /challenges`.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub example: ChallengeExample,
}

/// Example hints/solutions embedded in challenge listings and install
/// requests.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChallengeExample {
    pub hints: Vec<Value>,
    pub solutions: Vec<Value>,
}

/// `GET /challenges` success payload, nested under `meta`.
#[derive(Debug, Clone, Serialize)]
pub struct FetchChallengesResponse {
    pub challenges: Vec<ChallengeResponse>,
}

/// `POST /challenges` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallChallengeRequest {
    #[serde(rename = "defenderId")]
    pub defender_id: String,
    pub name: String,
    pub description: String,
    pub example: ChallengeExample,
}

/// `POST /challenges` success payload, nested under `meta`.
#[derive(Debug, Clone, Serialize)]
pub struct InstallChallengeResponse {
    pub id: String,
}
