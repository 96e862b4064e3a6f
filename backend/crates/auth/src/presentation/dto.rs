//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

/// Sign up request
///
/// Missing fields deserialize to empty strings and are rejected with
/// "Fill all the fields" by the use case.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Response for signup, login and logout
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl AuthResponse {
    pub fn ok(message: &'static str, user_id: Option<String>) -> Self {
        Self {
            success: true,
            message,
            user_id,
        }
    }
}
