use serde::{Deserialize, Serialize};

/// Request body for account creation.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response for signup and refresh.
#[derive(Debug, Serialize)]
pub struct AuthTokenResponse {
    pub user_id: i64,
    pub username: String,
    pub token: String,
}

/// Login additionally carries the profile image, base64-encoded, when the
/// user has one.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: i64,
    pub username: String,
    pub token: String,
    pub profile_image: Option<String>,
}
