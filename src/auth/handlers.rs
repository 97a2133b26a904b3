use axum::{
    extract::{DefaultBodyLimit, FromRef, Multipart, State},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthTokenResponse, LoginRequest, LoginResponse, RefreshRequest, SignupRequest},
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
        repo::{NewUser, UserRecord},
    },
    error::ApiError,
    profile,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/token", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/protected/upload-profile", post(upload_profile))
        .layer(DefaultBodyLimit::max(5 * 1024 * 1024))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<Json<AuthTokenResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.username.trim().is_empty() {
        return Err(ApiError::Validation("Username is required".into()));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if payload.password.is_empty() {
        return Err(ApiError::Validation("Password is required".into()));
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        ApiError::Upstream(e.to_string())
    })?;

    let user = UserRecord::create(
        &state.store,
        &NewUser {
            username: payload.username.trim(),
            email: &payload.email,
            password: &hash,
        },
    )
    .await
    .map_err(|e| {
        error!(error = %e, "create user failed");
        ApiError::upstream("error adding a user to the database", e)
    })?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.email).map_err(|e| {
        error!(error = %e, "token sign failed");
        ApiError::Upstream(format!("Error creating session token: {e}"))
    })?;

    info!(user_id = user.id, email = %user.email, "user signed up");
    Ok(Json(AuthTokenResponse {
        user_id: user.id,
        username: user.username,
        token,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password are required".into(),
        ));
    }

    let user = match UserRecord::find_by_email(&state.store, &payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::Unauthorized("Invalid credentials".into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(ApiError::Lookup("Error fetching user by email".into()));
        }
    };

    let ok = verify_password(&payload.password, &user.password).map_err(|e| {
        error!(error = %e, "verify_password failed");
        ApiError::Upstream(e.to_string())
    })?;

    if !ok {
        warn!(email = %payload.email, user_id = user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let profile_image = profile::load_profile_image(&state, user.id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = user.id, "load profile image failed");
            ApiError::Lookup(e.to_string())
        })?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.email).map_err(|e| {
        error!(error = %e, "token sign failed");
        ApiError::Upstream(format!("Error creating session token: {e}"))
    })?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        user_id: user.id,
        username: user.username,
        token,
        profile_image,
    }))
}

#[instrument(skip(state, payload))]
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthTokenResponse>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify(&payload.refresh_token).map_err(|_| {
        warn!("invalid refresh token");
        ApiError::Unauthorized("Invalid refresh token".into())
    })?;

    let user = match UserRecord::find_by_email(&state.store, &claims.sub).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %claims.sub, "refresh for unknown user");
            return Err(ApiError::Lookup("Error fetching user by email".into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(ApiError::Lookup("Error fetching user by email".into()));
        }
    };

    let token = keys.sign(&user.email).map_err(|e| {
        error!(error = %e, "token sign failed");
        ApiError::Upstream(format!("Error creating session token: {e}"))
    })?;

    Ok(Json(AuthTokenResponse {
        user_id: user.id,
        username: user.username,
        token,
    }))
}

/// POST /protected/upload-profile (multipart, field `profile_image`)
#[instrument(skip(state, multipart))]
pub async fn upload_profile(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<String>, ApiError> {
    let mut file: Option<Bytes> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("profile_image") {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(format!("failed to read upload: {e}")))?;
            file = Some(data);
            break;
        }
    }
    let Some(data) = file else {
        return Err(ApiError::Validation("profile_image file is required".into()));
    };

    let user = match UserRecord::find_by_email(&state.store, &email).await {
        Ok(Some(u)) => u,
        Ok(None) => return Err(ApiError::Lookup("Error fetching user by email".into())),
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(ApiError::Lookup("Error fetching user by email".into()));
        }
    };

    let encoded = profile::store_profile_image(&state, user.id, data)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = user.id, "profile upload failed");
            ApiError::Upstream(e.to_string())
        })?;

    info!(user_id = user.id, "profile image uploaded");
    Ok(Json(encoded))
}
