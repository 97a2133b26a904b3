use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use time::{macros::format_description, Date};
use tracing::{error, instrument};

use crate::{
    auth::{jwt::AuthUser, repo::UserRecord},
    error::ApiError,
    state::AppState,
    trips::{
        dto::{CreateTripRequest, CreatedTripResponse},
        repo::{NewTrip, Trip},
    },
};

pub fn trip_routes() -> Router<AppState> {
    Router::new().route("/protected/trips", post(create_trip).get(list_trips))
}

fn parse_date(raw: &str) -> Result<Date, ApiError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &format)
        .map_err(|_| ApiError::Validation(format!("invalid date {raw:?}, expected YYYY-MM-DD")))
}

#[instrument(skip(state, payload))]
pub async fn create_trip(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Json(payload): Json<CreateTripRequest>,
) -> Result<Json<CreatedTripResponse>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("Title is required".into()));
    }
    let start_date = parse_date(&payload.start_date)?;
    let end_date = parse_date(&payload.end_date)?;

    let user = UserRecord::require_by_email(&state.store, &email).await?;

    let trip = Trip::create(
        &state.store,
        &NewTrip {
            user_id: user.id,
            title: payload.title.trim(),
            start_date,
            end_date,
        },
    )
    .await
    .map_err(|e| {
        error!(error = %e, user_id = user.id, "create trip failed");
        ApiError::upstream("error creating trip", e)
    })?;

    Ok(Json(CreatedTripResponse {
        trip_id: trip.id,
        message: "Trip created successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn list_trips(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<Vec<Trip>>, ApiError> {
    let user = UserRecord::require_by_email(&state.store, &email).await?;

    let trips = Trip::list_by_user(&state.store, user.id).await.map_err(|e| {
        error!(error = %e, user_id = user.id, "list trips failed");
        ApiError::upstream("error fetching user trips", e)
    })?;

    Ok(Json(trips))
}
