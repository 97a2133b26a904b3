use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use time::{macros::format_description, Date};
use tracing::{error, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    itinerary::{
        dto::{CreateItineraryRequest, CreatedItineraryResponse},
        repo::{ItineraryEntry, NewItineraryEntry},
    },
    state::AppState,
};

pub fn itinerary_routes() -> Router<AppState> {
    Router::new().route(
        "/protected/:trip_id/itinerary",
        post(create_itinerary).get(list_itinerary),
    )
}

fn parse_date(raw: &str) -> Result<Date, ApiError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &format)
        .map_err(|_| ApiError::Validation(format!("invalid date {raw:?}, expected YYYY-MM-DD")))
}

#[instrument(skip(state, payload))]
pub async fn create_itinerary(
    State(state): State<AppState>,
    AuthUser(_email): AuthUser,
    Path(trip_id): Path<i64>,
    Json(payload): Json<CreateItineraryRequest>,
) -> Result<Json<CreatedItineraryResponse>, ApiError> {
    let date = parse_date(&payload.date)?;

    let entry = ItineraryEntry::create(
        &state.store,
        &NewItineraryEntry {
            trip_id,
            date,
            description: &payload.description,
            location: &payload.location,
            activity: &payload.activity,
        },
    )
    .await
    .map_err(|e| {
        error!(error = %e, trip_id, "create itinerary failed");
        ApiError::upstream("error creating itinerary", e)
    })?;

    Ok(Json(CreatedItineraryResponse {
        itinerary_id: entry.id,
        message: "Itinerary entry created successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn list_itinerary(
    State(state): State<AppState>,
    AuthUser(_email): AuthUser,
    Path(trip_id): Path<i64>,
) -> Result<Json<Vec<ItineraryEntry>>, ApiError> {
    let entries = ItineraryEntry::list_by_trip(&state.store, trip_id)
        .await
        .map_err(|e| {
            error!(error = %e, trip_id, "list itinerary failed");
            ApiError::upstream("error getting itinerary", e)
        })?;

    Ok(Json(entries))
}
