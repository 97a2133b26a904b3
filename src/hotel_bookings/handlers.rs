use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use tracing::{error, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    hotel_bookings::{
        dto::{CreateHotelBookingRequest, CreatedHotelBookingResponse},
        repo::{HotelBooking, NewHotelBooking},
    },
    state::AppState,
};

pub fn hotel_booking_routes() -> Router<AppState> {
    Router::new().route(
        "/protected/:trip_id/hotel-bookings",
        post(create_hotel_booking).get(list_hotel_bookings),
    )
}

#[instrument(skip(state, payload))]
pub async fn create_hotel_booking(
    State(state): State<AppState>,
    AuthUser(_email): AuthUser,
    Path(trip_id): Path<i64>,
    Json(payload): Json<CreateHotelBookingRequest>,
) -> Result<Json<CreatedHotelBookingResponse>, ApiError> {
    if payload.hotel_name.trim().is_empty() {
        return Err(ApiError::Validation("Hotel name is required".into()));
    }

    let booking = HotelBooking::create(
        &state.store,
        &NewHotelBooking {
            trip_id,
            hotel_name: payload.hotel_name.trim(),
            check_in_date: payload.check_in_date,
            check_out_date: payload.check_out_date,
        },
    )
    .await
    .map_err(|e| {
        error!(error = %e, trip_id, "create hotel booking failed");
        ApiError::upstream("error creating hotel booking", e)
    })?;

    Ok(Json(CreatedHotelBookingResponse {
        hotel_booking_id: booking.id,
        message: "Hotel Booking created successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn list_hotel_bookings(
    State(state): State<AppState>,
    AuthUser(_email): AuthUser,
    Path(trip_id): Path<i64>,
) -> Result<Json<Vec<HotelBooking>>, ApiError> {
    let bookings = HotelBooking::list_by_trip(&state.store, trip_id)
        .await
        .map_err(|e| {
            error!(error = %e, trip_id, "list hotel bookings failed");
            ApiError::upstream("error getting trip's hotel bookings", e)
        })?;

    Ok(Json(bookings))
}
