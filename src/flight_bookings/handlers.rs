use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use tracing::{error, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    flight_bookings::{
        dto::{CreateFlightBookingRequest, CreatedFlightBookingResponse},
        repo::{FlightBooking, NewFlightBooking},
    },
    state::AppState,
};

pub fn flight_booking_routes() -> Router<AppState> {
    Router::new().route(
        "/protected/:trip_id/flight-bookings",
        post(create_flight_booking).get(list_flight_bookings),
    )
}

#[instrument(skip(state, payload))]
pub async fn create_flight_booking(
    State(state): State<AppState>,
    AuthUser(_email): AuthUser,
    Path(trip_id): Path<i64>,
    Json(payload): Json<CreateFlightBookingRequest>,
) -> Result<Json<CreatedFlightBookingResponse>, ApiError> {
    if payload.airline.trim().is_empty() {
        return Err(ApiError::Validation("Airline is required".into()));
    }
    if payload.flight_number.trim().is_empty() {
        return Err(ApiError::Validation("Flight number is required".into()));
    }

    let booking = FlightBooking::create(
        &state.store,
        &NewFlightBooking {
            trip_id,
            airline: payload.airline.trim(),
            flight_number: payload.flight_number.trim(),
            departure_date: payload.departure_date,
            arrival_date: payload.arrival_date,
        },
    )
    .await
    .map_err(|e| {
        error!(error = %e, trip_id, "create flight booking failed");
        ApiError::upstream("error creating flight booking for trip", e)
    })?;

    Ok(Json(CreatedFlightBookingResponse {
        flight_booking_id: booking.id,
        message: "Flight Booking created successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn list_flight_bookings(
    State(state): State<AppState>,
    AuthUser(_email): AuthUser,
    Path(trip_id): Path<i64>,
) -> Result<Json<Vec<FlightBooking>>, ApiError> {
    let bookings = FlightBooking::list_by_trip(&state.store, trip_id)
        .await
        .map_err(|e| {
            error!(error = %e, trip_id, "list flight bookings failed");
            ApiError::upstream("error getting trip's flight bookings", e)
        })?;

    Ok(Json(bookings))
}
