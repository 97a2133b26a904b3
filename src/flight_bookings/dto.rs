use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct CreateFlightBookingRequest {
    pub airline: String,
    pub flight_number: String,
    #[serde(with = "time::serde::rfc3339")]
    pub departure_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub arrival_date: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct CreatedFlightBookingResponse {
    pub flight_booking_id: i64,
    pub message: String,
}
