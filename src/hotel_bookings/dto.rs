use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct CreateHotelBookingRequest {
    pub hotel_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub check_in_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub check_out_date: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct CreatedHotelBookingResponse {
    pub hotel_booking_id: i64,
    pub message: String,
}
