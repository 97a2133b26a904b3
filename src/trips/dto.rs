use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub title: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedTripResponse {
    pub trip_id: i64,
    pub message: String,
}
