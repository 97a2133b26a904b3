use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateItineraryRequest {
    /// `YYYY-MM-DD`
    pub date: String,
    pub description: String,
    pub location: String,
    pub activity: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedItineraryResponse {
    pub itinerary_id: i64,
    pub message: String,
}
