use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::store::{StoreError, TableStore};

const FLIGHT_BOOKINGS_TABLE: &str = "flight_bookings";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightBooking {
    pub id: i64,
    pub trip_id: i64,
    pub airline: String,
    pub flight_number: String,
    #[serde(with = "time::serde::rfc3339")]
    pub departure_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub arrival_date: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct NewFlightBooking<'a> {
    pub trip_id: i64,
    pub airline: &'a str,
    pub flight_number: &'a str,
    #[serde(with = "time::serde::rfc3339")]
    pub departure_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub arrival_date: OffsetDateTime,
}

impl FlightBooking {
    pub async fn create(
        store: &TableStore,
        booking: &NewFlightBooking<'_>,
    ) -> Result<FlightBooking, StoreError> {
        store.insert(FLIGHT_BOOKINGS_TABLE, booking).await
    }

    pub async fn list_by_trip(
        store: &TableStore,
        trip_id: i64,
    ) -> Result<Vec<FlightBooking>, StoreError> {
        store
            .select_eq(FLIGHT_BOOKINGS_TABLE, "trip_id", &trip_id.to_string())
            .await
    }
}
