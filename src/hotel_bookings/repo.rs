use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::store::{StoreError, TableStore};

const HOTEL_BOOKINGS_TABLE: &str = "hotel_bookings";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelBooking {
    pub id: i64,
    pub trip_id: i64,
    pub hotel_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub check_in_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub check_out_date: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct NewHotelBooking<'a> {
    pub trip_id: i64,
    pub hotel_name: &'a str,
    #[serde(with = "time::serde::rfc3339")]
    pub check_in_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub check_out_date: OffsetDateTime,
}

impl HotelBooking {
    pub async fn create(
        store: &TableStore,
        booking: &NewHotelBooking<'_>,
    ) -> Result<HotelBooking, StoreError> {
        store.insert(HOTEL_BOOKINGS_TABLE, booking).await
    }

    pub async fn list_by_trip(
        store: &TableStore,
        trip_id: i64,
    ) -> Result<Vec<HotelBooking>, StoreError> {
        store
            .select_eq(HOTEL_BOOKINGS_TABLE, "trip_id", &trip_id.to_string())
            .await
    }
}
