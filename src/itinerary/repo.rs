use serde::{Deserialize, Serialize};
use time::Date;

use crate::store::{StoreError, TableStore};

const ITINERARY_TABLE: &str = "itinerary";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryEntry {
    pub id: i64,
    pub trip_id: i64,
    pub date: Date,
    pub description: String,
    pub location: String,
    pub activity: String,
}

#[derive(Debug, Serialize)]
pub struct NewItineraryEntry<'a> {
    pub trip_id: i64,
    pub date: Date,
    pub description: &'a str,
    pub location: &'a str,
    pub activity: &'a str,
}

impl ItineraryEntry {
    pub async fn create(
        store: &TableStore,
        entry: &NewItineraryEntry<'_>,
    ) -> Result<ItineraryEntry, StoreError> {
        store.insert(ITINERARY_TABLE, entry).await
    }

    pub async fn list_by_trip(
        store: &TableStore,
        trip_id: i64,
    ) -> Result<Vec<ItineraryEntry>, StoreError> {
        store
            .select_eq(ITINERARY_TABLE, "trip_id", &trip_id.to_string())
            .await
    }
}
