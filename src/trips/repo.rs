use serde::{Deserialize, Serialize};
use time::Date;

use crate::store::{StoreError, TableStore};

const TRIPS_TABLE: &str = "trips";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub start_date: Date,
    pub end_date: Date,
}

#[derive(Debug, Serialize)]
pub struct NewTrip<'a> {
    pub user_id: i64,
    pub title: &'a str,
    pub start_date: Date,
    pub end_date: Date,
}

impl Trip {
    pub async fn create(store: &TableStore, trip: &NewTrip<'_>) -> Result<Trip, StoreError> {
        store.insert(TRIPS_TABLE, trip).await
    }

    pub async fn list_by_user(store: &TableStore, user_id: i64) -> Result<Vec<Trip>, StoreError> {
        store
            .select_eq(TRIPS_TABLE, "user_id", &user_id.to_string())
            .await
    }
}
