use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::ApiError;
use crate::store::{StoreError, TableStore};

const USERS_TABLE: &str = "users";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl UserRecord {
    /// Find a user by email.
    pub async fn find_by_email(
        store: &TableStore,
        email: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let mut rows: Vec<UserRecord> = store.select_eq(USERS_TABLE, "email", email).await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }

    /// Create a new user with an already-hashed password.
    pub async fn create(store: &TableStore, user: &NewUser<'_>) -> Result<UserRecord, StoreError> {
        store.insert(USERS_TABLE, user).await
    }

    /// Resolve the acting user from the auth-gate subject email. The token
    /// carries the email, not the internal id, so protected writes re-resolve
    /// the row here.
    pub async fn require_by_email(
        store: &TableStore,
        email: &str,
    ) -> Result<UserRecord, ApiError> {
        match Self::find_by_email(store, email).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(ApiError::Lookup("Error fetching user by email".into())),
            Err(e) => {
                error!(error = %e, "find_by_email failed");
                Err(ApiError::Lookup("Error fetching user by email".into()))
            }
        }
    }
}
