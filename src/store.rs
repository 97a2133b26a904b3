use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::config::StoreConfig;

/// Typed client for the hosted table API.
///
/// The service speaks PostgREST conventions: one resource per table under
/// `/rest/v1/`, equality filters as `column=eq.value` query parameters, and
/// inserts that echo the created row back when asked to.
#[derive(Clone)]
pub struct TableStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("table api request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("table api returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl TableStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Insert one row and decode the created row from the response.
    #[instrument(skip(self, row), fields(table = table))]
    pub async fn insert<T, R>(&self, table: &str, row: &T) -> Result<R, StoreError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let mut rows: Vec<R> = response.json().await?;
        if rows.is_empty() {
            return Err(StoreError::Api {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "insert returned no representation".into(),
            });
        }
        Ok(rows.remove(0))
    }

    /// Select all rows where `column` equals `value`.
    #[instrument(skip(self), fields(table = table, column = column))]
    pub async fn select_eq<R>(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Vec<R>, StoreError>
    where
        R: DeserializeOwned,
    {
        let filter = format!("eq.{value}");
        let response = self
            .client
            .get(self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .query(&[("select", "*"), (column, filter.as_str())])
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "failed to read body".to_string());
        Err(StoreError::Api { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
        title: String,
    }

    fn store_for(server: &MockServer) -> TableStore {
        TableStore::new(&StoreConfig {
            url: server.uri(),
            api_key: "test-key".into(),
        })
    }

    #[tokio::test]
    async fn insert_decodes_representation_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/trips"))
            .and(header("apikey", "test-key"))
            .and(header("Prefer", "return=representation"))
            .and(body_json(json!([{"title": "Lisbon"}])))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!([{"id": 7, "title": "Lisbon"}])),
            )
            .mount(&server)
            .await;

        let store = store_for(&server);
        let row: Row = store
            .insert("trips", &json!({"title": "Lisbon"}))
            .await
            .expect("insert should succeed");
        assert_eq!(
            row,
            Row {
                id: 7,
                title: "Lisbon".into()
            }
        );
    }

    #[tokio::test]
    async fn select_eq_builds_equality_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/trips"))
            .and(query_param("select", "*"))
            .and(query_param("user_id", "eq.3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"id": 1, "title": "a"}, {"id": 2, "title": "b"}])),
            )
            .mount(&server)
            .await;

        let store = store_for(&server);
        let rows: Vec<Row> = store
            .select_eq("trips", "user_id", "3")
            .await
            .expect("select should succeed");
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn select_eq_with_no_matches_is_empty_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = store_for(&server);
        let rows: Vec<Row> = store
            .select_eq("users", "email", "nobody@example.com")
            .await
            .expect("empty result is fine");
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn api_failure_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/users"))
            .respond_with(
                ResponseTemplate::new(409).set_body_string("duplicate key value"),
            )
            .mount(&server)
            .await;

        let store = store_for(&server);
        let err = store
            .insert::<_, Row>("users", &json!({"email": "x"}))
            .await
            .unwrap_err();
        match err {
            StoreError::Api { status, message } => {
                assert_eq!(status, StatusCode::CONFLICT);
                assert!(message.contains("duplicate"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
