//! HTTP backend for the hosted record API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use shared::{DeletePayload, FetchParams, RemoteResponse, WritePayload};

use super::RecordStore;
use crate::{ClientError, ClientResult};

/// Hosted record API client
///
/// One pooled [`reqwest::Client`] is built up front and shared by every
/// call.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
    project_id: String,
    public_key: String,
}

impl HttpRecordStore {
    pub fn new(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        public_key: impl Into<String>,
        timeout_secs: u64,
    ) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            project_id: project_id.into(),
            public_key: public_key.into(),
        })
    }

    fn records_url(&self, table: &str, suffix: &str) -> String {
        format!(
            "{}/tables/{}/records{}",
            self.base_url.trim_end_matches('/'),
            table,
            suffix
        )
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: String,
        body: &B,
    ) -> ClientResult<RemoteResponse> {
        tracing::debug!(%method, %url, "hosted API request");

        let response = self
            .client
            .request(method, &url)
            .header("X-Project-Id", &self.project_id)
            .bearer_auth(&self.public_key)
            .json(body)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response(response: reqwest::Response) -> ClientResult<RemoteResponse> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Unauthorized),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                _ => Err(ClientError::Rejected(format!("{status}: {text}"))),
            };
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("{e}: {text}")))
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn fetch_records(&self, table: &str, params: &FetchParams) -> ClientResult<RemoteResponse> {
        self.send(Method::POST, self.records_url(table, "/query"), params)
            .await
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        params: &FetchParams,
    ) -> ClientResult<RemoteResponse> {
        let url = self.records_url(table, &format!("/{id}/query"));
        self.send(Method::POST, url, params).await
    }

    async fn create_record(&self, table: &str, payload: &WritePayload) -> ClientResult<RemoteResponse> {
        self.send(Method::POST, self.records_url(table, ""), payload)
            .await
    }

    async fn update_record(&self, table: &str, payload: &WritePayload) -> ClientResult<RemoteResponse> {
        self.send(Method::PUT, self.records_url(table, ""), payload)
            .await
    }

    async fn delete_record(&self, table: &str, payload: &DeletePayload) -> ClientResult<RemoteResponse> {
        self.send(Method::DELETE, self.records_url(table, ""), payload)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_url() {
        let store = HttpRecordStore::new("https://api.test/v1/", "proj", "key", 5).unwrap();
        assert_eq!(
            store.records_url("room_c", "/query"),
            "https://api.test/v1/tables/room_c/records/query"
        );
        assert_eq!(
            store.records_url("room_c", "/7/query"),
            "https://api.test/v1/tables/room_c/records/7/query"
        );
    }
}
