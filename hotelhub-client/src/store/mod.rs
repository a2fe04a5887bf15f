//! Record store seam
//!
//! [`RecordStore`] is the generic hosted-data client every entity service is
//! built on: five table-parameterized calls that answer with the hosted
//! API's response envelope. Two backends implement it:
//! - [`HttpRecordStore`]: the hosted API over HTTPS
//! - [`MemoryRecordStore`]: in-process tables for development and tests

mod http;
mod memory;

pub use http::HttpRecordStore;
pub use memory::MemoryRecordStore;

use async_trait::async_trait;
use shared::{DeletePayload, FetchParams, RemoteResponse, WritePayload};

use crate::ClientResult;

/// Generic hosted-data client
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// List records matching `params`
    async fn fetch_records(&self, table: &str, params: &FetchParams) -> ClientResult<RemoteResponse>;

    /// Read one record; `data` is absent when no record has `id`
    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        params: &FetchParams,
    ) -> ClientResult<RemoteResponse>;

    /// Create records; one outcome per record in `results`
    async fn create_record(&self, table: &str, payload: &WritePayload) -> ClientResult<RemoteResponse>;

    /// Update records identified by their `Id`; one outcome per record
    async fn update_record(&self, table: &str, payload: &WritePayload) -> ClientResult<RemoteResponse>;

    /// Delete records by id; one outcome per id
    async fn delete_record(&self, table: &str, payload: &DeletePayload) -> ClientResult<RemoteResponse>;
}
