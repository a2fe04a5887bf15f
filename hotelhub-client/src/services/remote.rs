//! Remote CRUD adapter
//!
//! [`RemoteService`] is parameterized by the entity type; its [`Schema`]
//! supplies the table, field list and default ordering. Records are
//! normalized and decoded once, here, so callers only ever see typed
//! entities.

use std::marker::PhantomData;

use serde_json::Value;
use shared::models::{Booking, Profile, Room, Task};
use shared::{DeletePayload, Entity, EntityDraft, FetchParams, Schema, WriteMode, WritePayload};
use tokio_util::sync::CancellationToken;

use super::batch::{WriteOp, reconcile_delete, reconcile_write};
use super::{EntityService, ServiceContext};
use crate::latency::Operation;
use crate::{ClientError, ClientResult};

pub type BookingService = RemoteService<Booking>;
pub type RoomService = RemoteService<Room>;
pub type TaskService = RemoteService<Task>;
pub type ProfileService = RemoteService<Profile>;

/// CRUD service for one hosted table
pub struct RemoteService<E> {
    context: ServiceContext,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for RemoteService<E> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> std::fmt::Debug for RemoteService<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteService")
            .field("context", &self.context)
            .finish()
    }
}

impl<E: Entity> RemoteService<E> {
    pub fn new(context: ServiceContext) -> Self {
        Self {
            context,
            _entity: PhantomData,
        }
    }

    /// Same service bound to another cancellation token
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self::new(self.context.clone().with_cancellation(cancel))
    }

    pub fn schema(&self) -> &'static Schema {
        E::SCHEMA
    }

    pub fn context(&self) -> &ServiceContext {
        &self.context
    }

    /// List query with list-read semantics: every failure degrades to empty
    pub(crate) async fn fetch(&self, params: FetchParams) -> Vec<E> {
        let schema = E::SCHEMA;
        if self.context.latency.pause(Operation::List, &self.context.cancel).await.is_err() {
            tracing::debug!(table = schema.table, "Fetching {} cancelled", schema.plural);
            return Vec::new();
        }

        tracing::debug!(table = schema.table, ?params, "Fetching {}", schema.plural);
        let response = match self.context.store.fetch_records(schema.table, &params).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(table = schema.table, error = %e, "Error fetching {}", schema.plural);
                return Vec::new();
            }
        };

        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| format!("Failed to fetch {}", schema.plural));
            tracing::error!(table = schema.table, "{}", message);
            self.context.notifications.error(schema.table, message);
            return Vec::new();
        }

        let rows = match response.data {
            Some(Value::Array(rows)) => rows,
            _ => return Vec::new(),
        };

        rows.iter()
            .filter_map(|row| match E::from_record(row) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    tracing::warn!(table = schema.table, error = %e, "Skipping undecodable {}", schema.label);
                    None
                }
            })
            .collect()
    }

    fn not_found(id: i64) -> ClientError {
        ClientError::NotFound(format!("{} with ID {} not found", E::SCHEMA.title, id))
    }

    async fn read(&self, id: i64) -> ClientResult<E> {
        let schema = E::SCHEMA;
        let params = FetchParams::fields_only(schema);

        let response = match self.context.store.get_record_by_id(schema.table, id, &params).await {
            Ok(response) => response,
            Err(ClientError::NotFound(_)) => return Err(Self::not_found(id)),
            Err(e) => return Err(e),
        };
        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| format!("Failed to fetch {}", schema.label));
            self.context.notifications.error(schema.table, message.clone());
            return Err(ClientError::Rejected(message));
        }

        let record = response.payload().ok_or_else(|| Self::not_found(id))?;
        Ok(E::from_record(record)?)
    }

    async fn write(&self, mode: WriteMode, draft: &E::Draft) -> ClientResult<E> {
        let schema = E::SCHEMA;
        let op = match mode {
            WriteMode::Create => WriteOp::Create,
            WriteMode::Update(_) => WriteOp::Update,
        };
        let payload = WritePayload::single(draft.to_write_record(mode)?);
        tracing::debug!(table = schema.table, ?payload, "Sending {} {}", op.verb(), schema.label);

        let response = match op {
            WriteOp::Create => self.context.store.create_record(schema.table, &payload).await?,
            WriteOp::Update => self.context.store.update_record(schema.table, &payload).await?,
        };
        let record = reconcile_write(response, op, schema, &self.context.notifications)?;
        Ok(E::from_record(&record)?)
    }

    /// Whether a record with `id` is still stored
    async fn exists(&self, id: i64) -> bool {
        let params = FetchParams::fields_only(E::SCHEMA);
        match self.context.store.get_record_by_id(E::SCHEMA.table, id, &params).await {
            Ok(response) => response.payload().is_some(),
            Err(ClientError::NotFound(_)) => false,
            // Unknown: keep the original error.
            Err(_) => true,
        }
    }
}

impl<E: Entity> EntityService for RemoteService<E> {
    type Entity = E;
    type Draft = E::Draft;

    async fn get_all(&self) -> Vec<E> {
        self.fetch(FetchParams::for_schema(E::SCHEMA)).await
    }

    async fn get_by_id(&self, id: i64) -> ClientResult<E> {
        self.context.latency.pause(Operation::Get, &self.context.cancel).await?;

        self.read(id).await.inspect_err(|e| {
            tracing::error!(table = E::SCHEMA.table, error = %e, "Error fetching {} {}", E::SCHEMA.label, id);
        })
    }

    async fn create(&self, draft: &E::Draft) -> ClientResult<E> {
        self.context.latency.pause(Operation::Create, &self.context.cancel).await?;

        self.write(WriteMode::Create, draft).await.inspect_err(|e| {
            tracing::error!(table = E::SCHEMA.table, error = %e, "Error creating {}", E::SCHEMA.label);
        })
    }

    async fn update(&self, id: i64, draft: &E::Draft) -> ClientResult<E> {
        self.context.latency.pause(Operation::Update, &self.context.cancel).await?;

        let mut result = self.write(WriteMode::Update(id), draft).await;
        if matches!(result, Err(ClientError::WriteFailed(_))) && !self.exists(id).await {
            result = Err(Self::not_found(id));
        }

        result.inspect_err(|e| {
            tracing::error!(table = E::SCHEMA.table, error = %e, "Error updating {} {}", E::SCHEMA.label, id);
        })
    }

    async fn delete(&self, id: i64) -> bool {
        let schema = E::SCHEMA;
        if self.context.latency.pause(Operation::Delete, &self.context.cancel).await.is_err() {
            tracing::debug!(table = schema.table, "Deleting {} {} cancelled", schema.label, id);
            return false;
        }

        match self
            .context
            .store
            .delete_record(schema.table, &DeletePayload::single(id))
            .await
        {
            Ok(response) => reconcile_delete(response, schema, &self.context.notifications),
            Err(e) => {
                tracing::error!(table = schema.table, error = %e, "Error deleting {} {}", schema.label, id);
                false
            }
        }
    }
}
