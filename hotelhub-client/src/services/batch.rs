//! Batch result reconciliation
//!
//! Writes and deletes go out as single-record batches and come back with
//! per-record outcomes. Every failed outcome is surfaced to the user, one
//! notification per message, and the call itself succeeds if any record
//! did.

use serde_json::Value;
use shared::{RecordResult, RemoteResponse, Schema};

use crate::notify::Notifications;
use crate::{ClientError, ClientResult};

/// Kind of batch write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Update,
}

impl WriteOp {
    pub fn verb(self) -> &'static str {
        match self {
            WriteOp::Create => "create",
            WriteOp::Update => "update",
        }
    }
}

/// Resolve a create/update response to the written record
///
/// Returns the first successful record's payload. With no per-record
/// outcomes the top-level payload is used instead.
pub fn reconcile_write(
    response: RemoteResponse,
    op: WriteOp,
    schema: &Schema,
    notifications: &Notifications,
) -> ClientResult<Value> {
    let fallback = || format!("Failed to {} {}", op.verb(), schema.label);

    if !response.success {
        let message = response.message.unwrap_or_else(fallback);
        tracing::error!(table = schema.table, "{}", message);
        notifications.error(schema.table, message.clone());
        return Err(ClientError::Rejected(message));
    }

    let results = response.results.unwrap_or_default();
    if results.is_empty() {
        return response
            .data
            .filter(|v| !v.is_null())
            .ok_or_else(|| ClientError::WriteFailed(fallback()));
    }

    let (succeeded, failed): (Vec<_>, Vec<_>) = results.into_iter().partition(|r| r.success);
    report_failures(&failed, op.verb(), schema, notifications);

    succeeded
        .into_iter()
        .find_map(|r| r.data.filter(|v| !v.is_null()))
        .ok_or_else(|| ClientError::WriteFailed(fallback()))
}

/// Resolve a delete response to its verdict
pub fn reconcile_delete(
    response: RemoteResponse,
    schema: &Schema,
    notifications: &Notifications,
) -> bool {
    if !response.success {
        let message = response
            .message
            .unwrap_or_else(|| format!("Failed to delete {}", schema.label));
        tracing::error!(table = schema.table, "{}", message);
        notifications.error(schema.table, message);
        return false;
    }

    let results = response.results.unwrap_or_default();
    if results.is_empty() {
        return true;
    }

    let (succeeded, failed): (Vec<_>, Vec<_>) = results.into_iter().partition(|r| r.success);
    report_failures(&failed, "delete", schema, notifications);
    !succeeded.is_empty()
}

fn report_failures(
    failed: &[RecordResult],
    verb: &str,
    schema: &Schema,
    notifications: &Notifications,
) {
    if failed.is_empty() {
        return;
    }

    tracing::warn!(
        table = schema.table,
        failed = failed.len(),
        "Failed to {} {} {}",
        verb,
        failed.len(),
        schema.plural
    );

    for message in failed.iter().flat_map(RecordResult::messages) {
        notifications.error(schema.table, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::drain;
    use serde_json::json;
    use shared::models::Room;
    use shared::{Entity, FieldError};

    fn partial_failure() -> RemoteResponse {
        RemoteResponse::with_results(vec![
            RecordResult::failed_fields(vec![
                FieldError::new("Number", "is required"),
                FieldError::new("Price", "must be positive"),
            ]),
            RecordResult::succeeded(json!({ "Id": 11, "number_c": "101" })),
            RecordResult::failed("Duplicate room"),
        ])
    }

    #[test]
    fn test_partial_failure_returns_first_success() {
        let notifications = Notifications::new();
        let mut rx = notifications.subscribe();

        let data = reconcile_write(partial_failure(), WriteOp::Create, Room::SCHEMA, &notifications)
            .unwrap();
        assert_eq!(data["Id"], json!(11));

        let notices = drain(&mut rx);
        let messages: Vec<_> = notices.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Number: is required", "Price: must be positive", "Duplicate room"]
        );
    }

    #[test]
    fn test_all_failed_is_write_failure() {
        let notifications = Notifications::new();
        let response = RemoteResponse::with_results(vec![RecordResult::failed("nope")]);

        let err = reconcile_write(response, WriteOp::Update, Room::SCHEMA, &notifications)
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to update room");
    }

    #[test]
    fn test_rejection_notifies_once() {
        let notifications = Notifications::new();
        let mut rx = notifications.subscribe();

        let err = reconcile_write(
            RemoteResponse::rejected("Quota exceeded"),
            WriteOp::Create,
            Room::SCHEMA,
            &notifications,
        )
        .unwrap_err();

        assert!(matches!(err, ClientError::Rejected(ref m) if m == "Quota exceeded"));
        assert_eq!(drain(&mut rx).len(), 1);
    }

    #[test]
    fn test_empty_results_fall_back_to_top_level_data() {
        let notifications = Notifications::new();

        let data = reconcile_write(
            RemoteResponse::ok_with_data(json!({ "Id": 3 })),
            WriteOp::Create,
            Room::SCHEMA,
            &notifications,
        )
        .unwrap();
        assert_eq!(data["Id"], json!(3));

        let err = reconcile_write(RemoteResponse::ok(), WriteOp::Create, Room::SCHEMA, &notifications)
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to create room");
    }

    #[test]
    fn test_delete_verdict() {
        let notifications = Notifications::new();
        let mut rx = notifications.subscribe();

        assert!(reconcile_delete(RemoteResponse::ok(), Room::SCHEMA, &notifications));
        assert!(!reconcile_delete(
            RemoteResponse::rejected("Locked"),
            Room::SCHEMA,
            &notifications
        ));
        assert!(reconcile_delete(partial_failure(), Room::SCHEMA, &notifications));
        assert!(!reconcile_delete(
            RemoteResponse::with_results(vec![RecordResult::failed("Record with Id 9 does not exist")]),
            Room::SCHEMA,
            &notifications
        ));

        // "Locked", three from the partial failure, one from the last call
        assert_eq!(drain(&mut rx).len(), 5);
    }
}
