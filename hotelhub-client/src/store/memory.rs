//! In-process record backend
//!
//! Mirrors the hosted API closely enough for local development and tests:
//! ids are assigned monotonically per table, `CreatedOn` is stamped on
//! create, and batch writes answer with one outcome per record.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use shared::models::{now_timestamp, schema_for};
use shared::schema::{CREATED_ON_FIELD, ID_FIELD};
use shared::{
    DeletePayload, FetchParams, FieldError, OrderBy, RecordResult, RemoteResponse, SortType,
    WritePayload,
};

use super::RecordStore;
use crate::ClientResult;

type Row = Map<String, Value>;

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: Vec<Row>,
}

impl Table {
    fn position(&self, id: i64) -> Option<usize> {
        self.rows.iter().position(|row| row_id(row) == Some(id))
    }

    fn insert(&mut self, mut row: Row) -> Row {
        let id = match row_id(&row) {
            Some(id) => id,
            None => self.last_id + 1,
        };
        self.last_id = self.last_id.max(id);
        row.insert(ID_FIELD.to_string(), Value::from(id));
        self.rows.push(row.clone());
        row
    }
}

/// In-memory [`RecordStore`]
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    tables: Mutex<HashMap<String, Table>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert rows as-is
    ///
    /// Rows without an `Id` get the next free one. No validation and no
    /// `CreatedOn` stamping.
    pub fn seed(&self, table: &str, rows: impl IntoIterator<Item = Row>) {
        let mut tables = self.tables.lock();
        let table = tables.entry(table.to_string()).or_default();
        for row in rows {
            table.insert(row);
        }
    }

    /// Number of rows currently stored in `table`
    pub fn len(&self, table: &str) -> usize {
        self.tables.lock().get(table).map_or(0, |t| t.rows.len())
    }

    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn fetch_records(&self, table: &str, params: &FetchParams) -> ClientResult<RemoteResponse> {
        let mut rows: Vec<Row> = {
            let tables = self.tables.lock();
            tables
                .get(table)
                .map(|t| {
                    t.rows
                        .iter()
                        .filter(|row| params.conditions.iter().all(|c| c.matches(row)))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        };

        for order in params.order_by.iter().rev() {
            rows.sort_by(|a, b| compare_rows(a, b, order));
        }

        let data = rows
            .iter()
            .map(|row| Value::Object(project(row, params)))
            .collect();
        Ok(RemoteResponse::ok_with_data(Value::Array(data)))
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        params: &FetchParams,
    ) -> ClientResult<RemoteResponse> {
        let tables = self.tables.lock();
        let row = tables
            .get(table)
            .and_then(|t| t.position(id).map(|i| &t.rows[i]));

        Ok(match row {
            Some(row) => RemoteResponse::ok_with_data(Value::Object(project(row, params))),
            None => RemoteResponse::ok(),
        })
    }

    async fn create_record(&self, table: &str, payload: &WritePayload) -> ClientResult<RemoteResponse> {
        let mut tables = self.tables.lock();
        let rows = tables.entry(table.to_string()).or_default();

        let results = payload
            .records
            .iter()
            .map(|record| {
                let unknown = unknown_fields(table, record);
                if !unknown.is_empty() {
                    return RecordResult::failed_fields(unknown);
                }

                let mut row = record.clone();
                row.remove(ID_FIELD);
                row.insert(
                    CREATED_ON_FIELD.to_string(),
                    Value::String(now_timestamp()),
                );
                RecordResult::succeeded(Value::Object(rows.insert(row)))
            })
            .collect();

        Ok(RemoteResponse::with_results(results))
    }

    async fn update_record(&self, table: &str, payload: &WritePayload) -> ClientResult<RemoteResponse> {
        let mut tables = self.tables.lock();
        let rows = tables.entry(table.to_string()).or_default();

        let results = payload
            .records
            .iter()
            .map(|record| {
                let Some(id) = row_id(record) else {
                    return RecordResult::failed("Record Id is required");
                };
                let Some(index) = rows.position(id) else {
                    return RecordResult::failed(format!("Record with Id {id} does not exist"));
                };
                let unknown = unknown_fields(table, record);
                if !unknown.is_empty() {
                    return RecordResult::failed_fields(unknown);
                }

                let row = &mut rows.rows[index];
                for (key, value) in record {
                    if key != ID_FIELD {
                        row.insert(key.clone(), value.clone());
                    }
                }
                RecordResult::succeeded(Value::Object(row.clone()))
            })
            .collect();

        Ok(RemoteResponse::with_results(results))
    }

    async fn delete_record(&self, table: &str, payload: &DeletePayload) -> ClientResult<RemoteResponse> {
        let mut tables = self.tables.lock();
        let rows = tables.entry(table.to_string()).or_default();

        let results = payload
            .record_ids
            .iter()
            .map(|&id| match rows.position(id) {
                Some(index) => {
                    rows.rows.remove(index);
                    RecordResult {
                        success: true,
                        ..Default::default()
                    }
                }
                None => RecordResult::failed(format!("Record with Id {id} does not exist")),
            })
            .collect();

        Ok(RemoteResponse::with_results(results))
    }
}

fn row_id(row: &Row) -> Option<i64> {
    match row.get(ID_FIELD)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Keys the table's schema does not accept; unknown tables accept anything
fn unknown_fields(table: &str, record: &Row) -> Vec<FieldError> {
    let Some(schema) = schema_for(table) else {
        return Vec::new();
    };
    record
        .keys()
        .filter(|key| !schema.is_writable(key))
        .map(|key| FieldError::new(key.as_str(), "Unknown field"))
        .collect()
}

/// Selected fields plus `Id`; every field when none are selected
fn project(row: &Row, params: &FetchParams) -> Row {
    if params.fields.is_empty() {
        return row.clone();
    }

    let mut out = Map::new();
    if let Some(id) = row.get(ID_FIELD) {
        out.insert(ID_FIELD.to_string(), id.clone());
    }
    for name in params.field_names() {
        if let Some(value) = row.get(name) {
            out.insert(name.to_string(), value.clone());
        }
    }
    out
}

/// Numbers compare numerically, strings lexicographically; missing values
/// sort last in either direction. Ties fall back to `Id` in the same
/// direction.
fn compare_rows(a: &Row, b: &Row, order: &OrderBy) -> Ordering {
    let present = |row: &Row| row.get(&order.field_name).filter(|v| !v.is_null()).cloned();

    let ordering = match (present(a), present(b)) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(x), Some(y)) => {
            compare_values(&x, &y).then_with(|| row_id(a).cmp(&row_id(b)))
        }
    };

    match order.sort_type {
        SortType::Asc => ordering,
        SortType::Desc => ordering.reverse(),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::{Condition, Entity};
    use shared::models::Room;

    fn object(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn room(number: &str, status: &str) -> Row {
        object(json!({ "Name": format!("Room {number}"), "number_c": number, "status_c": status }))
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_stamps_created_on() {
        let store = MemoryRecordStore::new();
        let payload = WritePayload {
            records: vec![room("101", "Available"), room("102", "Occupied")],
        };

        let response = store.create_record("room_c", &payload).await.unwrap();
        let results = response.results.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.success));
        assert_eq!(results[0].data.as_ref().unwrap()["Id"], json!(1));
        assert_eq!(results[1].data.as_ref().unwrap()["Id"], json!(2));
        assert!(results[0].data.as_ref().unwrap()[CREATED_ON_FIELD].is_string());
        assert_eq!(store.len("room_c"), 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = MemoryRecordStore::new();
        store.seed("room_c", [room("101", "Available"), room("102", "Available")]);

        store.delete_record("room_c", &DeletePayload::single(2)).await.unwrap();
        let response = store
            .create_record("room_c", &WritePayload::single(room("103", "Available")))
            .await
            .unwrap();

        let results = response.results.unwrap();
        assert_eq!(results[0].data.as_ref().unwrap()["Id"], json!(3));
    }

    #[tokio::test]
    async fn test_unknown_field_fails_only_that_record() {
        let store = MemoryRecordStore::new();
        let mut bad = room("101", "Available");
        bad.insert("colour".into(), json!("blue"));

        let payload = WritePayload {
            records: vec![bad, room("102", "Available")],
        };
        let results = store
            .create_record("room_c", &payload)
            .await
            .unwrap()
            .results
            .unwrap();

        assert!(!results[0].success);
        assert_eq!(results[0].messages(), vec!["colour: Unknown field"]);
        assert!(results[1].success);
        assert_eq!(store.len("room_c"), 1);
    }

    #[tokio::test]
    async fn test_fetch_orders_filters_and_projects() {
        let store = MemoryRecordStore::new();
        store.seed(
            "room_c",
            [
                room("201", "Available"),
                room("101", "Available"),
                room("102", "Occupied"),
                object(json!({ "Name": "Unnumbered", "status_c": "Available" })),
            ],
        );

        let params = FetchParams::for_schema(Room::SCHEMA)
            .filter(Condition::equal_to("status_c", "Available"));
        let response = store.fetch_records("room_c", &params).await.unwrap();
        let rows = response.data.unwrap();
        let rows = rows.as_array().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["number_c"], json!("101"));
        assert_eq!(rows[1]["number_c"], json!("201"));
        assert!(rows[2].get("number_c").is_none());
        assert!(rows[0].get("Id").is_some());
    }

    #[tokio::test]
    async fn test_numbers_sort_numerically_and_missing_last_when_descending() {
        let store = MemoryRecordStore::new();
        store.seed(
            "reading_c",
            [
                object(json!({ "value": 9 })),
                object(json!({ "value": null })),
                object(json!({ "value": 10 })),
            ],
        );

        let params = FetchParams {
            order_by: vec![OrderBy {
                field_name: "value".into(),
                sort_type: SortType::Desc,
            }],
            ..Default::default()
        };
        let rows = store.fetch_records("reading_c", &params).await.unwrap().data.unwrap();

        assert_eq!(rows[0]["value"], json!(10));
        assert_eq!(rows[1]["value"], json!(9));
        assert_eq!(rows[2]["value"], Value::Null);
    }

    #[tokio::test]
    async fn test_update_merges_and_reports_missing_rows() {
        let store = MemoryRecordStore::new();
        store.seed("room_c", [room("101", "Available")]);

        let update = object(json!({ "Id": 1, "status_c": "Maintenance" }));
        let missing = object(json!({ "Id": 9, "status_c": "Maintenance" }));
        let payload = WritePayload {
            records: vec![update, missing],
        };
        let results = store
            .update_record("room_c", &payload)
            .await
            .unwrap()
            .results
            .unwrap();

        assert!(results[0].success);
        assert_eq!(results[0].data.as_ref().unwrap()["number_c"], json!("101"));
        assert_eq!(results[0].data.as_ref().unwrap()["status_c"], json!("Maintenance"));
        assert!(!results[1].success);
        assert_eq!(results[1].messages(), vec!["Record with Id 9 does not exist"]);
    }

    #[tokio::test]
    async fn test_get_missing_record_has_no_data() {
        let store = MemoryRecordStore::new();
        let params = FetchParams::fields_only(Room::SCHEMA);

        let response = store.get_record_by_id("room_c", 42, &params).await.unwrap();
        assert!(response.success);
        assert!(response.payload().is_none());
    }
}
