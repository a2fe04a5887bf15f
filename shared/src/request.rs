//! Request types for the hosted record API
//!
//! Field names follow the hosted API's JSON casing, which is not uniform
//! (`orderBy`/`sorttype` next to `FieldName`/`RecordIds`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::Schema;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortType {
    Asc,
    Desc,
}

/// Field selector: `{"field": {"Name": "number_c"}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelector {
    pub field: FieldName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

impl FieldSelector {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            field: FieldName { name: name.into() },
        }
    }
}

/// Ordering clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(rename = "sorttype")]
    pub sort_type: SortType,
}

/// Filter operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    EqualTo,
}

/// Filter clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "Operator")]
    pub operator: Operator,
    #[serde(rename = "Values")]
    pub values: Vec<Value>,
}

impl Condition {
    /// `field == value`
    pub fn equal_to(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field_name: field.into(),
            operator: Operator::EqualTo,
            values: vec![value.into()],
        }
    }

    /// Evaluate against a stored row
    pub fn matches(&self, row: &Map<String, Value>) -> bool {
        let actual = row.get(&self.field_name).unwrap_or(&Value::Null);
        match self.operator {
            Operator::EqualTo => self.values.iter().any(|v| v == actual),
        }
    }
}

/// Parameters for fetch and get-by-id calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchParams {
    #[serde(default)]
    pub fields: Vec<FieldSelector>,
    #[serde(rename = "orderBy", default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl FetchParams {
    /// Every schema field, in the schema's default order
    pub fn for_schema(schema: &Schema) -> Self {
        let mut params = Self::fields_only(schema);
        if let Some((field, sort_type)) = schema.order_by {
            params.order_by.push(OrderBy {
                field_name: field.to_string(),
                sort_type,
            });
        }
        params
    }

    /// Every schema field, no ordering (single record reads)
    pub fn fields_only(schema: &Schema) -> Self {
        Self {
            fields: schema.field_names().map(FieldSelector::new).collect(),
            order_by: Vec::new(),
            conditions: Vec::new(),
        }
    }

    /// Add a filter clause
    pub fn filter(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Selected field names
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field.name.as_str())
    }
}

/// Create/update payload: `{"records": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WritePayload {
    pub records: Vec<Map<String, Value>>,
}

impl WritePayload {
    pub fn single(record: Map<String, Value>) -> Self {
        Self {
            records: vec![record],
        }
    }
}

/// Delete payload: `{"RecordIds": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePayload {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<i64>,
}

impl DeletePayload {
    pub fn single(id: i64) -> Self {
        Self {
            record_ids: vec![id],
        }
    }
}
