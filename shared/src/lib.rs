//! Shared types for HotelHub
//!
//! Entity models, the legacy/remote field normalizer and the wire types of
//! the hosted record API. Nothing in this crate performs I/O.

pub mod models;
pub mod request;
pub mod response;
pub mod schema;

// Re-exports
pub use serde::{Deserialize, Serialize};
pub use serde_json::{Map, Value};

pub use models::{Entity, EntityDraft, WriteMode};
pub use request::{Condition, DeletePayload, FetchParams, Operator, OrderBy, SortType, WritePayload};
pub use response::{FieldError, RecordResult, RemoteResponse};
pub use schema::{FieldPair, Schema};
