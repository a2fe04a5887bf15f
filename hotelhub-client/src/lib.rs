//! HotelHub Client - data services for the hotel desk
//!
//! Typed CRUD services over the hosted record API (or an in-memory stand-in),
//! the staff view over profiles, the in-process guest list and the reports
//! built from them.

pub mod config;
pub mod error;
pub mod latency;
pub mod notify;
pub mod reports;
pub mod services;
pub mod store;

pub use config::{BackendKind, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use latency::{Latency, Operation};
pub use notify::{Notice, Notifications};
pub use reports::{ReportSummary, Reports, RoomStatusBreakdown};
pub use services::{
    BookingService, EntityService, GuestStore, HotelServices, ProfileService, RemoteService,
    RoomService, ServiceContext, StaffDirectory, TaskService,
};
pub use store::{HttpRecordStore, MemoryRecordStore, RecordStore};

// Re-export shared types for convenience
pub use shared::models::{
    Booking, BookingDraft, Guest, GuestDraft, Profile, ProfileDraft, Role, Room, RoomDraft, Task,
    TaskDraft,
};
pub use tokio_util::sync::CancellationToken;
