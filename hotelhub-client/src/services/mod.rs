//! Entity services
//!
//! One service per entity, all sharing the same shape:
//! - [`RemoteService`]: bookings, rooms, tasks and profiles over a
//!   [`RecordStore`]
//! - [`StaffDirectory`]: the staff-role view over profiles
//! - [`GuestStore`]: in-process guest list
//!
//! Every operation waits out the simulated latency first, and that wait is
//! where a bound cancellation token takes effect.

pub mod batch;
pub mod guest;
pub mod profile;
pub mod remote;
pub mod staff;

pub use batch::{WriteOp, reconcile_delete, reconcile_write};
pub use guest::GuestStore;
pub use remote::{BookingService, ProfileService, RemoteService, RoomService, TaskService};
pub use staff::StaffDirectory;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::latency::Latency;
use crate::notify::Notifications;
use crate::reports::Reports;
use crate::store::RecordStore;
use crate::ClientResult;

// ============================================================================
// Service trait
// ============================================================================

/// CRUD surface shared by every entity service
///
/// List reads never fail: errors are logged and degrade to an empty list.
/// Single-record reads and writes propagate their errors. Delete reports
/// through its boolean.
#[allow(async_fn_in_trait)]
pub trait EntityService {
    type Entity;
    type Draft;

    async fn get_all(&self) -> Vec<Self::Entity>;

    async fn get_by_id(&self, id: i64) -> ClientResult<Self::Entity>;

    async fn create(&self, draft: &Self::Draft) -> ClientResult<Self::Entity>;

    async fn update(&self, id: i64, draft: &Self::Draft) -> ClientResult<Self::Entity>;

    async fn delete(&self, id: i64) -> bool;
}

// ============================================================================
// Service context
// ============================================================================

/// Collaborators every remote service needs
#[derive(Clone)]
pub struct ServiceContext {
    pub store: Arc<dyn RecordStore>,
    pub latency: Latency,
    pub notifications: Notifications,
    pub cancel: CancellationToken,
}

impl ServiceContext {
    /// Context over `store` with the simulated latency profile
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            latency: Latency::simulated(),
            notifications: Notifications::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Build the backend and latency profile described by `config`
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(config.build_store()?).with_latency(config.latency()))
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_notifications(mut self, notifications: Notifications) -> Self {
        self.notifications = notifications;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("latency", &self.latency)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Service bundle
// ============================================================================

/// Every service over one shared context
#[derive(Debug, Clone)]
pub struct HotelServices {
    pub bookings: BookingService,
    pub rooms: RoomService,
    pub tasks: TaskService,
    pub profiles: ProfileService,
    pub staff: StaffDirectory,
    pub guests: GuestStore,
    context: ServiceContext,
}

impl HotelServices {
    pub fn new(context: ServiceContext) -> Self {
        let profiles = ProfileService::new(context.clone());
        Self {
            bookings: BookingService::new(context.clone()),
            rooms: RoomService::new(context.clone()),
            tasks: TaskService::new(context.clone()),
            staff: StaffDirectory::new(profiles.clone()),
            profiles,
            guests: GuestStore::seeded()
                .with_latency(context.latency)
                .with_cancellation(context.cancel.clone()),
            context,
        }
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(ServiceContext::from_config(config)?))
    }

    /// Services over `store` with the given latency profile
    pub fn with_store(store: Arc<dyn RecordStore>, latency: Latency) -> Self {
        Self::new(ServiceContext::new(store).with_latency(latency))
    }

    /// Rebind every service to `cancel`
    ///
    /// The guest list is shared with the original bundle.
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        let context = self.context.clone().with_cancellation(cancel.clone());
        let profiles = ProfileService::new(context.clone());
        Self {
            bookings: BookingService::new(context.clone()),
            rooms: RoomService::new(context.clone()),
            tasks: TaskService::new(context.clone()),
            staff: StaffDirectory::new(profiles.clone()),
            profiles,
            guests: self.guests.with_cancellation(cancel),
            context,
        }
    }

    pub fn context(&self) -> &ServiceContext {
        &self.context
    }

    pub fn notifications(&self) -> &Notifications {
        &self.context.notifications
    }

    pub fn reports(&self) -> Reports {
        Reports::new(self.bookings.clone(), self.rooms.clone())
    }
}
