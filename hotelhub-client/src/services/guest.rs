//! Guest store
//!
//! Guests have no hosted table. They live in an ordered in-process list
//! seeded with a handful of sample guests; clones of a store share the
//! list, separately constructed stores do not.

use std::sync::Arc;

use parking_lot::Mutex;
use shared::models::{Guest, GuestDraft};
use tokio_util::sync::CancellationToken;

use super::EntityService;
use crate::latency::{Latency, Operation};
use crate::{ClientError, ClientResult};

/// In-process guest list
#[derive(Debug, Clone)]
pub struct GuestStore {
    guests: Arc<Mutex<Vec<Guest>>>,
    latency: Latency,
    cancel: CancellationToken,
}

impl GuestStore {
    pub fn new(guests: Vec<Guest>) -> Self {
        Self {
            guests: Arc::new(Mutex::new(guests)),
            latency: Latency::simulated(),
            cancel: CancellationToken::new(),
        }
    }

    /// Store holding [`Guest::samples`]
    pub fn seeded() -> Self {
        Self::new(Guest::samples())
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Same list, bound to another cancellation token
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            guests: Arc::clone(&self.guests),
            latency: self.latency,
            cancel,
        }
    }

    /// Guests matching a search term (see [`Guest::matches`])
    pub async fn search(&self, term: &str) -> Vec<Guest> {
        let term = term.trim();
        self.get_all()
            .await
            .into_iter()
            .filter(|g| term.is_empty() || g.matches(term))
            .collect()
    }

    fn not_found(id: i64) -> ClientError {
        ClientError::NotFound(format!("Guest with ID {id} not found"))
    }
}

impl Default for GuestStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl EntityService for GuestStore {
    type Entity = Guest;
    type Draft = GuestDraft;

    async fn get_all(&self) -> Vec<Guest> {
        if self.latency.pause(Operation::List, &self.cancel).await.is_err() {
            return Vec::new();
        }
        self.guests.lock().clone()
    }

    async fn get_by_id(&self, id: i64) -> ClientResult<Guest> {
        self.latency.pause(Operation::Get, &self.cancel).await?;

        self.guests
            .lock()
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, draft: &GuestDraft) -> ClientResult<Guest> {
        self.latency.pause(Operation::Create, &self.cancel).await?;

        let mut guests = self.guests.lock();
        let id = guests.iter().map(|g| g.id).max().unwrap_or(0) + 1;
        let guest = Guest::from_draft(id, draft.clone());
        guests.push(guest.clone());
        tracing::debug!(guest_id = id, "Guest created");
        Ok(guest)
    }

    /// Replaces the whole record; attributes missing from `draft` are
    /// cleared.
    async fn update(&self, id: i64, draft: &GuestDraft) -> ClientResult<Guest> {
        self.latency.pause(Operation::Update, &self.cancel).await?;

        let mut guests = self.guests.lock();
        let slot = guests
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        *slot = Guest::from_draft(id, draft.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> bool {
        if self.latency.pause(Operation::Delete, &self.cancel).await.is_err() {
            return false;
        }

        let mut guests = self.guests.lock();
        match guests.iter().position(|g| g.id == id) {
            Some(index) => {
                guests.remove(index);
                true
            }
            None => {
                tracing::warn!(guest_id = id, "Guest not found for delete");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::EntityDraft;

    fn store() -> GuestStore {
        GuestStore::seeded().with_latency(Latency::none())
    }

    fn draft(first: &str, last: &str) -> GuestDraft {
        GuestDraft {
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_seeded_with_samples() {
        let guests = store().get_all().await;
        assert_eq!(guests.len(), 5);
        assert_eq!(guests[0].first_name.as_deref(), Some("John"));
    }

    #[tokio::test]
    async fn test_create_assigns_max_plus_one() {
        let store = store();
        assert!(store.delete(3).await);

        let guest = store.create(&draft("Ada", "Lovelace")).await.unwrap();
        assert_eq!(guest.id, 6);
        assert_eq!(guest.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(store.get_by_id(6).await.unwrap(), guest);
    }

    #[tokio::test]
    async fn test_create_in_empty_store_starts_at_one() {
        let store = GuestStore::new(Vec::new()).with_latency(Latency::none());
        let guest = store.create(&draft("Ada", "Lovelace")).await.unwrap();
        assert_eq!(guest.id, 1);
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let store = store();
        let legacy = GuestDraft::from_record(&json!({ "firstName": "Jon", "vipStatus": false })).unwrap();

        let updated = store.update(1, &legacy).await.unwrap();
        assert_eq!(updated.first_name.as_deref(), Some("Jon"));
        assert_eq!(updated.last_name, None);
        assert!(!updated.vip_status);

        let err = store.update(99, &legacy).await.unwrap_err();
        assert_eq!(err.to_string(), "Guest with ID 99 not found");
    }

    #[tokio::test]
    async fn test_delete_missing_is_false() {
        let store = store();
        assert!(store.delete(2).await);
        assert!(!store.delete(2).await);
        assert!(store.get_by_id(2).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_separate_stores_are_isolated() {
        let a = store();
        let b = store();
        a.delete(1).await;

        assert_eq!(a.get_all().await.len(), 4);
        assert_eq!(b.get_all().await.len(), 5);
    }

    #[tokio::test]
    async fn test_search() {
        let store = store();
        assert_eq!(store.search("sarah").await.len(), 1);
        assert_eq!(store.search("@email.com").await.len(), 5);
        assert_eq!(store.search("+1-555-0103").await[0].id, 3);
        assert_eq!(store.search("  ").await.len(), 5);
    }

    #[tokio::test]
    async fn test_cancelled_store_reads_empty() {
        let cancel = CancellationToken::new();
        let store = store().with_cancellation(cancel.clone());
        cancel.cancel();

        assert!(store.get_all().await.is_empty());
        assert!(matches!(store.get_by_id(1).await, Err(ClientError::Cancelled)));
        assert!(!store.delete(1).await);
    }
}
