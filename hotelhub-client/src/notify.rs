//! User-facing notification channel
//!
//! Recoverable failures are published here once each, separately from the
//! diagnostic log. A front end subscribes and renders them as transient
//! toasts; with no subscriber the notices are dropped.

use serde::Serialize;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

/// One notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Table the failure came from (e.g. `booking_c`)
    pub source: &'static str,
    pub message: String,
}

/// Broadcast channel of [`Notice`]s
#[derive(Debug, Clone)]
pub struct Notifications {
    sender: broadcast::Sender<Notice>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    /// Publish an error notice
    pub fn error(&self, source: &'static str, message: impl Into<String>) {
        // Err only means nobody is listening.
        let _ = self.sender.send(Notice {
            source,
            message: message.into(),
        });
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain every notice currently buffered in `rx`
pub fn drain(rx: &mut broadcast::Receiver<Notice>) -> Vec<Notice> {
    let mut notices = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(notice) => notices.push(notice),
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    notices
}
