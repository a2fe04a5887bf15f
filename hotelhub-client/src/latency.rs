//! Latency simulator
//!
//! Every service operation pauses before doing any work so local development
//! feels like a network round trip. The pause is the only point at which an
//! operation can be cancelled.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::{ClientError, ClientResult};

/// Operation kinds with distinct delays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// Per-operation delay profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub list: Duration,
    pub get: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Latency {
    /// Development profile: 300/200/500/400/300 ms
    pub const fn simulated() -> Self {
        Self {
            list: Duration::from_millis(300),
            get: Duration::from_millis(200),
            create: Duration::from_millis(500),
            update: Duration::from_millis(400),
            delete: Duration::from_millis(300),
        }
    }

    /// No delay at all
    pub const fn none() -> Self {
        Self {
            list: Duration::ZERO,
            get: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::none()
    }

    pub fn delay_for(&self, op: Operation) -> Duration {
        match op {
            Operation::List => self.list,
            Operation::Get => self.get,
            Operation::Create => self.create,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }

    /// Wait out the delay for `op`
    ///
    /// Fails with [`ClientError::Cancelled`] if `cancel` fires first (or has
    /// already fired).
    pub async fn pause(&self, op: Operation, cancel: &CancellationToken) -> ClientResult<()> {
        let delay = self.delay_for(op);
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        if delay.is_zero() {
            return Ok(());
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}
