//! History and notification ports.

use crate::tracker::domain::{Snapshot, TrackedItem, User};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Result type for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// History recording contract.
#[async_trait]
pub trait HistoryService: Send + Sync {
    /// Records an immutable snapshot of the item, optionally commented.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] when the snapshot cannot be stored.
    async fn take_snapshot(
        &self,
        item: &TrackedItem,
        comment: Option<&str>,
        user: &User,
    ) -> HistoryResult<Snapshot>;
}

/// Notification dispatch contract.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Notifies the item's watchers about the change captured by a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError`] when dispatch fails.
    async fn send_notifications(
        &self,
        item: &TrackedItem,
        snapshot: &Snapshot,
    ) -> NotificationResult<()>;
}

/// Errors returned by history implementations.
#[derive(Debug, Clone, Error)]
pub enum HistoryError {
    /// Persistence-layer failure.
    #[error("history persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl HistoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Errors returned by notification implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// Delivery-layer failure.
    #[error("notification dispatch error: {0}")]
    Dispatch(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationError {
    /// Wraps a dispatch error.
    pub fn dispatch(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Dispatch(Arc::new(err))
    }
}
