//! In-memory history and notification recorders.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::{Arc, RwLock};

use crate::tracker::{
    domain::{ItemId, Snapshot, SnapshotId, TrackedItem, User},
    ports::{
        HistoryError, HistoryResult, HistoryService, NotificationError, NotificationResult,
        NotificationService,
    },
};

/// Records snapshots in memory, timestamped by the injected clock.
#[derive(Clone)]
pub struct InMemoryHistory<C>
where
    C: Clock + Send + Sync,
{
    snapshots: Arc<RwLock<Vec<Snapshot>>>,
    clock: Arc<C>,
}

impl<C> InMemoryHistory<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty history.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            snapshots: Arc::new(RwLock::new(Vec::new())),
            clock,
        }
    }

    /// Returns every snapshot in recording order.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Persistence`] when the lock is poisoned.
    pub fn snapshots(&self) -> HistoryResult<Vec<Snapshot>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|err| HistoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(snapshots.clone())
    }

    /// Returns the snapshots recorded for one item.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Persistence`] when the lock is poisoned.
    pub fn snapshots_for(&self, item_id: ItemId) -> HistoryResult<Vec<Snapshot>> {
        Ok(self
            .snapshots()?
            .into_iter()
            .filter(|snapshot| snapshot.item_id() == item_id)
            .collect())
    }
}

#[async_trait]
impl<C> HistoryService for InMemoryHistory<C>
where
    C: Clock + Send + Sync,
{
    async fn take_snapshot(
        &self,
        item: &TrackedItem,
        comment: Option<&str>,
        user: &User,
    ) -> HistoryResult<Snapshot> {
        let snapshot = Snapshot::new(
            SnapshotId::new(),
            item.id(),
            item.kind(),
            comment.map(str::to_owned),
            user.id(),
            self.clock.utc(),
        );
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|err| HistoryError::persistence(std::io::Error::other(err.to_string())))?;
        snapshots.push(snapshot.clone());
        Ok(snapshot)
    }
}

/// A notification delivered for an item change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentNotification {
    /// Item whose watchers were notified.
    pub item_id: ItemId,
    /// Snapshot describing the change.
    pub snapshot_id: SnapshotId,
}

/// Records notification requests in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotifier {
    sent: Arc<RwLock<Vec<SentNotification>>>,
}

impl InMemoryNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every notification in dispatch order.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Dispatch`] when the lock is poisoned.
    pub fn sent(&self) -> NotificationResult<Vec<SentNotification>> {
        let sent = self
            .sent
            .read()
            .map_err(|err| NotificationError::dispatch(std::io::Error::other(err.to_string())))?;
        Ok(sent.clone())
    }
}

#[async_trait]
impl NotificationService for InMemoryNotifier {
    async fn send_notifications(
        &self,
        item: &TrackedItem,
        snapshot: &Snapshot,
    ) -> NotificationResult<()> {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| NotificationError::dispatch(std::io::Error::other(err.to_string())))?;
        sent.push(SentNotification {
            item_id: item.id(),
            snapshot_id: snapshot.id(),
        });
        Ok(())
    }
}
