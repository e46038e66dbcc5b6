//! Immutable history records.

use super::{ItemId, ItemKind, SnapshotId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A history record of one change to a tracked item.
///
/// Snapshots are created once per processed event and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    id: SnapshotId,
    item_id: ItemId,
    item_kind: ItemKind,
    comment: Option<String>,
    user: UserId,
    created_at: DateTime<Utc>,
}

impl Snapshot {
    /// Creates a snapshot record.
    #[must_use]
    pub const fn new(
        id: SnapshotId,
        item_id: ItemId,
        item_kind: ItemKind,
        comment: Option<String>,
        user: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            item_id,
            item_kind,
            comment,
            user,
            created_at,
        }
    }

    /// Returns the snapshot identifier.
    #[must_use]
    pub const fn id(&self) -> SnapshotId {
        self.id
    }

    /// Returns the item the snapshot belongs to.
    #[must_use]
    pub const fn item_id(&self) -> ItemId {
        self.item_id
    }

    /// Returns the kind of the snapshotted item.
    #[must_use]
    pub const fn item_kind(&self) -> ItemKind {
        self.item_kind
    }

    /// Returns the human-readable comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn user(&self) -> UserId {
        self.user
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
