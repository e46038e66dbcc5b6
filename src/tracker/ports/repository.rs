//! Repository ports for tracked items and their status sets.

use crate::tracker::domain::{
    ExternalReference, ItemId, ItemKind, ItemRef, NewIssue, ProjectId, Status, StatusSlug,
    TrackedItem, TrackerDomainError,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for item repository operations.
pub type ItemRepositoryResult<T> = Result<T, ItemRepositoryError>;

/// Tracked item persistence contract.
#[async_trait]
pub trait TrackedItemRepository: Send + Sync {
    /// Creates an issue, assigning the next free reference in its project.
    ///
    /// # Errors
    ///
    /// Returns [`ItemRepositoryError::InvalidItem`] when the issue fields
    /// are rejected, or a persistence error.
    async fn create_issue(&self, issue: NewIssue) -> ItemRepositoryResult<TrackedItem>;

    /// Persists changes to an existing item.
    ///
    /// # Errors
    ///
    /// Returns [`ItemRepositoryError::NotFound`] when the item does not exist.
    async fn update(&self, item: &TrackedItem) -> ItemRepositoryResult<()>;

    /// Finds the item of the given kind with the given reference in a project.
    ///
    /// Returns `None` when no such item exists.
    async fn find_by_ref(
        &self,
        project: ProjectId,
        kind: ItemKind,
        item_ref: ItemRef,
    ) -> ItemRepositoryResult<Option<TrackedItem>>;

    /// Returns all items of the given kind stamped with the external reference.
    ///
    /// The lookup is not scoped to a project and several items may match.
    async fn find_by_external_reference(
        &self,
        kind: ItemKind,
        reference: &ExternalReference,
    ) -> ItemRepositoryResult<Vec<TrackedItem>>;
}

/// Status set lookup contract.
#[async_trait]
pub trait StatusCatalog: Send + Sync {
    /// Finds a status by slug in the status set of a project's item kind.
    ///
    /// Returns `None` when the slug is unknown for that kind.
    async fn find_status_by_slug(
        &self,
        project: ProjectId,
        kind: ItemKind,
        slug: &StatusSlug,
    ) -> ItemRepositoryResult<Option<Status>>;
}

/// Errors returned by item repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ItemRepositoryError {
    /// The item was not found.
    #[error("tracked item not found: {0}")]
    NotFound(ItemId),

    /// The item fields were rejected by domain validation.
    #[error(transparent)]
    InvalidItem(#[from] TrackerDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ItemRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
