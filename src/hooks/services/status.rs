//! Resolution of `TG-<ref> #<slug>` directives to status updates.

use std::sync::Arc;

use crate::hooks::services::{HookError, HookResult};
use crate::tracker::{
    domain::{ItemKind, ItemRef, ProjectId, StatusSlug, TrackedItem},
    ports::{StatusCatalog, TrackedItemRepository},
};

/// Applies status directives to tracked items.
#[derive(Clone)]
pub struct StatusResolver<S>
where
    S: TrackedItemRepository + StatusCatalog,
{
    store: Arc<S>,
}

impl<S> StatusResolver<S>
where
    S: TrackedItemRepository + StatusCatalog,
{
    /// Creates a resolver over the host's item store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Finds the item a project-scoped reference points at.
    ///
    /// Kinds are searched in [`ItemKind::RESOLUTION_ORDER`]; the first kind
    /// holding the reference wins.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::ReferenceNotFound`] when no kind holds the
    /// reference, or [`HookError::Repository`] when lookup fails.
    pub async fn resolve(&self, project: ProjectId, item_ref: ItemRef) -> HookResult<TrackedItem> {
        for kind in ItemKind::RESOLUTION_ORDER {
            if let Some(item) = self.store.find_by_ref(project, kind, item_ref).await? {
                return Ok(item);
            }
        }
        Err(HookError::ReferenceNotFound(item_ref.to_string()))
    }

    /// Moves the referenced item to the status named by `slug` and persists
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::ReferenceNotFound`] or
    /// [`HookError::StatusNotFound`] when the directive cannot be applied,
    /// or [`HookError::Repository`] when the store fails.
    pub async fn set_item_status(
        &self,
        project: ProjectId,
        item_ref: ItemRef,
        slug: &StatusSlug,
    ) -> HookResult<TrackedItem> {
        let mut item = self.resolve(project, item_ref).await?;
        let status = self
            .store
            .find_status_by_slug(project, item.kind(), slug)
            .await?
            .ok_or_else(|| HookError::StatusNotFound {
                kind: item.kind(),
                slug: slug.clone(),
            })?;

        item.change_status(status)?;
        self.store.update(&item).await?;
        Ok(item)
    }
}
