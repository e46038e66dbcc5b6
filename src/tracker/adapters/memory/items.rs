//! In-memory tracked item store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::tracker::{
    domain::{
        ExternalReference, ItemId, ItemKind, ItemRef, NewIssue, ProjectId, Status, StatusSlug,
        TrackedItem,
    },
    ports::{ItemRepositoryError, ItemRepositoryResult, StatusCatalog, TrackedItemRepository},
};

/// Thread-safe in-memory store for tracked items and status sets.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackerStore {
    state: Arc<RwLock<InMemoryTrackerState>>,
}

#[derive(Debug, Default)]
struct InMemoryTrackerState {
    items: HashMap<ItemId, TrackedItem>,
    ref_index: HashMap<(ProjectId, ItemKind, ItemRef), ItemId>,
    statuses: HashMap<(ProjectId, ItemKind, StatusSlug), Status>,
}

impl InMemoryTrackerState {
    fn index(&mut self, item: TrackedItem) {
        self.ref_index.insert(
            (item.project(), item.kind(), item.item_ref()),
            item.id(),
        );
        self.items.insert(item.id(), item);
    }

    /// Returns the reference after the highest one used in the project.
    fn next_ref(&self, project: ProjectId) -> ItemRepositoryResult<ItemRef> {
        let highest = self
            .ref_index
            .keys()
            .filter(|(owner, _, _)| *owner == project)
            .map(|(_, _, item_ref)| *item_ref)
            .max();
        match highest {
            Some(item_ref) => Ok(item_ref.next()),
            None => Ok(ItemRef::new(1)?),
        }
    }
}

fn poisoned(err: impl ToString) -> ItemRepositoryError {
    ItemRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryTrackerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an existing item, replacing any item with the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ItemRepositoryError::Persistence`] when the lock is poisoned.
    pub fn insert_item(&self, item: TrackedItem) -> ItemRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.index(item);
        Ok(())
    }

    /// Seeds a status into its project's status set.
    ///
    /// # Errors
    ///
    /// Returns [`ItemRepositoryError::Persistence`] when the lock is poisoned.
    pub fn insert_status(&self, status: Status) -> ItemRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.statuses.insert(
            (status.project(), status.kind(), status.slug().clone()),
            status,
        );
        Ok(())
    }

    /// Returns a stored item by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ItemRepositoryError::Persistence`] when the lock is poisoned.
    pub fn get(&self, id: ItemId) -> ItemRepositoryResult<Option<TrackedItem>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.items.get(&id).cloned())
    }

    /// Returns all stored items of one kind.
    ///
    /// # Errors
    ///
    /// Returns [`ItemRepositoryError::Persistence`] when the lock is poisoned.
    pub fn items_of_kind(&self, kind: ItemKind) -> ItemRepositoryResult<Vec<TrackedItem>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut items: Vec<TrackedItem> = state
            .items
            .values()
            .filter(|item| item.kind() == kind)
            .cloned()
            .collect();
        items.sort_by_key(TrackedItem::item_ref);
        Ok(items)
    }
}

#[async_trait]
impl TrackedItemRepository for InMemoryTrackerStore {
    async fn create_issue(&self, issue: NewIssue) -> ItemRepositoryResult<TrackedItem> {
        let mut state = self.state.write().map_err(poisoned)?;
        let item_ref = state.next_ref(issue.project)?;
        let item = TrackedItem::from_new_issue(issue, item_ref)?;
        state.index(item.clone());
        Ok(item)
    }

    async fn update(&self, item: &TrackedItem) -> ItemRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.items.contains_key(&item.id()) {
            return Err(ItemRepositoryError::NotFound(item.id()));
        }
        state.index(item.clone());
        Ok(())
    }

    async fn find_by_ref(
        &self,
        project: ProjectId,
        kind: ItemKind,
        item_ref: ItemRef,
    ) -> ItemRepositoryResult<Option<TrackedItem>> {
        let state = self.state.read().map_err(poisoned)?;
        let item = state
            .ref_index
            .get(&(project, kind, item_ref))
            .and_then(|id| state.items.get(id))
            .cloned();
        Ok(item)
    }

    async fn find_by_external_reference(
        &self,
        kind: ItemKind,
        reference: &ExternalReference,
    ) -> ItemRepositoryResult<Vec<TrackedItem>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut matches: Vec<TrackedItem> = state
            .items
            .values()
            .filter(|item| item.kind() == kind && item.external_reference() == Some(reference))
            .cloned()
            .collect();
        matches.sort_by_key(TrackedItem::item_ref);
        Ok(matches)
    }
}

#[async_trait]
impl StatusCatalog for InMemoryTrackerStore {
    async fn find_status_by_slug(
        &self,
        project: ProjectId,
        kind: ItemKind,
        slug: &StatusSlug,
    ) -> ItemRepositoryResult<Option<Status>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.statuses.get(&(project, kind, slug.clone())).cloned())
    }
}
