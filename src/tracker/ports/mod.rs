//! Port contracts for the host application's tracker services.
//!
//! Ports define infrastructure-agnostic interfaces used by webhook services.

pub mod history;
pub mod repository;
pub mod users;

pub use history::{
    HistoryError, HistoryResult, HistoryService, NotificationError, NotificationResult,
    NotificationService,
};
pub use repository::{
    ItemRepositoryError, ItemRepositoryResult, StatusCatalog, TrackedItemRepository,
};
pub use users::{ExternalUserDirectory, UserDirectoryError, UserDirectoryResult};
