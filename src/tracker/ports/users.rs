//! External user resolution port.

use crate::tracker::domain::User;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Maps external platform identities onto local users.
#[async_trait]
pub trait ExternalUserDirectory: Send + Sync {
    /// Finds or creates the local user for an external identity.
    ///
    /// `platform` is the platform storage key. When `external_id` is `None`
    /// implementations return the platform's fixed "unknown" user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError`] when lookup or creation fails.
    async fn find_or_create_external_user(
        &self,
        platform: &str,
        external_id: Option<&str>,
    ) -> UserDirectoryResult<User>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// Persistence-layer failure.
    #[error("user directory error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
