//! In-memory external user directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::tracker::{
    domain::{User, UserId},
    ports::{ExternalUserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// Thread-safe in-memory mapping of external identities to local users.
///
/// Unknown identities get a user created on first sight. Requests without
/// an identity resolve to one fixed "unknown" user per platform.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<(String, Option<String>), User>,
    lookups: Vec<(String, Option<String>)>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every `(platform, external_id)` lookup in request order.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Persistence`] when the lock is poisoned.
    pub fn lookups(&self) -> UserDirectoryResult<Vec<(String, Option<String>)>> {
        let state = self.state.read().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.lookups.clone())
    }
}

fn username_for(platform: &str, external_id: Option<&str>) -> String {
    external_id.map_or_else(
        || format!("{platform}-unknown"),
        |id| format!("{platform}-{}", id.trim_matches(['{', '}'])),
    )
}

#[async_trait]
impl ExternalUserDirectory for InMemoryUserDirectory {
    async fn find_or_create_external_user(
        &self,
        platform: &str,
        external_id: Option<&str>,
    ) -> UserDirectoryResult<User> {
        let mut state = self.state.write().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let key = (platform.to_owned(), external_id.map(str::to_owned));
        state.lookups.push(key.clone());
        let user = state
            .users
            .entry(key)
            .or_insert_with(|| User::new(UserId::new(), username_for(platform, external_id)))
            .clone();
        Ok(user)
    }
}
