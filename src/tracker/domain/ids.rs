//! Identifier and validated scalar types for the tracker domain.

use super::TrackerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Declares a UUID-backed identifier newtype.
macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a project in the host application.
    ProjectId
);

uuid_identifier!(
    /// Unique identifier for a tracked item record.
    ItemId
);

uuid_identifier!(
    /// Unique identifier for a status record.
    StatusId
);

uuid_identifier!(
    /// Unique identifier for a local user.
    UserId
);

uuid_identifier!(
    /// Unique identifier for a history snapshot.
    SnapshotId
);

/// Project-scoped sequential reference of a tracked item.
///
/// References are independent of the numbering used by external platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemRef(u64);

impl ItemRef {
    /// Creates a validated item reference.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::InvalidItemRef`] when the value is zero.
    pub const fn new(value: u64) -> Result<Self, TrackerDomainError> {
        if value == 0 {
            return Err(TrackerDomainError::InvalidItemRef(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the reference that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
