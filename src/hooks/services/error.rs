//! Service-level errors for webhook processing.

use thiserror::Error;

use crate::hooks::domain::{HookEventKind, MissingFields};
use crate::tracker::{
    domain::{ItemKind, StatusSlug, TrackerDomainError},
    ports::{HistoryError, ItemRepositoryError, NotificationError, UserDirectoryError},
};

/// Errors surfaced to the webhook delivery endpoint.
///
/// Payload and resolution errors are caused by the sender and map to a
/// client error; collaborator errors are the host's own failures.
#[derive(Debug, Error)]
pub enum HookError {
    /// Required payload fields were absent.
    #[error(transparent)]
    InvalidPayload(#[from] MissingFields),

    /// The payload does not follow the platform's schema.
    #[error("malformed {event} payload: {reason}")]
    MalformedPayload {
        /// Event kind being parsed.
        event: HookEventKind,
        /// Deserializer message.
        reason: String,
    },

    /// No issue, task, or user story has the referenced number.
    ///
    /// Carries the number as written in the directive.
    #[error("the referenced element #{0} doesn't exist")]
    ReferenceNotFound(String),

    /// The status slug is unknown for the referenced item's kind.
    #[error("the status '{slug}' doesn't exist for {kind} items")]
    StatusNotFound {
        /// Kind of the referenced item.
        kind: ItemKind,
        /// Requested slug.
        slug: StatusSlug,
    },

    /// A tracked item rejected the requested change.
    #[error(transparent)]
    Domain(#[from] TrackerDomainError),

    /// Tracked item store failure.
    #[error(transparent)]
    Repository(#[from] ItemRepositoryError),

    /// History service failure.
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Notification dispatch failure.
    #[error(transparent)]
    Notification(#[from] NotificationError),

    /// External user resolution failure.
    #[error(transparent)]
    Users(#[from] UserDirectoryError),
}

impl HookError {
    /// Returns whether the sender can correct the failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPayload(_)
                | Self::MalformedPayload { .. }
                | Self::ReferenceNotFound(_)
                | Self::StatusNotFound { .. }
        )
    }
}

/// Result type for webhook service operations.
pub type HookResult<T> = Result<T, HookError>;
