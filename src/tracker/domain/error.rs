//! Error types for tracker domain validation.

use super::ItemKind;
use thiserror::Error;

/// Errors returned while constructing tracker domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerDomainError {
    /// The item kind value is unsupported.
    #[error("unsupported item kind: {0}")]
    InvalidItemKind(String),

    /// The item reference is not a positive integer.
    #[error("invalid item reference {0}, expected a positive integer")]
    InvalidItemRef(u64),

    /// The status slug is empty after trimming.
    #[error("status slug must not be empty")]
    EmptyStatusSlug,

    /// The external reference URL is empty after trimming.
    #[error("external reference URL must not be empty")]
    EmptyExternalUrl,

    /// The item subject is empty after trimming.
    #[error("item subject must not be empty")]
    EmptySubject,

    /// A status from one kind's status set was applied to another kind.
    #[error("status '{slug}' belongs to {status_kind} statuses, not {item_kind}")]
    StatusKindMismatch {
        /// Slug of the rejected status.
        slug: String,
        /// Kind whose status set owns the status.
        status_kind: ItemKind,
        /// Kind of the item being updated.
        item_kind: ItemKind,
    },
}
