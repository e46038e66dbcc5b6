//! Per-kind status records.

use super::{ItemKind, ProjectId, StatusId, TrackerDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized status slug, unique per project and item kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusSlug(String);

impl StatusSlug {
    /// Creates a validated, lowercased status slug.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyStatusSlug`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TrackerDomainError::EmptyStatusSlug);
        }
        Ok(Self(normalized.to_lowercase()))
    }

    /// Returns the slug as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StatusSlug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StatusSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A status drawn from the status set of one item kind in one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    id: StatusId,
    project: ProjectId,
    kind: ItemKind,
    slug: StatusSlug,
    name: String,
}

impl Status {
    /// Creates a status for the given project and item kind.
    #[must_use]
    pub fn new(
        project: ProjectId,
        kind: ItemKind,
        slug: StatusSlug,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: StatusId::new(),
            project,
            kind,
            slug,
            name: name.into(),
        }
    }

    /// Returns the status identifier.
    #[must_use]
    pub const fn id(&self) -> StatusId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project(&self) -> ProjectId {
        self.project
    }

    /// Returns the item kind whose status set holds this status.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Returns the status slug.
    #[must_use]
    pub const fn slug(&self) -> &StatusSlug {
        &self.slug
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
