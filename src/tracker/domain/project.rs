//! Project context handed to webhook handlers by the host.

use super::{IssueClassification, ProjectId, Status};
use serde::{Deserialize, Serialize};

/// Defaults applied to issues created from external platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDefaults {
    /// Default issue status.
    pub status: Status,
    /// Default type, severity and priority.
    pub classification: IssueClassification,
}

/// A project of the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    slug: String,
    issue_defaults: IssueDefaults,
}

impl Project {
    /// Creates a project context.
    #[must_use]
    pub fn new(id: ProjectId, slug: impl Into<String>, issue_defaults: IssueDefaults) -> Self {
        Self {
            id,
            slug: slug.into(),
            issue_defaults,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the defaults used for externally created issues.
    #[must_use]
    pub const fn issue_defaults(&self) -> &IssueDefaults {
        &self.issue_defaults
    }
}
