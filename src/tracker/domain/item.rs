//! Tracked item aggregate and its correlation key.

use super::{ItemId, ItemRef, Project, ProjectId, Status, TrackerDomainError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of items a project tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Issue record.
    Issue,
    /// Task record.
    Task,
    /// User story record.
    UserStory,
}

impl ItemKind {
    /// All kinds in reference-resolution priority order.
    pub const RESOLUTION_ORDER: [Self; 3] = [Self::Issue, Self::Task, Self::UserStory];

    /// Returns the kind name in canonical storage format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::Task => "task",
            Self::UserStory => "user_story",
        }
    }
}

impl TryFrom<&str> for ItemKind {
    type Error = TrackerDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "issue" => Ok(Self::Issue),
            "task" => Ok(Self::Task),
            "user_story" | "userstory" => Ok(Self::UserStory),
            _ => Err(TrackerDomainError::InvalidItemKind(value.to_owned())),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Correlation key linking a local item to an externally created issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalReference {
    platform: String,
    url: String,
}

impl ExternalReference {
    /// Creates an external reference from a platform storage key and URL.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyExternalUrl`] when the URL is
    /// empty after trimming.
    pub fn new(
        platform: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, TrackerDomainError> {
        let raw_url = url.into();
        let normalized = raw_url.trim();
        if normalized.is_empty() {
            return Err(TrackerDomainError::EmptyExternalUrl);
        }
        Ok(Self {
            platform: platform.into(),
            url: normalized.to_owned(),
        })
    }

    /// Returns the platform storage key.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Returns the external issue URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ExternalReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.platform, self.url)
    }
}

/// Issue-only classification attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueClassification {
    /// Issue type name.
    pub issue_type: String,
    /// Severity name.
    pub severity: String,
    /// Priority name.
    pub priority: String,
}

/// Tracked item aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedItem {
    id: ItemId,
    project: ProjectId,
    kind: ItemKind,
    item_ref: ItemRef,
    subject: String,
    description: String,
    status: Status,
    classification: Option<IssueClassification>,
    external_reference: Option<ExternalReference>,
    owner: Option<UserId>,
}

impl TrackedItem {
    /// Creates an item with the given reference and initial status.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptySubject`] when the subject is
    /// blank, or [`TrackerDomainError::StatusKindMismatch`] when the status
    /// belongs to another kind's status set.
    pub fn new(
        project: ProjectId,
        kind: ItemKind,
        item_ref: ItemRef,
        subject: impl Into<String>,
        status: Status,
    ) -> Result<Self, TrackerDomainError> {
        let raw_subject = subject.into();
        let normalized_subject = raw_subject.trim();
        if normalized_subject.is_empty() {
            return Err(TrackerDomainError::EmptySubject);
        }
        ensure_status_kind(kind, &status)?;

        Ok(Self {
            id: ItemId::new(),
            project,
            kind,
            item_ref,
            subject: normalized_subject.to_owned(),
            description: String::new(),
            status,
            classification: None,
            external_reference: None,
            owner: None,
        })
    }

    /// Materializes a new issue at the reference chosen by the store.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError`] when the issue fields are invalid.
    pub fn from_new_issue(issue: NewIssue, item_ref: ItemRef) -> Result<Self, TrackerDomainError> {
        let mut item = Self::new(
            issue.project,
            ItemKind::Issue,
            item_ref,
            issue.subject,
            issue.status,
        )?;
        item.description = issue.description;
        item.classification = Some(issue.classification);
        item.external_reference = Some(issue.external_reference);
        item.owner = Some(issue.owner);
        Ok(item)
    }

    /// Stamps the external reference.
    #[must_use]
    pub fn with_external_reference(mut self, reference: ExternalReference) -> Self {
        self.external_reference = Some(reference);
        self
    }

    /// Replaces the item status.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::StatusKindMismatch`] when the status
    /// belongs to another kind's status set.
    pub fn change_status(&mut self, status: Status) -> Result<(), TrackerDomainError> {
        ensure_status_kind(self.kind, &status)?;
        self.status = status;
        Ok(())
    }

    /// Returns the item identifier.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project(&self) -> ProjectId {
        self.project
    }

    /// Returns the item kind.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Returns the project-scoped reference.
    #[must_use]
    pub const fn item_ref(&self) -> ItemRef {
        self.item_ref
    }

    /// Returns the subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Returns the issue classification, present for issues created here.
    #[must_use]
    pub const fn classification(&self) -> Option<&IssueClassification> {
        self.classification.as_ref()
    }

    /// Returns the external reference, if the item was created externally.
    #[must_use]
    pub const fn external_reference(&self) -> Option<&ExternalReference> {
        self.external_reference.as_ref()
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> Option<UserId> {
        self.owner
    }
}

fn ensure_status_kind(kind: ItemKind, status: &Status) -> Result<(), TrackerDomainError> {
    if status.kind() == kind {
        return Ok(());
    }
    Err(TrackerDomainError::StatusKindMismatch {
        slug: status.slug().as_str().to_owned(),
        status_kind: status.kind(),
        item_kind: kind,
    })
}

/// Fields for an issue about to be created by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    /// Owning project.
    pub project: ProjectId,
    /// Issue subject.
    pub subject: String,
    /// Issue description.
    pub description: String,
    /// Initial status.
    pub status: Status,
    /// Type, severity and priority.
    pub classification: IssueClassification,
    /// Correlation key for the external issue.
    pub external_reference: ExternalReference,
    /// Owning user.
    pub owner: UserId,
}

impl NewIssue {
    /// Creates a new-issue request populated with the project's defaults.
    #[must_use]
    pub fn with_project_defaults(
        project: &Project,
        subject: impl Into<String>,
        description: impl Into<String>,
        external_reference: ExternalReference,
        owner: UserId,
    ) -> Self {
        let defaults = project.issue_defaults();
        Self {
            project: project.id(),
            subject: subject.into(),
            description: description.into(),
            status: defaults.status.clone(),
            classification: defaults.classification.clone(),
            external_reference,
            owner,
        }
    }
}
