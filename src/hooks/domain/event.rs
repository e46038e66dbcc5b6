//! Platform-independent webhook events.
//!
//! Platform adapters fill these types from typed payloads. Every field
//! mirrors an optional payload value; handlers check presence through
//! [`IssueOpenedEvent::require`] and [`IssueCommentEvent::require`] before
//! touching any collaborator.

use super::{FieldPaths, MissingFields};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Event kinds handled by the webhook services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookEventKind {
    /// Commits pushed to a repository.
    Push,
    /// An issue opened on the platform.
    IssueOpened,
    /// A comment posted on a platform issue.
    IssueComment,
}

impl HookEventKind {
    /// Returns the kind name in canonical format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::IssueOpened => "issue_opened",
            Self::IssueComment => "issue_comment",
        }
    }
}

impl fmt::Display for HookEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The external user behind an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    /// Stable platform identifier, when the platform sends one.
    pub external_id: Option<String>,
    /// Display handle.
    pub name: Option<String>,
    /// Profile page URL.
    pub profile_url: Option<String>,
}

/// One pushed commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full commit hash.
    pub id: Option<String>,
    /// Commit page URL.
    pub url: Option<String>,
    /// Commit message.
    pub message: Option<String>,
    /// Author credited in status-change comments.
    pub author: Actor,
}

/// Commits pushed in one delivery, flattened across branch changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushEvent {
    /// Commits in delivery order.
    pub commits: Vec<CommitInfo>,
}

/// Issue opened on the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueOpenedEvent {
    /// Platform issue number.
    pub number: Option<String>,
    /// Issue title.
    pub subject: Option<String>,
    /// Issue body.
    pub description: Option<String>,
    /// URL stored as the external reference.
    pub issue_url: Option<String>,
    /// URL linked from the creation comment.
    pub platform_url: Option<String>,
    /// Repository home URL, base of rewritten references.
    pub project_url: Option<String>,
    /// User who opened the issue.
    pub actor: Actor,
}

/// Issue-opened event whose required fields are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedIssue {
    /// Platform issue number.
    pub number: Option<String>,
    /// Issue title.
    pub subject: String,
    /// Issue body, empty when absent.
    pub description: String,
    /// URL stored as the external reference.
    pub issue_url: String,
    /// URL linked from the creation comment.
    pub platform_url: Option<String>,
    /// Repository home URL.
    pub project_url: String,
    /// User who opened the issue.
    pub actor: Actor,
}

impl IssueOpenedEvent {
    /// Checks required fields and returns the validated event.
    ///
    /// # Errors
    ///
    /// Returns [`MissingFields`] naming every absent required payload path.
    pub fn require(self, paths: &FieldPaths) -> Result<OpenedIssue, MissingFields> {
        let mut report = MissingFields::new(HookEventKind::IssueOpened);
        report.check(paths.issue_subject, self.subject.as_deref());
        report.check(paths.opened_issue_url, self.issue_url.as_deref());
        report.check(paths.project_url, self.project_url.as_deref());

        match (self.subject, self.issue_url, self.project_url) {
            (Some(subject), Some(issue_url), Some(project_url)) if report.is_empty() => {
                Ok(OpenedIssue {
                    number: self.number,
                    subject,
                    description: self.description.unwrap_or_default(),
                    issue_url,
                    platform_url: self.platform_url,
                    project_url,
                    actor: self.actor,
                })
            }
            _ => Err(report),
        }
    }
}

/// Comment posted on a platform issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueCommentEvent {
    /// Platform issue number.
    pub number: Option<String>,
    /// Issue title.
    pub subject: Option<String>,
    /// Comment body.
    pub body: Option<String>,
    /// URL of the commented issue, matched against external references.
    pub issue_url: Option<String>,
    /// Repository home URL, base of rewritten references.
    pub project_url: Option<String>,
    /// User who posted the comment.
    pub actor: Actor,
}

/// Issue-comment event whose required fields are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedComment {
    /// Platform issue number.
    pub number: Option<String>,
    /// Issue title.
    pub subject: Option<String>,
    /// Comment body.
    pub body: String,
    /// URL of the commented issue.
    pub issue_url: String,
    /// Repository home URL.
    pub project_url: String,
    /// User who posted the comment.
    pub actor: Actor,
}

impl IssueCommentEvent {
    /// Checks required fields and returns the validated event.
    ///
    /// # Errors
    ///
    /// Returns [`MissingFields`] naming every absent required payload path.
    pub fn require(self, paths: &FieldPaths) -> Result<PostedComment, MissingFields> {
        let mut report = MissingFields::new(HookEventKind::IssueComment);
        report.check(paths.comment_body, self.body.as_deref());
        report.check(paths.commented_issue_url, self.issue_url.as_deref());
        report.check(paths.project_url, self.project_url.as_deref());

        match (self.body, self.issue_url, self.project_url) {
            (Some(body), Some(issue_url), Some(project_url)) if report.is_empty() => {
                Ok(PostedComment {
                    number: self.number,
                    subject: self.subject,
                    body,
                    issue_url,
                    project_url,
                    actor: self.actor,
                })
            }
            _ => Err(report),
        }
    }
}

/// A normalized delivery ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    /// Pushed commits.
    Push(PushEvent),
    /// Newly opened issue.
    IssueOpened(IssueOpenedEvent),
    /// New issue comment.
    IssueComment(IssueCommentEvent),
}

impl HookEvent {
    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> HookEventKind {
        match self {
            Self::Push(_) => HookEventKind::Push,
            Self::IssueOpened(_) => HookEventKind::IssueOpened,
            Self::IssueComment(_) => HookEventKind::IssueComment,
        }
    }
}
