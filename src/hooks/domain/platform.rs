//! Source-control platforms and their configuration values.

use super::{HookEventKind, UnknownPlatform, rewrite_references};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported source-control platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// BitBucket Cloud.
    #[serde(rename = "bitbucket")]
    BitBucket,
    /// GitLab.
    #[serde(rename = "gitlab")]
    GitLab,
}

impl Platform {
    /// Returns the built-in configuration for the platform.
    #[must_use]
    pub const fn config(self) -> &'static PlatformConfig {
        match self {
            Self::BitBucket => &PlatformConfig::BITBUCKET,
            Self::GitLab => &PlatformConfig::GITLAB,
        }
    }

    /// Maps the platform's event header value to an event kind.
    ///
    /// BitBucket sends `X-Event-Key`, GitLab sends `X-Gitlab-Event`.
    /// Returns `None` for events no handler consumes.
    #[must_use]
    pub fn event_kind_from_header(self, header: &str) -> Option<HookEventKind> {
        match (self, header.trim()) {
            (Self::BitBucket, "repo:push") | (Self::GitLab, "Push Hook") => {
                Some(HookEventKind::Push)
            }
            (Self::BitBucket, "issue:created") | (Self::GitLab, "Issue Hook") => {
                Some(HookEventKind::IssueOpened)
            }
            (Self::BitBucket, "issue:comment_created") | (Self::GitLab, "Note Hook") => {
                Some(HookEventKind::IssueComment)
            }
            _ => None,
        }
    }
}

impl TryFrom<&str> for Platform {
    type Error = UnknownPlatform;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "bitbucket" => Ok(Self::BitBucket),
            "gitlab" => Ok(Self::GitLab),
            _ => Err(UnknownPlatform(value.to_owned())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.config().storage_key)
    }
}

/// Payload paths of the fields handlers require, used in absent-field
/// reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPaths {
    /// Path of the issue subject in issue-opened payloads.
    pub issue_subject: &'static str,
    /// Path of the external issue URL in issue-opened payloads.
    pub opened_issue_url: &'static str,
    /// Path of the external issue URL in comment payloads.
    pub commented_issue_url: &'static str,
    /// Path of the repository home URL.
    pub project_url: &'static str,
    /// Path of the comment body in comment payloads.
    pub comment_body: &'static str,
}

/// Value object describing one platform to the shared handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Platform the configuration describes.
    pub platform: Platform,
    /// Human-readable platform name used in comments and links.
    pub display_name: &'static str,
    /// Short prefix used when quoting external issue numbers.
    pub prefix: &'static str,
    /// Platform key stored in external references.
    pub storage_key: &'static str,
    /// Payload paths of required fields.
    pub field_paths: FieldPaths,
}

impl PlatformConfig {
    /// BitBucket configuration.
    pub const BITBUCKET: Self = Self {
        platform: Platform::BitBucket,
        display_name: "BitBucket",
        prefix: "bb",
        storage_key: "bitbucket",
        field_paths: FieldPaths {
            issue_subject: "issue.title",
            opened_issue_url: "issue.links.html.href",
            commented_issue_url: "issue.links.html.href",
            project_url: "repository.links.html.href",
            comment_body: "comment.content.raw",
        },
    };

    /// GitLab configuration.
    pub const GITLAB: Self = Self {
        platform: Platform::GitLab,
        display_name: "GitLab",
        prefix: "gl",
        storage_key: "gitlab",
        field_paths: FieldPaths {
            issue_subject: "object_attributes.title",
            opened_issue_url: "object_attributes.url",
            commented_issue_url: "issue.iid",
            project_url: "repository.homepage",
            comment_body: "object_attributes.note",
        },
    };

    /// Rewrites `#<n>` references in text into links to this platform's
    /// issues under `project_url`.
    #[must_use]
    pub fn rewrite_references(&self, project_url: &str, text: Option<&str>) -> String {
        rewrite_references(self.display_name, project_url, text)
    }
}
