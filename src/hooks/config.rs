//! Tunables for webhook processing.
//!
//! Hosts deserialize [`HookConfig`] from their own configuration source or
//! rely on [`HookConfig::default`]. Templates use `minijinja` syntax; the
//! variables available to each template are listed on its field.

use serde::{Deserialize, Serialize};

/// Default number of characters kept from commit hashes in comments.
pub const DEFAULT_SHORT_COMMIT_LEN: usize = 7;

/// Configuration for the event hook service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Comment templates.
    pub templates: CommentTemplates,
    /// Characters kept from commit hashes in status-change comments.
    pub short_commit_len: usize,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            templates: CommentTemplates::default(),
            short_commit_len: DEFAULT_SHORT_COMMIT_LEN,
        }
    }
}

/// Full and degraded templates for the three comment shapes.
///
/// Every template receives `platform` and `platform_prefix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentTemplates {
    /// Status change; uses `user_name`, `user_url`, `commit_id`,
    /// `commit_url` and `commit_message`.
    pub status_change: String,
    /// Status change when any commit or author field is missing.
    pub status_change_fallback: String,
    /// New issue; uses `user_name`, `user_url`, `number`, `subject`,
    /// `platform_url` and `description`.
    pub new_issue: String,
    /// New issue when any issue or author field is missing.
    pub new_issue_fallback: String,
    /// Issue comment; uses `user_name`, `user_url`, `number`, `subject`,
    /// `platform_url` and `message`.
    pub issue_comment: String,
    /// Issue comment when any issue or author field is missing; uses
    /// `message`.
    pub issue_comment_fallback: String,
}

impl Default for CommentTemplates {
    fn default() -> Self {
        Self {
            status_change: concat!(
                "Status changed by [@{{ user_name }}]({{ user_url }} ",
                "\"See @{{ user_name }}'s {{ platform }} profile\") ",
                "from {{ platform }} commit [{{ commit_id }}]({{ commit_url }} ",
                "\"See commit '{{ commit_id }} - {{ commit_message }}'\")."
            )
            .to_owned(),
            status_change_fallback: "Status changed from {{ platform }} commit.".to_owned(),
            new_issue: concat!(
                "Issue created by [@{{ user_name }}]({{ user_url }} ",
                "\"See @{{ user_name }}'s {{ platform }} profile\") ",
                "from {{ platform }}.\nOrigin {{ platform }} issue: ",
                "[{{ platform_prefix }}#{{ number }} - {{ subject }}]({{ platform_url }} ",
                "\"Go to '{{ platform_prefix }}#{{ number }} - {{ subject }}'\"):\n\n",
                "{{ description }}"
            )
            .to_owned(),
            new_issue_fallback: "Issue created from {{ platform }}.".to_owned(),
            issue_comment: concat!(
                "Comment by [@{{ user_name }}]({{ user_url }} ",
                "\"See @{{ user_name }}'s {{ platform }} profile\") ",
                "from {{ platform }}.\nOrigin {{ platform }} issue: ",
                "[{{ platform_prefix }}#{{ number }} - {{ subject }}]({{ platform_url }} ",
                "\"Go to '{{ platform_prefix }}#{{ number }} - {{ subject }}'\")\n\n",
                "{{ message }}"
            )
            .to_owned(),
            issue_comment_fallback: "Comment From {{ platform }}:\n\n{{ message }}".to_owned(),
        }
    }
}
