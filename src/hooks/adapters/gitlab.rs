//! GitLab webhook payloads.
//!
//! GitLab sends no stable actor identifier the host can map, and profile
//! URLs are derived from the repository homepage: two path segments up,
//! then `u/<username>`.

use serde::Deserialize;
use serde_json::Value;

use super::{join_url, nullable, scalar_text};
use crate::hooks::domain::{
    Actor, CommitInfo, HookEvent, HookEventKind, IssueCommentEvent, IssueOpenedEvent, PushEvent,
};

/// Issue action that triggers mirroring; other actions are ignored.
const OPEN_ACTION: &str = "open";

/// Note target type that triggers mirroring; other notes are ignored.
const ISSUE_NOTEABLE: &str = "Issue";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Repository {
    homepage: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Author {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Commit {
    id: Option<String>,
    url: Option<String>,
    message: Option<String>,
    #[serde(deserialize_with = "nullable")]
    author: Author,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PushPayload {
    #[serde(deserialize_with = "nullable")]
    commits: Vec<Commit>,
    #[serde(deserialize_with = "nullable")]
    repository: Repository,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ObjectAttributes {
    action: Option<String>,
    iid: Option<Value>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    noteable_type: Option<String>,
    note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Issue {
    iid: Option<Value>,
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct User {
    username: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EventPayload {
    #[serde(deserialize_with = "nullable")]
    object_attributes: ObjectAttributes,
    #[serde(deserialize_with = "nullable")]
    issue: Issue,
    #[serde(deserialize_with = "nullable")]
    repository: Repository,
    #[serde(deserialize_with = "nullable")]
    user: User,
}

/// Parses a GitLab delivery into a normalized event.
///
/// Issue events other than `open` and notes on anything but issues yield
/// `Ok(None)`, as does a `null` push payload.
///
/// # Errors
///
/// Returns the deserializer error when a consumed field has the wrong type.
pub fn parse_event(
    kind: HookEventKind,
    payload: &Value,
) -> Result<Option<HookEvent>, serde_json::Error> {
    match kind {
        HookEventKind::Push => {
            let parsed = Option::<PushPayload>::deserialize(payload)?;
            Ok(parsed.map(|push| HookEvent::Push(push_event(push))))
        }
        HookEventKind::IssueOpened => {
            let parsed = Option::<EventPayload>::deserialize(payload)?.unwrap_or_default();
            if parsed.object_attributes.action.as_deref() != Some(OPEN_ACTION) {
                return Ok(None);
            }
            Ok(Some(HookEvent::IssueOpened(issue_opened_event(parsed))))
        }
        HookEventKind::IssueComment => {
            let parsed = Option::<EventPayload>::deserialize(payload)?.unwrap_or_default();
            if parsed.object_attributes.noteable_type.as_deref() != Some(ISSUE_NOTEABLE) {
                return Ok(None);
            }
            Ok(Some(HookEvent::IssueComment(issue_comment_event(parsed))))
        }
    }
}

/// Derives a user's profile URL from a repository homepage.
///
/// `https://gitlab.com/group/project` and `jane` give
/// `https://gitlab.com/u/jane`.
#[must_use]
pub fn profile_url(homepage: &str, user_name: &str) -> String {
    let namespace = parent_path(homepage);
    join_url(parent_path(namespace), &["u", user_name])
}

fn parent_path(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit_once('/')
        .map_or("", |(head, _)| head)
}

fn actor(homepage: Option<&str>, user_name: Option<String>) -> Actor {
    let profile = homepage
        .zip(user_name.as_deref())
        .map(|(home, name)| profile_url(home, name));
    Actor {
        external_id: None,
        name: user_name,
        profile_url: profile,
    }
}

fn issue_url(homepage: Option<&str>, number: Option<&str>) -> Option<String> {
    homepage
        .zip(number)
        .map(|(home, iid)| join_url(home, &["issues", iid]))
}

fn push_event(payload: PushPayload) -> PushEvent {
    let homepage = payload.repository.homepage;
    let commits = payload
        .commits
        .into_iter()
        .map(|commit| CommitInfo {
            id: commit.id,
            url: commit.url,
            message: commit.message,
            author: actor(homepage.as_deref(), commit.author.name),
        })
        .collect();
    PushEvent { commits }
}

fn issue_opened_event(payload: EventPayload) -> IssueOpenedEvent {
    let attributes = payload.object_attributes;
    let homepage = payload.repository.homepage;
    let number = scalar_text(payload.issue.iid.as_ref().or(attributes.iid.as_ref()));
    IssueOpenedEvent {
        platform_url: issue_url(homepage.as_deref(), number.as_deref()),
        actor: actor(homepage.as_deref(), payload.user.username),
        number,
        subject: attributes.title,
        description: attributes.description,
        issue_url: attributes.url,
        project_url: homepage,
    }
}

fn issue_comment_event(payload: EventPayload) -> IssueCommentEvent {
    let homepage = payload.repository.homepage;
    let number = scalar_text(payload.issue.iid.as_ref());
    IssueCommentEvent {
        issue_url: issue_url(homepage.as_deref(), number.as_deref()),
        actor: actor(homepage.as_deref(), payload.user.username),
        number,
        subject: payload.issue.title,
        body: payload.object_attributes.note,
        project_url: homepage,
    }
}
