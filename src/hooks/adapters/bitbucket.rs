//! BitBucket Cloud webhook payloads.
//!
//! Pushes nest commits under `push.changes[].commits[]`; the acting user of
//! every event sits under `actor.user`.

use serde::Deserialize;
use serde_json::Value;

use super::{nullable, scalar_text};
use crate::hooks::domain::{
    Actor, CommitInfo, HookEvent, HookEventKind, IssueCommentEvent, IssueOpenedEvent, PushEvent,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Href {
    href: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Links {
    #[serde(deserialize_with = "nullable")]
    html: Href,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct User {
    uuid: Option<String>,
    username: Option<String>,
    #[serde(deserialize_with = "nullable")]
    links: Links,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ActorField {
    #[serde(deserialize_with = "nullable")]
    user: User,
}

impl ActorField {
    fn into_actor(self) -> Actor {
        Actor {
            external_id: self.user.uuid,
            name: self.user.username,
            profile_url: self.user.links.html.href,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Repository {
    #[serde(deserialize_with = "nullable")]
    links: Links,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Content {
    raw: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Issue {
    id: Option<Value>,
    title: Option<String>,
    #[serde(deserialize_with = "nullable")]
    content: Content,
    #[serde(deserialize_with = "nullable")]
    links: Links,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Comment {
    #[serde(deserialize_with = "nullable")]
    content: Content,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Commit {
    #[serde(alias = "hash")]
    id: Option<String>,
    url: Option<String>,
    message: Option<String>,
    #[serde(deserialize_with = "nullable")]
    links: Links,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Change {
    #[serde(deserialize_with = "nullable")]
    commits: Vec<Commit>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Push {
    #[serde(deserialize_with = "nullable")]
    changes: Vec<Option<Change>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PushPayload {
    #[serde(deserialize_with = "nullable")]
    push: Push,
    #[serde(deserialize_with = "nullable")]
    actor: ActorField,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IssuePayload {
    #[serde(deserialize_with = "nullable")]
    issue: Issue,
    #[serde(deserialize_with = "nullable")]
    comment: Comment,
    #[serde(deserialize_with = "nullable")]
    actor: ActorField,
    #[serde(deserialize_with = "nullable")]
    repository: Repository,
}

/// Parses a BitBucket delivery into a normalized event.
///
/// A `null` push payload yields `Ok(None)`; `null` issue payloads parse as
/// empty events so that required-field checks report them.
///
/// # Errors
///
/// Returns the deserializer error when a consumed field has the wrong type.
pub fn parse_event(
    kind: HookEventKind,
    payload: &Value,
) -> Result<Option<HookEvent>, serde_json::Error> {
    let event = match kind {
        HookEventKind::Push => {
            let Some(parsed) = Option::<PushPayload>::deserialize(payload)? else {
                return Ok(None);
            };
            HookEvent::Push(push_event(parsed))
        }
        HookEventKind::IssueOpened => {
            let parsed = Option::<IssuePayload>::deserialize(payload)?.unwrap_or_default();
            HookEvent::IssueOpened(issue_opened_event(parsed))
        }
        HookEventKind::IssueComment => {
            let parsed = Option::<IssuePayload>::deserialize(payload)?.unwrap_or_default();
            HookEvent::IssueComment(issue_comment_event(parsed))
        }
    };
    Ok(Some(event))
}

fn push_event(payload: PushPayload) -> PushEvent {
    let author = payload.actor.into_actor();
    let commits = payload
        .push
        .changes
        .into_iter()
        .flatten()
        .flat_map(|change| change.commits)
        .map(|commit| CommitInfo {
            id: commit.id,
            url: commit.url.or(commit.links.html.href),
            message: commit.message,
            author: author.clone(),
        })
        .collect();
    PushEvent { commits }
}

fn issue_opened_event(payload: IssuePayload) -> IssueOpenedEvent {
    let issue_url = payload.issue.links.html.href;
    IssueOpenedEvent {
        number: scalar_text(payload.issue.id.as_ref()),
        subject: payload.issue.title,
        description: payload.issue.content.raw,
        platform_url: issue_url.clone(),
        issue_url,
        project_url: payload.repository.links.html.href,
        actor: payload.actor.into_actor(),
    }
}

fn issue_comment_event(payload: IssuePayload) -> IssueCommentEvent {
    IssueCommentEvent {
        number: scalar_text(payload.issue.id.as_ref()),
        subject: payload.issue.title,
        body: payload.comment.content.raw,
        issue_url: payload.issue.links.html.href,
        project_url: payload.repository.links.html.href,
        actor: payload.actor.into_actor(),
    }
}
