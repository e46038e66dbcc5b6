//! When steps for webhook delivery BDD scenarios.

use super::world::{WebhookWorld, homepage, issue_url, run_async};
use rstest_bdd_macros::when;
use serde_json::{Value, json};
use taiga_hooks::hooks::domain::{HookEventKind, Platform};

const ISSUE_NUMBER: u64 = 21;

fn deliver(
    world: &mut WebhookWorld,
    platform: Platform,
    kind: HookEventKind,
    payload: &Value,
) {
    let result = run_async(
        world
            .service
            .process_event(&world.project, platform, kind, payload),
    );
    world.last_result = Some(result);
}

fn push_payload(platform: Platform, message: &str) -> Value {
    let commit_url = format!("{}/commit/5d2c1b0a9f8e", homepage(platform));
    match platform {
        Platform::BitBucket => json!({
            "actor": {"user": {"username": "jdoe", "links": {"html": {"href": "https://bitbucket.org/jdoe"}}}},
            "push": {"changes": [{"commits": [
                {"hash": "5d2c1b0a9f8e", "message": message, "links": {"html": {"href": commit_url}}}
            ]}]}
        }),
        Platform::GitLab => json!({
            "repository": {"homepage": homepage(platform)},
            "commits": [
                {"id": "5d2c1b0a9f8e", "message": message, "url": commit_url, "author": {"name": "jdoe"}}
            ]
        }),
    }
}

fn issue_payload(platform: Platform, title: Option<&str>) -> Value {
    let url = issue_url(platform, ISSUE_NUMBER);
    match platform {
        Platform::BitBucket => json!({
            "actor": {"user": {"uuid": "{77}", "username": "jdoe"}},
            "repository": {"links": {"html": {"href": homepage(platform)}}},
            "issue": {
                "id": ISSUE_NUMBER,
                "title": title,
                "content": {"raw": "Reported by QA"},
                "links": {"html": {"href": url}}
            }
        }),
        Platform::GitLab => json!({
            "user": {"username": "jdoe"},
            "repository": {"homepage": homepage(platform)},
            "object_attributes": {
                "action": "open",
                "iid": ISSUE_NUMBER,
                "title": title,
                "description": "Reported by QA",
                "url": url
            }
        }),
    }
}

fn comment_payload(platform: Platform, body: &str, number: u64) -> Value {
    match platform {
        Platform::BitBucket => json!({
            "actor": {"user": {"uuid": "{77}", "username": "jdoe"}},
            "repository": {"links": {"html": {"href": homepage(platform)}}},
            "issue": {"id": number, "title": "Widget crashes", "links": {"html": {"href": issue_url(platform, number)}}},
            "comment": {"content": {"raw": body}}
        }),
        Platform::GitLab => json!({
            "user": {"username": "jdoe"},
            "repository": {"homepage": homepage(platform)},
            "object_attributes": {"noteable_type": "Issue", "note": body},
            "issue": {"iid": number, "title": "Widget crashes"}
        }),
    }
}

#[when(r#""{platform}" delivers a push with commit message "{message}""#)]
fn delivers_push(
    world: &mut WebhookWorld,
    platform: String,
    message: String,
) -> Result<(), eyre::Report> {
    let source = Platform::try_from(platform.as_str())?;
    deliver(world, source, HookEventKind::Push, &push_payload(source, &message));
    Ok(())
}

#[when(r#""{platform}" delivers an opened issue titled "{title}""#)]
fn delivers_opened_issue(
    world: &mut WebhookWorld,
    platform: String,
    title: String,
) -> Result<(), eyre::Report> {
    let source = Platform::try_from(platform.as_str())?;
    world.delivered_issue_url = Some(issue_url(source, ISSUE_NUMBER));
    deliver(
        world,
        source,
        HookEventKind::IssueOpened,
        &issue_payload(source, Some(&title)),
    );
    Ok(())
}

#[when(r#""{platform}" delivers an opened issue without a title"#)]
fn delivers_untitled_issue(world: &mut WebhookWorld, platform: String) -> Result<(), eyre::Report> {
    let source = Platform::try_from(platform.as_str())?;
    deliver(
        world,
        source,
        HookEventKind::IssueOpened,
        &issue_payload(source, None),
    );
    Ok(())
}

#[when(r#""{platform}" delivers a comment "{body}" on issue {number:u64}"#)]
fn delivers_comment(
    world: &mut WebhookWorld,
    platform: String,
    body: String,
    number: u64,
) -> Result<(), eyre::Report> {
    let source = Platform::try_from(platform.as_str())?;
    deliver(
        world,
        source,
        HookEventKind::IssueComment,
        &comment_payload(source, &body, number),
    );
    Ok(())
}
