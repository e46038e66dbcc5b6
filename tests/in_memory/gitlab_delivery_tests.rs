//! GitLab deliveries processed end to end.

use super::helpers::{Deployment, deployment};
use eyre::{Result, bail, ensure};
use rstest::rstest;
use serde_json::{Value, json};
use taiga_hooks::hooks::domain::{HookEventKind, Platform};
use taiga_hooks::tracker::domain::ItemKind;

const HOMEPAGE: &str = "https://gitlab.com/acme/widgets";
const ISSUE_URL: &str = "https://gitlab.com/acme/widgets/issues/15";

fn issue_hook(action: &str) -> Value {
    json!({
        "object_kind": "issue",
        "user": {"name": "Jane Roe", "username": "jroe"},
        "repository": {"name": "widgets", "homepage": HOMEPAGE},
        "object_attributes": {
            "iid": 15,
            "title": "Export fails",
            "description": "Regression of #9",
            "url": ISSUE_URL,
            "action": action
        }
    })
}

fn note_hook(noteable_type: &str, note: &str) -> Value {
    json!({
        "object_kind": "note",
        "user": {"name": "Jane Roe", "username": "jroe"},
        "repository": {"name": "widgets", "homepage": HOMEPAGE},
        "object_attributes": {"note": note, "noteable_type": noteable_type},
        "issue": {"iid": 15, "title": "Export fails"}
    })
}

async fn deliver(deployment: &Deployment, kind: HookEventKind, payload: &Value) -> Result<()> {
    deployment
        .service
        .process_event(&deployment.project, Platform::GitLab, kind, payload)
        .await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn push_applies_every_directive(deployment: Deployment) -> Result<()> {
    let issue = deployment.seed(ItemKind::Issue, 7, None);
    let task = deployment.seed(ItemKind::Task, 7, None);
    let story = deployment.seed(ItemKind::UserStory, 8, None);
    let payload = json!({
        "object_kind": "push",
        "repository": {"homepage": HOMEPAGE},
        "commits": [
            {
                "id": "b6568db1bc1dcd7f8b4d5a946b0b91f9dacd7327",
                "message": "Start export work TG-7 #in-progress",
                "url": "https://gitlab.com/acme/widgets/commit/b6568db1",
                "author": {"name": "jroe", "email": "jroe@example.com"}
            },
            {
                "id": "da1560886d4f094c3e6c9ef40349f7d38b5d27d7",
                "message": "Ship it TG-8 #closed tg-7 #closed",
                "url": "https://gitlab.com/acme/widgets/commit/da156088",
                "author": {"name": "jroe", "email": "jroe@example.com"}
            }
        ]
    });

    deliver(&deployment, HookEventKind::Push, &payload).await?;

    ensure!(deployment.status_of(&issue) == "closed");
    ensure!(deployment.status_of(&task) == "new");
    ensure!(deployment.status_of(&story) == "closed");
    let issue_comments = deployment.comments_of(&issue);
    ensure!(issue_comments.len() == 2);
    let first = issue_comments.first().cloned().flatten().unwrap_or_default();
    ensure!(
        first
            == concat!(
                "Status changed by [@jroe](https://gitlab.com/u/jroe ",
                "\"See @jroe's GitLab profile\") from GitLab commit ",
                "[b6568db](https://gitlab.com/acme/widgets/commit/b6568db1 ",
                "\"See commit 'b6568db - Start export work TG-7 #in-progress'\")."
            ),
        "{first}"
    );
    ensure!(deployment.notifier.sent()?.len() == 3);
    Ok(())
}

#[rstest]
#[case::unassigned("TG-404 #closed", "404")]
#[case::zero("TG-0 #closed", "0")]
#[tokio::test(flavor = "multi_thread")]
async fn push_with_unknown_reference_fails(
    deployment: Deployment,
    #[case] message: &str,
    #[case] reference: &str,
) -> Result<()> {
    let payload = json!({
        "repository": {"homepage": HOMEPAGE},
        "commits": [{"id": "abc", "message": message}]
    });

    let result = deployment
        .service
        .process_event(&deployment.project, Platform::GitLab, HookEventKind::Push, &payload)
        .await;

    let Err(error) = result else {
        bail!("expected the push to fail");
    };
    ensure!(
        error.to_string() == format!("the referenced element #{reference} doesn't exist"),
        "{error}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn opened_issue_is_mirrored(deployment: Deployment) -> Result<()> {
    deliver(&deployment, HookEventKind::IssueOpened, &issue_hook("open")).await?;

    let issues = deployment.store.items_of_kind(ItemKind::Issue)?;
    let [created] = issues.as_slice() else {
        bail!("expected one mirrored issue, got {}", issues.len());
    };
    ensure!(created.subject() == "Export fails");
    ensure!(
        created.description() == "Regression of [GitLab#9](https://gitlab.com/acme/widgets/issues/9)"
    );
    ensure!(
        created.external_reference().map(ToString::to_string)
            == Some(format!("gitlab:{ISSUE_URL}"))
    );
    let comment = deployment
        .comments_of(created)
        .last()
        .cloned()
        .flatten()
        .unwrap_or_default();
    ensure!(
        comment
            == concat!(
                "Issue created by [@jroe](https://gitlab.com/u/jroe ",
                "\"See @jroe's GitLab profile\") from GitLab.\n",
                "Origin GitLab issue: [gl#15 - Export fails](https://gitlab.com/acme/widgets/issues/15 ",
                "\"Go to 'gl#15 - Export fails'\"):\n\n",
                "Regression of [GitLab#9](https://gitlab.com/acme/widgets/issues/9)"
            ),
        "{comment}"
    );
    ensure!(deployment.users.lookups()? == vec![("gitlab".to_owned(), None)]);
    Ok(())
}

#[rstest]
#[case("close")]
#[case("reopen")]
#[case("update")]
#[tokio::test(flavor = "multi_thread")]
async fn other_issue_actions_are_ignored(
    deployment: Deployment,
    #[case] action: &str,
) -> Result<()> {
    deliver(&deployment, HookEventKind::IssueOpened, &issue_hook(action)).await?;

    ensure!(deployment.store.items_of_kind(ItemKind::Issue)?.is_empty());
    ensure!(deployment.snapshots().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn issue_note_reaches_issue_and_task(deployment: Deployment) -> Result<()> {
    let issue = deployment.seed(ItemKind::Issue, 1, Some(("gitlab", ISSUE_URL)));
    let task = deployment.seed(ItemKind::Task, 2, Some(("gitlab", ISSUE_URL)));

    deliver(
        &deployment,
        HookEventKind::IssueComment,
        &note_hook("Issue", "Fixed by #16"),
    )
    .await?;

    let snapshots = deployment.snapshots();
    ensure!(snapshots.len() == 2);
    ensure!(deployment.comments_of(&issue) == deployment.comments_of(&task));
    let comment = deployment
        .comments_of(&issue)
        .first()
        .cloned()
        .flatten()
        .unwrap_or_default();
    ensure!(
        comment
            == concat!(
                "Comment by [@jroe](https://gitlab.com/u/jroe ",
                "\"See @jroe's GitLab profile\") from GitLab.\n",
                "Origin GitLab issue: [gl#15 - Export fails](https://gitlab.com/acme/widgets/issues/15 ",
                "\"Go to 'gl#15 - Export fails'\")\n\n",
                "Fixed by [GitLab#16](https://gitlab.com/acme/widgets/issues/16)"
            ),
        "{comment}"
    );
    ensure!(deployment.notifier.sent()?.len() == 2);
    Ok(())
}

#[rstest]
#[case("MergeRequest")]
#[case("Snippet")]
#[tokio::test(flavor = "multi_thread")]
async fn notes_on_other_targets_are_ignored(
    deployment: Deployment,
    #[case] noteable_type: &str,
) -> Result<()> {
    deployment.seed(ItemKind::Issue, 1, Some(("gitlab", ISSUE_URL)));

    deliver(
        &deployment,
        HookEventKind::IssueComment,
        &note_hook(noteable_type, "lgtm"),
    )
    .await?;

    ensure!(deployment.snapshots().is_empty());
    ensure!(deployment.users.lookups()?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn note_without_body_is_rejected(deployment: Deployment) -> Result<()> {
    let payload = json!({
        "repository": {"homepage": HOMEPAGE},
        "object_attributes": {"noteable_type": "Issue"},
        "issue": {"iid": 15}
    });

    let result = deployment
        .service
        .process_event(
            &deployment.project,
            Platform::GitLab,
            HookEventKind::IssueComment,
            &payload,
        )
        .await;

    let Err(error) = result else {
        bail!("expected the note to be rejected");
    };
    ensure!(
        error.to_string() == "invalid issue_comment payload, missing: object_attributes.note",
        "{error}"
    );
    Ok(())
}
