//! BitBucket deliveries processed end to end.

use super::helpers::{Deployment, deployment};
use eyre::{Result, ensure};
use rstest::rstest;
use serde_json::{Value, json};
use taiga_hooks::hooks::domain::{HookEventKind, Platform};
use taiga_hooks::tracker::domain::ItemKind;

const ISSUE_URL: &str = "https://bitbucket.org/acme/widgets/issues/4";

fn actor() -> Value {
    json!({
        "user": {
            "uuid": "{5f1c}",
            "username": "jdoe",
            "links": {"html": {"href": "https://bitbucket.org/jdoe/"}}
        }
    })
}

fn repository() -> Value {
    json!({"links": {"html": {"href": "https://bitbucket.org/acme/widgets"}}})
}

fn issue() -> Value {
    json!({
        "id": 4,
        "title": "Widget crashes",
        "content": {"raw": "Started after #2 was merged"},
        "links": {"html": {"href": ISSUE_URL}}
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn push_closes_referenced_task(deployment: Deployment) -> Result<()> {
    let task = deployment.seed(ItemKind::Task, 12, None);
    let payload = json!({
        "actor": actor(),
        "repository": repository(),
        "push": {"changes": [{
            "commits": [{
                "hash": "9f8e7d6c5b4a",
                "message": "Handle empty widgets\n\nTG-12 #closed\n",
                "links": {"html": {"href": "https://bitbucket.org/acme/widgets/commits/9f8e7d6c5b4a"}}
            }]
        }]}
    });

    deployment
        .service
        .process_event(&deployment.project, Platform::BitBucket, HookEventKind::Push, &payload)
        .await?;

    ensure!(deployment.status_of(&task) == "closed");
    let comments = deployment.comments_of(&task);
    let comment = comments.first().cloned().flatten().unwrap_or_default();
    ensure!(
        comment.starts_with(
            "Status changed by [@jdoe](https://bitbucket.org/jdoe/ \"See @jdoe's BitBucket profile\")"
        ),
        "{comment}"
    );
    ensure!(
        comment.contains(
            "[9f8e7d6](https://bitbucket.org/acme/widgets/commits/9f8e7d6c5b4a \"See commit '9f8e7d6 - "
        ),
        "{comment}"
    );
    ensure!(deployment.notifier.sent()?.len() == 1);
    ensure!(
        deployment.users.lookups()? == vec![("bitbucket".to_owned(), None)],
        "pushes are attributed to the platform's unknown user"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn null_push_is_ignored(deployment: Deployment) -> Result<()> {
    deployment
        .service
        .process_event(
            &deployment.project,
            Platform::BitBucket,
            HookEventKind::Push,
            &Value::Null,
        )
        .await?;

    ensure!(deployment.snapshots().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn issue_created_is_mirrored(deployment: Deployment) -> Result<()> {
    let payload = json!({
        "actor": actor(),
        "repository": repository(),
        "issue": issue()
    });

    deployment
        .service
        .process_event(
            &deployment.project,
            Platform::BitBucket,
            HookEventKind::IssueOpened,
            &payload,
        )
        .await?;

    let issues = deployment.store.items_of_kind(ItemKind::Issue)?;
    let [created] = issues.as_slice() else {
        eyre::bail!("expected one mirrored issue, got {}", issues.len());
    };
    ensure!(created.subject() == "Widget crashes");
    ensure!(
        created.description()
            == "Started after [BitBucket#2](https://bitbucket.org/acme/widgets/issues/2) was merged"
    );
    ensure!(created.external_reference().map(|r| r.url()) == Some(ISSUE_URL));
    ensure!(created.classification().map(|c| c.priority.as_str()) == Some("High"));

    let owner = deployment
        .users
        .lookups()?
        .into_iter()
        .next()
        .ok_or_else(|| eyre::eyre!("no user resolved"))?;
    ensure!(owner == ("bitbucket".to_owned(), Some("{5f1c}".to_owned())));

    let comments = deployment.comments_of(created);
    ensure!(comments.len() == 2);
    ensure!(comments.first() == Some(&None));
    let comment = comments.last().cloned().flatten().unwrap_or_default();
    ensure!(
        comment.contains(&format!(
            "Origin BitBucket issue: [bb#4 - Widget crashes]({ISSUE_URL} \"Go to 'bb#4 - Widget crashes'\"):"
        )),
        "{comment}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn issue_without_title_is_rejected(deployment: Deployment) -> Result<()> {
    let payload = json!({
        "actor": actor(),
        "repository": repository(),
        "issue": {"id": 4, "links": {"html": {"href": ISSUE_URL}}}
    });

    let result = deployment
        .service
        .process_event(
            &deployment.project,
            Platform::BitBucket,
            HookEventKind::IssueOpened,
            &payload,
        )
        .await;

    let error = result.err().ok_or_else(|| eyre::eyre!("expected a rejection"))?;
    ensure!(error.is_client_error());
    ensure!(
        error.to_string() == "invalid issue_opened payload, missing: issue.title",
        "{error}"
    );
    ensure!(deployment.store.items_of_kind(ItemKind::Issue)?.is_empty());
    ensure!(deployment.snapshots().is_empty());
    ensure!(deployment.users.lookups()?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comment_is_mirrored_to_linked_items(deployment: Deployment) -> Result<()> {
    let linked_issue = deployment.seed(ItemKind::Issue, 1, Some(("bitbucket", ISSUE_URL)));
    let linked_story = deployment.seed(ItemKind::UserStory, 2, Some(("bitbucket", ISSUE_URL)));
    let unrelated = deployment.seed(ItemKind::Task, 3, None);
    let payload = json!({
        "actor": actor(),
        "repository": repository(),
        "issue": issue(),
        "comment": {"content": {"raw": "Duplicate of #1"}}
    });

    deployment
        .service
        .process_event(
            &deployment.project,
            Platform::BitBucket,
            HookEventKind::IssueComment,
            &payload,
        )
        .await?;

    let issue_comments = deployment.comments_of(&linked_issue);
    ensure!(issue_comments == deployment.comments_of(&linked_story));
    ensure!(deployment.comments_of(&unrelated).is_empty());
    let comment = issue_comments.first().cloned().flatten().unwrap_or_default();
    ensure!(
        comment.ends_with(
            "\n\nDuplicate of [BitBucket#1](https://bitbucket.org/acme/widgets/issues/1)"
        ),
        "{comment}"
    );
    ensure!(deployment.notifier.sent()?.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comment_without_author_uses_fallback(deployment: Deployment) -> Result<()> {
    let linked = deployment.seed(ItemKind::Task, 5, Some(("bitbucket", ISSUE_URL)));
    let payload = json!({
        "actor": null,
        "repository": repository(),
        "issue": issue(),
        "comment": {"content": {"raw": "ping"}}
    });

    deployment
        .service
        .process_event(
            &deployment.project,
            Platform::BitBucket,
            HookEventKind::IssueComment,
            &payload,
        )
        .await?;

    ensure!(
        deployment.comments_of(&linked)
            == vec![Some("Comment From BitBucket:\n\nping".to_owned())]
    );
    ensure!(deployment.users.lookups()? == vec![("bitbucket".to_owned(), None)]);
    Ok(())
}
