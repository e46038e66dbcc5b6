//! Delivery routing and payload rejection.

use super::helpers::{Deployment, deployment};
use eyre::{Result, bail, ensure};
use rstest::rstest;
use serde_json::json;
use taiga_hooks::hooks::{
    domain::{HookEventKind, Platform, UnknownPlatform},
    services::HookError,
};

#[rstest]
#[case(Platform::BitBucket, "repo:push", Some(HookEventKind::Push))]
#[case(Platform::BitBucket, "issue:created", Some(HookEventKind::IssueOpened))]
#[case(Platform::BitBucket, "issue:comment_created", Some(HookEventKind::IssueComment))]
#[case(Platform::BitBucket, "pullrequest:created", None)]
#[case(Platform::BitBucket, "Push Hook", None)]
#[case(Platform::GitLab, "Push Hook", Some(HookEventKind::Push))]
#[case(Platform::GitLab, "Issue Hook", Some(HookEventKind::IssueOpened))]
#[case(Platform::GitLab, "Note Hook", Some(HookEventKind::IssueComment))]
#[case(Platform::GitLab, "Merge Request Hook", None)]
fn event_headers_map_to_kinds(
    #[case] platform: Platform,
    #[case] header: &str,
    #[case] expected: Option<HookEventKind>,
) {
    assert_eq!(platform.event_kind_from_header(header), expected);
}

#[rstest]
#[case("bitbucket", Platform::BitBucket)]
#[case("GitLab", Platform::GitLab)]
fn platforms_parse_from_names(#[case] name: &str, #[case] expected: Platform) {
    assert_eq!(Platform::try_from(name), Ok(expected));
    assert_eq!(expected.to_string(), name.to_ascii_lowercase());
}

#[rstest]
fn unknown_platform_is_rejected() {
    assert_eq!(
        Platform::try_from("github"),
        Err(UnknownPlatform("github".to_owned()))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrongly_typed_payload_is_malformed(deployment: Deployment) -> Result<()> {
    let payload = json!({"commits": "not a list"});

    let result = deployment
        .service
        .process_event(&deployment.project, Platform::GitLab, HookEventKind::Push, &payload)
        .await;

    let Err(error) = result else {
        bail!("expected a malformed payload error");
    };
    ensure!(matches!(
        error,
        HookError::MalformedPayload {
            event: HookEventKind::Push,
            ..
        }
    ));
    ensure!(error.is_client_error());
    ensure!(deployment.snapshots().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn null_issue_payload_reports_every_required_field(deployment: Deployment) -> Result<()> {
    let result = deployment
        .service
        .process_event(
            &deployment.project,
            Platform::BitBucket,
            HookEventKind::IssueComment,
            &serde_json::Value::Null,
        )
        .await;

    let missing = match result {
        Err(HookError::InvalidPayload(missing)) => missing,
        other => bail!("expected an invalid payload error, got {other:?}"),
    };
    ensure!(
        missing.fields()
            == [
                "comment.content.raw",
                "issue.links.html.href",
                "repository.links.html.href"
            ]
    );
    Ok(())
}
