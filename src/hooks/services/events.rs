//! Event hook service: routes deliveries to the push, issue-opened and
//! issue-comment handlers.

use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;

use crate::hooks::{
    adapters,
    config::HookConfig,
    domain::{
        CommitInfo, HookEvent, HookEventKind, IssueCommentEvent, IssueOpenedEvent, Platform,
        PlatformConfig, PushEvent, StatusDirective, parse_status_directives,
    },
    services::{
        CommentRenderer, HookError, HookResult, IssueFields, StatusChangeFields, StatusResolver,
    },
};
use crate::tracker::{
    domain::{ExternalReference, ItemKind, NewIssue, Project, TrackedItem, User},
    ports::{
        ExternalUserDirectory, HistoryService, NotificationService, StatusCatalog,
        TrackedItemRepository,
    },
};

/// Webhook orchestration service.
///
/// Each call processes one delivery end to end, awaiting collaborators in
/// sequence. Collaborator failures propagate unchanged; nothing is retried.
#[derive(Clone)]
pub struct EventHookService<S, H, N, U>
where
    S: TrackedItemRepository + StatusCatalog,
    H: HistoryService,
    N: NotificationService,
    U: ExternalUserDirectory,
{
    store: Arc<S>,
    history: Arc<H>,
    notifier: Arc<N>,
    users: Arc<U>,
    statuses: StatusResolver<S>,
    config: HookConfig,
}

impl<S, H, N, U> EventHookService<S, H, N, U>
where
    S: TrackedItemRepository + StatusCatalog,
    H: HistoryService,
    N: NotificationService,
    U: ExternalUserDirectory,
{
    /// Creates a service with the default [`HookConfig`].
    #[must_use]
    pub fn new(store: Arc<S>, history: Arc<H>, notifier: Arc<N>, users: Arc<U>) -> Self {
        Self {
            statuses: StatusResolver::new(Arc::clone(&store)),
            store,
            history,
            notifier,
            users,
            config: HookConfig::default(),
        }
    }

    /// Replaces the service configuration.
    #[must_use]
    pub fn with_config(mut self, config: HookConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &HookConfig {
        &self.config
    }

    /// Parses a raw delivery and runs the matching handler.
    ///
    /// Deliveries discarded by the platform's filters complete successfully
    /// without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::MalformedPayload`] when the payload does not fit
    /// the platform schema, or any error of the invoked handler.
    pub async fn process_event(
        &self,
        project: &Project,
        platform: Platform,
        kind: HookEventKind,
        payload: &Value,
    ) -> HookResult<()> {
        let span = tracing::info_span!(
            "webhook",
            platform = %platform,
            event = %kind,
            project = project.slug(),
        );
        async move {
            let parsed = adapters::parse_event(platform, kind, payload).map_err(|error| {
                HookError::MalformedPayload {
                    event: kind,
                    reason: error.to_string(),
                }
            })?;
            let Some(event) = parsed else {
                tracing::debug!("delivery ignored");
                return Ok(());
            };
            self.handle(project, platform.config(), event).await
        }
        .instrument(span)
        .await
    }

    /// Runs the handler for an already normalized event.
    ///
    /// # Errors
    ///
    /// Returns any error of the invoked handler.
    pub async fn handle(
        &self,
        project: &Project,
        platform: &'static PlatformConfig,
        event: HookEvent,
    ) -> HookResult<()> {
        match event {
            HookEvent::Push(push) => self.process_push(project, platform, push).await,
            HookEvent::IssueOpened(issue) => {
                self.process_issue_opened(project, platform, issue)
                    .await
                    .map(|_| ())
            }
            HookEvent::IssueComment(comment) => self
                .process_issue_comment(platform, comment)
                .await
                .map(|_| ()),
        }
    }

    /// Applies every `TG-<ref> #<slug>` directive found in pushed commits.
    ///
    /// Commits without a message are skipped. Each applied directive records
    /// a commented snapshot attributed to the platform's unknown user and
    /// notifies watchers.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::ReferenceNotFound`] or
    /// [`HookError::StatusNotFound`] for the first directive that cannot be
    /// applied; directives before it stay applied.
    pub async fn process_push(
        &self,
        project: &Project,
        platform: &'static PlatformConfig,
        push: PushEvent,
    ) -> HookResult<()> {
        for commit in &push.commits {
            let Some(message) = commit.message.as_deref() else {
                continue;
            };
            for directive in parse_status_directives(message) {
                self.change_status(project, platform, commit, &directive)
                    .await?;
            }
        }
        Ok(())
    }

    async fn change_status(
        &self,
        project: &Project,
        platform: &'static PlatformConfig,
        commit: &CommitInfo,
        directive: &StatusDirective,
    ) -> HookResult<()> {
        let item_ref = directive
            .item_ref()
            .ok_or_else(|| HookError::ReferenceNotFound(directive.reference.clone()))?;
        let item = self
            .statuses
            .set_item_status(project.id(), item_ref, &directive.status)
            .await?;

        let short_id = commit
            .id
            .as_deref()
            .map(|id| id.chars().take(self.config.short_commit_len).collect::<String>());
        let renderer = CommentRenderer::new(platform, &self.config.templates);
        let comment = renderer.status_change(&StatusChangeFields {
            user_name: commit.author.name.as_deref(),
            user_url: commit.author.profile_url.as_deref(),
            commit_id: short_id.as_deref(),
            commit_url: commit.url.as_deref(),
            commit_message: commit.message.as_deref(),
        });

        let user = self
            .users
            .find_or_create_external_user(platform.storage_key, None)
            .await?;
        self.record(&item, Some(comment.as_str()), &user).await?;
        tracing::info!(
            kind = %item.kind(),
            item_ref = %item.item_ref(),
            status = %directive.status,
            "status changed from commit"
        );
        Ok(())
    }

    /// Mirrors an externally opened issue as a local issue.
    ///
    /// Required fields are checked before any collaborator is called.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidPayload`] when the subject, issue URL or
    /// project URL is missing, or a collaborator error.
    pub async fn process_issue_opened(
        &self,
        project: &Project,
        platform: &'static PlatformConfig,
        event: IssueOpenedEvent,
    ) -> HookResult<TrackedItem> {
        let issue = event.require(&platform.field_paths)?;
        let description =
            platform.rewrite_references(&issue.project_url, Some(issue.description.as_str()));
        let reference = ExternalReference::new(platform.storage_key, issue.issue_url.as_str())?;

        let user = self
            .users
            .find_or_create_external_user(platform.storage_key, issue.actor.external_id.as_deref())
            .await?;
        let created = self
            .store
            .create_issue(NewIssue::with_project_defaults(
                project,
                issue.subject.as_str(),
                description.as_str(),
                reference,
                user.id(),
            ))
            .await?;
        self.history.take_snapshot(&created, None, &user).await?;

        let renderer = CommentRenderer::new(platform, &self.config.templates);
        let comment = renderer.new_issue(
            &IssueFields {
                user_name: issue.actor.name.as_deref(),
                user_url: issue.actor.profile_url.as_deref(),
                number: issue.number.as_deref(),
                subject: Some(issue.subject.as_str()),
                platform_url: issue.platform_url.as_deref(),
            },
            Some(description.as_str()),
        );
        self.record(&created, Some(comment.as_str()), &user).await?;
        tracing::info!(item_ref = %created.item_ref(), "issue created from platform");
        Ok(created)
    }

    /// Appends a mirrored comment to every item linked to the commented
    /// external issue.
    ///
    /// Items of all kinds are matched on `(platform, issue URL)` regardless
    /// of project. Returns the items that received the comment.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidPayload`] when the comment body, issue
    /// URL or project URL is missing, or a collaborator error.
    pub async fn process_issue_comment(
        &self,
        platform: &'static PlatformConfig,
        event: IssueCommentEvent,
    ) -> HookResult<Vec<TrackedItem>> {
        let posted = event.require(&platform.field_paths)?;
        let body = platform.rewrite_references(&posted.project_url, Some(posted.body.as_str()));
        let reference = ExternalReference::new(platform.storage_key, posted.issue_url.as_str())?;

        let user = self
            .users
            .find_or_create_external_user(platform.storage_key, posted.actor.external_id.as_deref())
            .await?;
        let mut items = Vec::new();
        for kind in ItemKind::RESOLUTION_ORDER {
            items.extend(self.store.find_by_external_reference(kind, &reference).await?);
        }

        let renderer = CommentRenderer::new(platform, &self.config.templates);
        let comment = renderer.issue_comment(
            &IssueFields {
                user_name: posted.actor.name.as_deref(),
                user_url: posted.actor.profile_url.as_deref(),
                number: posted.number.as_deref(),
                subject: posted.subject.as_deref(),
                platform_url: Some(posted.issue_url.as_str()),
            },
            Some(body.as_str()),
        );
        for item in &items {
            self.record(item, Some(comment.as_str()), &user).await?;
        }
        tracing::info!(
            matched = items.len(),
            reference = %reference,
            "comment mirrored from platform"
        );
        Ok(items)
    }

    /// Takes a snapshot of `item` and notifies its watchers.
    async fn record(&self, item: &TrackedItem, comment: Option<&str>, user: &User) -> HookResult<()> {
        let snapshot = self.history.take_snapshot(item, comment, user).await?;
        self.notifier.send_notifications(item, &snapshot).await?;
        Ok(())
    }
}
