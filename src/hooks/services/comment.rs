//! Comment rendering for mirrored platform activity.
//!
//! Each comment shape has a full template and a degraded one. Presence of
//! every field the full template needs is checked before rendering; when a
//! field is missing the degraded template is used instead. Rendering never
//! fails: a template that still errors degrades further, down to fixed
//! built-in text.

use minijinja::{Environment, UndefinedBehavior};
use std::collections::BTreeMap;

use crate::hooks::{config::CommentTemplates, domain::PlatformConfig};

/// Template variable name paired with its value, if the payload had one.
type Field<'a> = (&'static str, Option<&'a str>);

/// Commit and author values for a status-change comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusChangeFields<'a> {
    /// Author handle.
    pub user_name: Option<&'a str>,
    /// Author profile URL.
    pub user_url: Option<&'a str>,
    /// Shortened commit hash.
    pub commit_id: Option<&'a str>,
    /// Commit page URL.
    pub commit_url: Option<&'a str>,
    /// Commit message.
    pub commit_message: Option<&'a str>,
}

/// Issue and author values shared by the new-issue and comment shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueFields<'a> {
    /// Author handle.
    pub user_name: Option<&'a str>,
    /// Author profile URL.
    pub user_url: Option<&'a str>,
    /// Platform issue number.
    pub number: Option<&'a str>,
    /// Issue title.
    pub subject: Option<&'a str>,
    /// Platform issue URL.
    pub platform_url: Option<&'a str>,
}

impl<'a> IssueFields<'a> {
    const fn fields(&self) -> [Field<'a>; 5] {
        [
            ("user_name", self.user_name),
            ("user_url", self.user_url),
            ("number", self.number),
            ("subject", self.subject),
            ("platform_url", self.platform_url),
        ]
    }
}

/// Renders the three comment shapes for one platform.
pub struct CommentRenderer<'t> {
    platform: &'static PlatformConfig,
    templates: &'t CommentTemplates,
    environment: Environment<'static>,
}

impl<'t> CommentRenderer<'t> {
    /// Creates a renderer for a platform with the given templates.
    #[must_use]
    pub fn new(platform: &'static PlatformConfig, templates: &'t CommentTemplates) -> Self {
        let mut environment = Environment::new();
        environment.set_undefined_behavior(UndefinedBehavior::Strict);
        Self {
            platform,
            templates,
            environment,
        }
    }

    /// Renders the comment attached to a commit-driven status change.
    #[must_use]
    pub fn status_change(&self, fields: &StatusChangeFields<'_>) -> String {
        let values = [
            ("user_name", fields.user_name),
            ("user_url", fields.user_url),
            ("commit_id", fields.commit_id),
            ("commit_url", fields.commit_url),
            ("commit_message", fields.commit_message),
        ];
        let platform = self.platform.display_name;
        self.render_or_degrade(
            &self.templates.status_change,
            &self.templates.status_change_fallback,
            &values,
            || format!("Status changed from {platform} commit."),
        )
    }

    /// Renders the comment recorded on an issue mirrored from the platform.
    #[must_use]
    pub fn new_issue(&self, fields: &IssueFields<'_>, description: Option<&str>) -> String {
        let [user_name, user_url, number, subject, platform_url] = fields.fields();
        let values = [
            user_name,
            user_url,
            number,
            subject,
            platform_url,
            ("description", description),
        ];
        let platform = self.platform.display_name;
        self.render_or_degrade(
            &self.templates.new_issue,
            &self.templates.new_issue_fallback,
            &values,
            || format!("Issue created from {platform}."),
        )
    }

    /// Renders the comment mirrored from a platform issue comment.
    #[must_use]
    pub fn issue_comment(&self, fields: &IssueFields<'_>, message: Option<&str>) -> String {
        let [user_name, user_url, number, subject, platform_url] = fields.fields();
        let values = [
            user_name,
            user_url,
            number,
            subject,
            platform_url,
            ("message", message),
        ];
        let platform = self.platform.display_name;
        let body = message.unwrap_or_default();
        self.render_or_degrade(
            &self.templates.issue_comment,
            &self.templates.issue_comment_fallback,
            &values,
            || format!("Comment From {platform}:\n\n{body}"),
        )
    }

    fn render_or_degrade(
        &self,
        template: &str,
        fallback: &str,
        values: &[Field<'_>],
        built_in: impl FnOnce() -> String,
    ) -> String {
        let complete = values.iter().all(|(_, value)| value.is_some());
        let context = self.context(values);
        if complete {
            match self.environment.render_str(template, &context) {
                Ok(rendered) => return rendered,
                Err(error) => {
                    tracing::warn!(%error, "comment template failed, using fallback");
                }
            }
        }
        self.environment
            .render_str(fallback, &context)
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "fallback comment template failed, using built-in text");
                built_in()
            })
    }

    /// Builds the template context; absent values stay undefined.
    fn context<'v>(&self, values: &[Field<'v>]) -> BTreeMap<&'static str, &'v str> {
        let mut context = BTreeMap::new();
        context.insert("platform", self.platform.display_name);
        context.insert("platform_prefix", self.platform.prefix);
        for (name, value) in values {
            if let Some(present) = value {
                context.insert(*name, *present);
            }
        }
        context
    }
}
