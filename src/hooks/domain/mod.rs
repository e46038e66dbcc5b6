//! Domain model for webhook processing.
//!
//! Platform payloads are normalized into the event types of [`event`]
//! before any handler sees them, so handlers stay platform-agnostic.

mod directive;
mod error;
mod event;
mod platform;
mod references;

pub use directive::{StatusDirective, parse_status_directives};
pub use error::{MissingFields, UnknownPlatform};
pub use event::{
    Actor, CommitInfo, HookEvent, HookEventKind, IssueCommentEvent, IssueOpenedEvent,
    OpenedIssue, PostedComment, PushEvent,
};
pub use platform::{FieldPaths, Platform, PlatformConfig};
pub use references::rewrite_references;
