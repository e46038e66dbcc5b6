//! Application services for webhook processing.

mod comment;
mod error;
mod events;
mod status;

pub use comment::{CommentRenderer, IssueFields, StatusChangeFields};
pub use error::{HookError, HookResult};
pub use events::EventHookService;
pub use status::StatusResolver;
