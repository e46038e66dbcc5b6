//! Domain model for items tracked by the host application.
//!
//! Items are polymorphic over [`ItemKind`] and are addressed inside a
//! project by a sequential [`ItemRef`]. External correlation happens through
//! an [`ExternalReference`] stamped on an item when it is created from a
//! webhook.

mod error;
mod ids;
mod item;
mod project;
mod snapshot;
mod status;
mod user;

pub use error::TrackerDomainError;
pub use ids::{ItemId, ItemRef, ProjectId, SnapshotId, StatusId, UserId};
pub use item::{ExternalReference, IssueClassification, ItemKind, NewIssue, TrackedItem};
pub use project::{IssueDefaults, Project};
pub use snapshot::Snapshot;
pub use status::{Status, StatusSlug};
pub use user::User;
