//! Taiga hooks: source-control webhooks for an agile project tracker.
//!
//! This crate mirrors BitBucket and GitLab activity into a project's issues,
//! tasks and user stories. Pushed commits change item statuses, opened
//! platform issues become tracker issues, and issue comments are copied onto
//! every linked item.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the host's store, history,
//!   notification and user services
//! - **Adapters**: Platform payload schemas and in-memory port
//!   implementations
//!
//! # Modules
//!
//! - [`hooks`]: Webhook parsing, comment rendering and event handlers
//! - [`tracker`]: Tracked item model and the ports handlers depend on

pub mod hooks;
pub mod tracker;
