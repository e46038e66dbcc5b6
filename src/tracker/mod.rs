//! Tracked-item model shared with the host application.
//!
//! Webhook handlers never own persistence. This module describes the
//! records they read and write (issues, tasks, user stories, statuses,
//! snapshots) and the ports through which the host exposes its store,
//! history, notification, and user services:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Reference adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
