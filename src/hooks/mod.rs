//! Webhook handlers mirroring source-control activity into tracked items.
//!
//! BitBucket and GitLab deliveries share one handler set parameterized by a
//! [`domain::PlatformConfig`]. The module follows hexagonal architecture:
//!
//! - Domain types and pure text processing in [`domain`]
//! - Inbound payload adapters, one per platform, in [`adapters`]
//! - Handler orchestration and comment rendering in [`services`]
//! - Tunables in [`config`]
//!
//! Commit messages drive status changes with the `TG-<ref> #<status-slug>`
//! convention, for example `Fix login redirect TG-42 #closed`.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod services;
