//! Error types for webhook domain validation.

use super::HookEventKind;
use std::fmt;
use thiserror::Error;

/// Report of required payload fields that were absent or empty.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub struct MissingFields {
    event: HookEventKind,
    fields: Vec<&'static str>,
}

impl MissingFields {
    /// Creates an empty report for an event kind.
    #[must_use]
    pub const fn new(event: HookEventKind) -> Self {
        Self {
            event,
            fields: Vec::new(),
        }
    }

    /// Records `path` as missing when `value` is absent or blank.
    pub fn check(&mut self, path: &'static str, value: Option<&str>) {
        if value.is_none_or(|present| present.trim().is_empty()) {
            self.fields.push(path);
        }
    }

    /// Returns the event kind the report belongs to.
    #[must_use]
    pub const fn event(&self) -> HookEventKind {
        self.event
    }

    /// Returns the missing payload paths in check order.
    #[must_use]
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    /// Returns whether every checked field was present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} payload, missing: {}",
            self.event,
            self.fields.join(", ")
        )
    }
}

/// Error returned when a platform name is not supported.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported platform: {0}")]
pub struct UnknownPlatform(pub String);
