//! Inbound adapters translating platform payloads into domain events.
//!
//! Each platform module declares a typed schema for the payload fields it
//! consumes. Every field is optional and `null` is treated like an absent
//! value, so shape problems surface only when a value has the wrong type.

pub mod bitbucket;
pub mod gitlab;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::hooks::domain::{HookEvent, HookEventKind, Platform};

/// Parses a delivery into a normalized event.
///
/// Returns `Ok(None)` when the platform's filters discard the delivery or
/// when a push carries no payload.
///
/// # Errors
///
/// Returns the deserializer error when a consumed field has the wrong type.
pub fn parse_event(
    platform: Platform,
    kind: HookEventKind,
    payload: &Value,
) -> Result<Option<HookEvent>, serde_json::Error> {
    match platform {
        Platform::BitBucket => bitbucket::parse_event(kind, payload),
        Platform::GitLab => gitlab::parse_event(kind, payload),
    }
}

/// Deserializes `null` as the type's default value.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Renders a scalar identifier (number or string) as text.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text.clone()),
        _ => None,
    }
}

/// Joins URL path segments onto a base, avoiding doubled separators.
fn join_url(base: &str, segments: &[&str]) -> String {
    let mut joined = base.trim_end_matches('/').to_owned();
    for segment in segments {
        if !joined.is_empty() {
            joined.push('/');
        }
        joined.push_str(segment.trim_matches('/'));
    }
    joined
}
