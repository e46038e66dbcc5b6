//! Status-change directives embedded in commit messages.

use crate::tracker::domain::{ItemRef, StatusSlug};
use regex::Regex;
use std::sync::LazyLock;

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal covered by unit tests"
)]
static DIRECTIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"tg-(\d+) +#([-\w]+)").expect("status directive pattern must compile")
});

/// Request to move the item numbered `reference` to the status named
/// `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDirective {
    /// Item number as written in the commit message.
    pub reference: String,
    /// Slug of the requested status.
    pub status: StatusSlug,
}

impl StatusDirective {
    /// Returns the referenced item number.
    ///
    /// Returns `None` for numbers no item can carry: zero, or values that do
    /// not fit in a `u64`.
    #[must_use]
    pub fn item_ref(&self) -> Option<ItemRef> {
        self.reference
            .parse::<u64>()
            .ok()
            .and_then(|value| ItemRef::new(value).ok())
    }
}

/// Extracts every `TG-<ref> #<status-slug>` directive from a commit message.
///
/// Matching is case-insensitive and slugs are returned lowercased.
/// Directives are returned in order of appearance, including those whose
/// number cannot name an item; resolving them fails later.
///
/// # Examples
///
/// ```
/// use taiga_hooks::hooks::domain::parse_status_directives;
///
/// let directives = parse_status_directives("Fix crash TG-12 #Closed");
/// assert_eq!(directives.len(), 1);
/// assert_eq!(directives[0].reference, "12");
/// assert_eq!(directives[0].status.as_str(), "closed");
/// ```
#[must_use]
pub fn parse_status_directives(message: &str) -> Vec<StatusDirective> {
    let lowered = message.to_lowercase();
    DIRECTIVE_PATTERN
        .captures_iter(&lowered)
        .filter_map(|captures| {
            let reference = captures.get(1)?.as_str().to_owned();
            let status = StatusSlug::new(captures.get(2)?.as_str()).ok()?;
            Some(StatusDirective { reference, status })
        })
        .collect()
}
