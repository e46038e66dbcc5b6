//! Rewriting of bare `#<n>` issue references into platform links.

use regex::{Captures, Regex};
use std::sync::LazyLock;

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal covered by unit tests"
)]
static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(\s|^)#(\d+)(\s|$)").expect("issue reference pattern must compile")
});

/// Replaces each standalone `#<digits>` token with a markdown link to
/// `<project_url>/issues/<digits>` labelled `<platform_name>#<digits>`.
///
/// A token counts as standalone when whitespace or a line edge surrounds
/// it. The captured whitespace is kept. Matches do not overlap, so a single
/// space shared by two adjacent tokens only frees the first one. Absent text
/// yields an empty string.
///
/// # Examples
///
/// ```
/// use taiga_hooks::hooks::domain::rewrite_references;
///
/// let rewritten = rewrite_references("GitLab", "http://x/proj", Some("see #12"));
/// assert_eq!(rewritten, "see [GitLab#12](http://x/proj/issues/12)");
/// assert_eq!(rewrite_references("GitLab", "http://x/proj", None), "");
/// ```
#[must_use]
pub fn rewrite_references(platform_name: &str, project_url: &str, text: Option<&str>) -> String {
    let Some(source) = text else {
        return String::new();
    };
    REFERENCE_PATTERN
        .replace_all(source, |captures: &Captures<'_>| {
            let leading = captures.get(1).map_or("", |m| m.as_str());
            let number = captures.get(2).map_or("", |m| m.as_str());
            let trailing = captures.get(3).map_or("", |m| m.as_str());
            format!("{leading}[{platform_name}#{number}]({project_url}/issues/{number}){trailing}")
        })
        .into_owned()
}
