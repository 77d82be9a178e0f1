//! Input classifiers for target URLs and custom aliases.
//!
//! Both functions are pure and never panic: malformed input is simply
//! classified as invalid.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Shortest accepted short code.
pub const MIN_CODE_LENGTH: usize = 3;

/// Longest accepted short code (matches the `links.code` column width).
pub const MAX_CODE_LENGTH: usize = 32;

/// Compiled regex for alias syntax.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,32}$").unwrap());

/// Returns true if `input` is an absolute `http`/`https` URL with a host.
///
/// Surrounding whitespace is ignored. The text after the scheme must start
/// with `//` followed by a non-empty authority, so forms like
/// `https:example.com` or `https:///path` are rejected even though the WHATWG
/// parser recovers a host from them.
///
/// # Examples
///
/// ```
/// use tinylink::utils::validation::is_valid_target_url;
///
/// assert!(is_valid_target_url("https://example.com/path"));
/// assert!(is_valid_target_url("  http://example.com  "));
/// assert!(!is_valid_target_url("ftp://x.com"));
/// assert!(!is_valid_target_url("not a url"));
/// assert!(!is_valid_target_url("javascript:alert(1)"));
/// ```
pub fn is_valid_target_url(input: &str) -> bool {
    let candidate = input.trim();

    let Ok(url) = Url::parse(candidate) else {
        return false;
    };

    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    let has_authority = candidate
        .split_once(':')
        .and_then(|(_, rest)| rest.strip_prefix("//"))
        .and_then(|rest| rest.split(['/', '?', '#']).next())
        .is_some_and(|authority| !authority.is_empty());

    has_authority && url.host_str().is_some_and(|host| !host.is_empty())
}

/// Returns true if `alias` is 3-32 ASCII letters, digits, `_` or `-`.
///
/// # Examples
///
/// ```
/// use tinylink::utils::validation::is_valid_alias_syntax;
///
/// assert!(is_valid_alias_syntax("my-link_1"));
/// assert!(!is_valid_alias_syntax("ab"));
/// assert!(!is_valid_alias_syntax("has space"));
/// ```
pub fn is_valid_alias_syntax(alias: &str) -> bool {
    ALIAS_REGEX.is_match(alias)
}
