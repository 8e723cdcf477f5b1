//! Method suffix extraction (`users.get` → `users` + GET)

use once_cell::sync::Lazy;
use regex::Regex;

use crate::Method;

/// Default suffix pattern: a dot, an optional method token, end of string
pub const DEFAULT_SUFFIX_PATTERN: &str = r"\.(delete|get|head|options|patch|post|put)?$";

/// Compiled [`DEFAULT_SUFFIX_PATTERN`]
pub static DEFAULT_SUFFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_SUFFIX_PATTERN).expect("default suffix pattern is valid"));

/// Result of stripping a method suffix from a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSuffix {
    /// Pattern with the suffix and any trailing `/index` removed
    pub pattern: String,
    /// Method named by the suffix, if any
    pub method: Option<Method>,
}

/// Strips a method suffix matched by `suffix` and collapses a trailing `index`
///
/// A match at index 0 is not a suffix: `/get` stays `/get`. The first capture
/// group names the method; a match without it (or naming no known method)
/// is still cut off but binds no method.
///
/// # Examples
///
/// ```
/// use mockfs_router::route::suffix::{extract_method, DEFAULT_SUFFIX_REGEX};
/// use mockfs_router::Method;
///
/// let m = extract_method("/users.get", &DEFAULT_SUFFIX_REGEX);
/// assert_eq!(m.pattern, "/users");
/// assert_eq!(m.method, Some(Method::Get));
///
/// let m = extract_method("/index.post", &DEFAULT_SUFFIX_REGEX);
/// assert_eq!(m.pattern, "/");
/// assert_eq!(m.method, Some(Method::Post));
/// ```
pub fn extract_method(pattern: &str, suffix: &Regex) -> MethodSuffix {
    let (residual, method) = match suffix.captures(pattern) {
        Some(caps) => match caps.get(0) {
            Some(whole) if whole.start() > 0 => (
                &pattern[..whole.start()],
                caps.get(1).and_then(|token| token.as_str().parse().ok()),
            ),
            _ => (pattern, None),
        },
        None => (pattern, None),
    };

    MethodSuffix {
        pattern: collapse_index(residual).to_string(),
        method,
    }
}

/// Removes a trailing `/index` segment; an empty result is `/`
///
/// ```
/// use mockfs_router::route::suffix::collapse_index;
///
/// assert_eq!(collapse_index("/index"), "/");
/// assert_eq!(collapse_index("/users/index"), "/users");
/// assert_eq!(collapse_index("/reindex"), "/reindex");
/// ```
pub fn collapse_index(pattern: &str) -> &str {
    let collapsed = pattern.strip_suffix("/index").unwrap_or(pattern);
    if collapsed.is_empty() {
        "/"
    } else {
        collapsed
    }
}
