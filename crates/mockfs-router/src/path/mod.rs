//! Path and URL utilities for route patterns
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.
//! Borrowed input is returned unchanged whenever no rewrite is needed.

use std::borrow::Cow;

/// Validates if a route pattern is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
///
/// # Examples
///
/// ```
/// use mockfs_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/orders/:id"));
/// assert!(is_valid_path("/files/**:rest"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("orders")); // Missing leading /
/// assert!(!is_valid_path("/orders/")); // Trailing /
/// assert!(!is_valid_path("/orders//1")); // Double //
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Prepends a `/` unless the input already starts with one
///
/// ```
/// use mockfs_router::path::with_leading_slash;
///
/// assert_eq!(with_leading_slash("users"), "/users");
/// assert_eq!(with_leading_slash("/users"), "/users");
/// assert_eq!(with_leading_slash(""), "/");
/// ```
pub fn with_leading_slash(input: &str) -> Cow<'_, str> {
    if input.starts_with('/') {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("/{}", input))
    }
}

/// Removes a single trailing `/`; an input that becomes empty is `/`
///
/// ```
/// use mockfs_router::path::without_trailing_slash;
///
/// assert_eq!(without_trailing_slash("/users/"), "/users");
/// assert_eq!(without_trailing_slash("/"), "/");
/// assert_eq!(without_trailing_slash(""), "/");
/// ```
pub fn without_trailing_slash(input: &str) -> &str {
    let trimmed = input.strip_suffix('/').unwrap_or(input);
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Prefixes `input` with `base` unless it is already under it
///
/// A base of `""` or `"/"` leaves the input untouched, as does an input that
/// already carries a scheme.
///
/// ```
/// use mockfs_router::path::with_base;
///
/// assert_eq!(with_base("users", "/"), "users");
/// assert_eq!(with_base("/users", "/api"), "/api/users");
/// assert_eq!(with_base("/api/users", "/api/"), "/api/users");
/// assert_eq!(with_base("/apiary", "/api"), "/api/apiary");
/// ```
pub fn with_base<'a>(input: &'a str, base: &str) -> Cow<'a, str> {
    if base.is_empty() || base == "/" || has_protocol(input) {
        return Cow::Borrowed(input);
    }

    let base = without_trailing_slash(base);
    let under_base = input
        .strip_prefix(base)
        .map(|rest| rest.is_empty() || rest.starts_with('/'))
        .unwrap_or(false);

    if under_base {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(join_url(base, input))
    }
}

/// Joins a base URL and a path with exactly one `/` at the join point
///
/// Segments that are empty or just `/` are skipped. Leading slashes of the
/// appended segment are dropped; the rest of it, placeholders included, is
/// kept verbatim.
///
/// ```
/// use mockfs_router::path::join_url;
///
/// assert_eq!(join_url("http://localhost", "/orders/:id"), "http://localhost/orders/:id");
/// assert_eq!(join_url("http://localhost/api/", "//users"), "http://localhost/api/users");
/// assert_eq!(join_url("http://localhost", "/"), "http://localhost");
/// assert_eq!(join_url("", "/users"), "/users");
/// ```
pub fn join_url(base: &str, input: &str) -> String {
    if input.is_empty() || input == "/" {
        return if base.is_empty() {
            "/".to_string()
        } else {
            base.to_string()
        };
    }

    if base.is_empty() {
        return input.to_string();
    }

    let segment = input.trim_start_matches('/');
    if base.ends_with('/') {
        format!("{}{}", base, segment)
    } else {
        format!("{}/{}", base, segment)
    }
}

/// Checks for a `scheme://` prefix
pub fn has_protocol(input: &str) -> bool {
    input
        .split_once("://")
        .map(|(scheme, _)| {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        })
        .unwrap_or(false)
}

/// Splits an absolute URL into its origin and path, dropping query and fragment
///
/// URLs without a scheme have no origin. An origin without a path maps to `/`.
///
/// ```
/// use mockfs_router::path::split_origin;
///
/// assert_eq!(split_origin("http://localhost/orders/1?x=1"), (Some("http://localhost"), "/orders/1"));
/// assert_eq!(split_origin("http://localhost"), (Some("http://localhost"), "/"));
/// assert_eq!(split_origin("/orders/1#top"), (None, "/orders/1"));
/// ```
pub fn split_origin(url: &str) -> (Option<&str>, &str) {
    let url = url.split(['?', '#']).next().unwrap_or(url);

    if !has_protocol(url) {
        return (None, url);
    }

    let authority_start = url.find("://").map(|idx| idx + 3).unwrap_or(0);
    match url[authority_start..].find('/') {
        Some(offset) => {
            let split = authority_start + offset;
            (Some(&url[..split]), &url[split..])
        }
        None => (Some(url), "/"),
    }
}
