//! Matching request URLs against route patterns
//!
//! Used by the interception layer to pick a binding and extract its parameters.

use std::borrow::Cow;
use std::collections::HashMap;

use super::pattern::{classify_segment, PatternSegment, TemplatePart};
use crate::path::split_origin;

/// Matches a request path against a route pattern (case-sensitive)
///
/// # Examples
///
/// ```
/// use mockfs_router::route::matcher::match_path;
///
/// let params = match_path("/orders/:id", "/orders/123").unwrap();
/// assert_eq!(params.get("id"), Some(&"123".to_string()));
///
/// let params = match_path("/docs/**:path", "/docs/guide/intro").unwrap();
/// assert_eq!(params.get("path"), Some(&"guide/intro".to_string()));
///
/// assert!(match_path("/orders/:id", "/orders").is_none());
/// ```
pub fn match_path(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    match_path_with_options(pattern, path, false)
}

/// Matches a request path against a route pattern
///
/// Walks pattern and path segments together:
/// - static segments compare literally (optionally ignoring ASCII case)
/// - `:name` takes exactly one segment
/// - `v:name`-style segments match their literal text and capture the rest
///   of the segment (at least one character per placeholder)
/// - `**` / `**:name` take zero or more segments, longest first, backtracking
///   so later pattern segments can still match
///
/// Empty segments are ignored on both sides, so `/a/` matches `/a`.
/// Parameter values are percent-decoded.
pub fn match_path_with_options(
    pattern: &str,
    path: &str,
    case_insensitive: bool,
) -> Option<HashMap<String, String>> {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut captures = Vec::new();
    match_segments(
        &pattern_segments,
        &path_segments,
        &mut captures,
        case_insensitive,
    )
    .then(|| {
        captures
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    })
}

/// Captured `(name, value)` pairs; later entries win on duplicate names
type Captures<'p> = Vec<(&'p str, String)>;

// On failure `captures` is restored to its length on entry
fn match_segments<'p>(
    pattern_segments: &[&'p str],
    path_segments: &[&str],
    captures: &mut Captures<'p>,
    case_insensitive: bool,
) -> bool {
    let Some((pattern_seg, pattern_rest)) = pattern_segments.split_first() else {
        return path_segments.is_empty();
    };
    let mark = captures.len();

    match classify_segment(*pattern_seg) {
        PatternSegment::CatchAll(name) => {
            for taken in (0..=path_segments.len()).rev() {
                if match_segments(
                    pattern_rest,
                    &path_segments[taken..],
                    captures,
                    case_insensitive,
                ) {
                    if let Some(name) = name {
                        let captured = path_segments[..taken]
                            .iter()
                            .map(|s| decode(s))
                            .collect::<Vec<_>>()
                            .join("/");
                        captures.insert(mark, (name, captured));
                    }
                    return true;
                }
            }
            false
        }
        PatternSegment::Param(name) => {
            let Some((path_seg, path_rest)) = path_segments.split_first() else {
                return false;
            };
            captures.push((name, decode(path_seg).into_owned()));
            if match_segments(pattern_rest, path_rest, captures, case_insensitive) {
                return true;
            }
            captures.truncate(mark);
            false
        }
        PatternSegment::Template(parts) => {
            let Some((path_seg, path_rest)) = path_segments.split_first() else {
                return false;
            };
            if match_template(&parts, path_seg, captures, case_insensitive)
                && match_segments(pattern_rest, path_rest, captures, case_insensitive)
            {
                return true;
            }
            captures.truncate(mark);
            false
        }
        PatternSegment::Static(literal) => {
            let Some((path_seg, path_rest)) = path_segments.split_first() else {
                return false;
            };
            literal_eq(literal, path_seg, case_insensitive)
                && match_segments(pattern_rest, path_rest, captures, case_insensitive)
        }
    }
}

/// Matches one path segment against literal runs and placeholders
///
/// Placeholders take the shortest text that lets the rest of the segment match.
fn match_template<'p>(
    parts: &[TemplatePart<'p>],
    text: &str,
    captures: &mut Captures<'p>,
    case_insensitive: bool,
) -> bool {
    let Some((part, rest)) = parts.split_first() else {
        return text.is_empty();
    };

    match *part {
        TemplatePart::Literal(literal) => text
            .get(..literal.len())
            .filter(|head| literal_eq(literal, head, case_insensitive))
            .is_some_and(|_| {
                match_template(rest, &text[literal.len()..], captures, case_insensitive)
            }),
        TemplatePart::Param(name) => {
            let mark = captures.len();
            for (end, c) in text.char_indices() {
                let end = end + c.len_utf8();
                captures.push((name, decode(&text[..end]).into_owned()));
                if match_template(rest, &text[end..], captures, case_insensitive) {
                    return true;
                }
                captures.truncate(mark);
            }
            false
        }
    }
}

fn literal_eq(literal: &str, text: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        literal.eq_ignore_ascii_case(text)
    } else {
        literal == text
    }
}

fn decode(segment: &str) -> Cow<'_, str> {
    urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment))
}

/// A route pattern joined onto a base URL, e.g. `http://localhost/orders/:id`
///
/// The origin, when present, must match the request's origin (ASCII case-insensitive).
/// A pattern without an origin matches requests to any host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern {
    origin: Option<String>,
    path: String,
}

impl UrlPattern {
    /// Splits a joined URL into origin and path pattern
    ///
    /// ```
    /// use mockfs_router::route::matcher::UrlPattern;
    ///
    /// let pattern = UrlPattern::parse("http://localhost/orders/:id");
    /// assert_eq!(pattern.origin(), Some("http://localhost"));
    /// assert_eq!(pattern.path(), "/orders/:id");
    /// ```
    pub fn parse(url: &str) -> Self {
        let (origin, path) = split_origin(url);
        Self {
            origin: origin.map(str::to_string),
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
        }
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Matches a request URL, returning the captured parameters
    ///
    /// ```
    /// use mockfs_router::route::matcher::UrlPattern;
    ///
    /// let pattern = UrlPattern::parse("http://localhost/orders/:id");
    /// let params = pattern.matches("http://localhost/orders/123?expand=1", false).unwrap();
    /// assert_eq!(params["id"], "123");
    ///
    /// assert!(pattern.matches("http://example.com/orders/123", false).is_none());
    /// ```
    pub fn matches(&self, url: &str, case_insensitive: bool) -> Option<HashMap<String, String>> {
        let (origin, path) = split_origin(url);

        if let Some(expected) = &self.origin {
            if !expected.eq_ignore_ascii_case(origin?) {
                return None;
            }
        }

        match_path_with_options(&self.path, path, case_insensitive)
    }
}
