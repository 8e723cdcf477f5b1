//! Filename conventions → URL pattern
//!
//! Pure functional rewriting of a handler file's relative path into a route pattern.
//! Each convention is an ordered `(regex, replacement)` rule; the bracket rules run
//! most specific first so `[...name]` is never read as `[name]`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

use crate::path::{with_base, with_leading_slash, without_trailing_slash};

/// One rewrite step of the filename convention
#[derive(Debug)]
pub struct ConventionRule {
    /// Short name, used in logs and tests
    pub name: &'static str,
    regex: Regex,
    replacement: &'static str,
}

impl ConventionRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("convention rule pattern is a valid regex"),
            replacement,
        }
    }

    /// Applies the rule to every match in `input`
    pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        self.regex.replace_all(input, self.replacement)
    }
}

/// Convention rules in application order
///
/// 1. `extension` strips `.ts`, `.js`, ... (letters only, end of path)
/// 2. `route-group` drops `(group)/` segments
/// 3. `anonymous-catch-all` turns `[...]` into `**`
/// 4. `named-catch-all` turns `[...name]` into `**:name`
/// 5. `dynamic-segment` turns `[name]` into `:name`
pub static CONVENTION_RULES: Lazy<[ConventionRule; 5]> = Lazy::new(|| {
    [
        ConventionRule::new("extension", r"\.[A-Za-z]+$", ""),
        ConventionRule::new("route-group", r"\(([^(/\\]+)\)[/\\]", ""),
        ConventionRule::new("anonymous-catch-all", r"\[\.{3}\]", "**"),
        ConventionRule::new("named-catch-all", r"\[\.{3}([A-Za-z0-9_]+)\]", "**:${1}"),
        ConventionRule::new("dynamic-segment", r"\[([A-Za-z0-9_]+)\]", ":${1}"),
    ]
});

/// Runs every convention rule over a relative file path
///
/// ```
/// use mockfs_router::route::pattern::apply_conventions;
///
/// assert_eq!(apply_conventions("(shop)/orders/[id].post.ts"), "orders/:id.post");
/// assert_eq!(apply_conventions("files/[...].ts"), "files/**");
/// ```
pub fn apply_conventions(relative_path: &str) -> String {
    CONVENTION_RULES
        .iter()
        .fold(relative_path.to_string(), |acc, rule| rule.apply(&acc).into_owned())
}

/// Normalizes a relative file path into a URL pattern under `base`
///
/// The result always starts with `/` and only ends with `/` when it is `/`.
/// Method suffixes and `index` stems are left for [`super::suffix::extract_method`].
///
/// # Examples
///
/// ```
/// use mockfs_router::route::pattern::normalize;
///
/// assert_eq!(normalize("products.ts", "/"), "/products");
/// assert_eq!(normalize("(admin)/users/[...rest].ts", "/"), "/users/**:rest");
/// assert_eq!(normalize("users/[id].ts", "/api"), "/api/users/:id");
/// ```
pub fn normalize(relative_path: &str, base: &str) -> String {
    let converted = apply_conventions(relative_path);
    let based = with_base(&converted, base);
    with_leading_slash(without_trailing_slash(&based)).into_owned()
}

/// Kinds of segment a normalized pattern is made of
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment<'a> {
    /// Literal text
    Static(&'a str),
    /// `:name`, exactly one path segment
    Param(&'a str),
    /// Literal text mixed with placeholders inside one segment, e.g. `v:version`
    Template(Vec<TemplatePart<'a>>),
    /// `**` (anonymous) or `**:name`, any number of remaining segments
    CatchAll(Option<&'a str>),
}

/// Piece of a [`PatternSegment::Template`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplatePart<'a> {
    Literal(&'a str),
    Param(&'a str),
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits a segment into literal runs and `:name` placeholders
///
/// A `:` not followed by a name character stays literal.
fn template_parts(segment: &str) -> Vec<TemplatePart<'_>> {
    let mut parts = Vec::new();
    let mut literal_start = 0;
    let mut rest = segment;
    let mut offset = 0;

    while let Some(colon) = rest.find(':') {
        let name_start = offset + colon + 1;
        let name_len = segment[name_start..]
            .find(|c: char| !is_name_char(c))
            .unwrap_or(segment.len() - name_start);

        if name_len == 0 {
            offset = name_start;
            rest = &segment[offset..];
            continue;
        }

        if literal_start < name_start - 1 {
            parts.push(TemplatePart::Literal(&segment[literal_start..name_start - 1]));
        }
        parts.push(TemplatePart::Param(&segment[name_start..name_start + name_len]));

        offset = name_start + name_len;
        literal_start = offset;
        rest = &segment[offset..];
    }

    if literal_start < segment.len() {
        parts.push(TemplatePart::Literal(&segment[literal_start..]));
    }

    parts
}

/// Classifies a single pattern segment
///
/// ```
/// use mockfs_router::route::pattern::{classify_segment, PatternSegment, TemplatePart};
///
/// assert_eq!(classify_segment("users"), PatternSegment::Static("users"));
/// assert_eq!(classify_segment(":id"), PatternSegment::Param("id"));
/// assert_eq!(classify_segment("**"), PatternSegment::CatchAll(None));
/// assert_eq!(classify_segment("**:rest"), PatternSegment::CatchAll(Some("rest")));
/// assert_eq!(
///     classify_segment("v:version"),
///     PatternSegment::Template(vec![TemplatePart::Literal("v"), TemplatePart::Param("version")])
/// );
/// ```
pub fn classify_segment(segment: &str) -> PatternSegment<'_> {
    if let Some(rest) = segment.strip_prefix("**") {
        return match rest.strip_prefix(':') {
            Some(name) if !name.is_empty() => PatternSegment::CatchAll(Some(name)),
            _ if rest.is_empty() => PatternSegment::CatchAll(None),
            _ => PatternSegment::Static(segment),
        };
    }

    let parts = template_parts(segment);
    if let [TemplatePart::Param(name)] = parts[..] {
        return PatternSegment::Param(name);
    }

    if parts.iter().all(|part| matches!(part, TemplatePart::Literal(_))) {
        PatternSegment::Static(segment)
    } else {
        PatternSegment::Template(parts)
    }
}

/// Parameter names a pattern captures, in order of appearance
///
/// ```
/// use mockfs_router::route::pattern::param_names;
///
/// assert_eq!(param_names("/shop/:category/:item"), vec!["category", "item"]);
/// assert_eq!(param_names("/docs/**:path"), vec!["path"]);
/// assert_eq!(param_names("/api/v:version/:id.json"), vec!["version", "id"]);
/// assert!(param_names("/files/**").is_empty());
/// ```
pub fn param_names(pattern: &str) -> Vec<String> {
    pattern
        .split('/')
        .filter(|s| !s.is_empty())
        .flat_map(|segment| match classify_segment(segment) {
            PatternSegment::Param(name) | PatternSegment::CatchAll(Some(name)) => {
                vec![name.to_string()]
            }
            PatternSegment::Template(parts) => parts
                .into_iter()
                .filter_map(|part| match part {
                    TemplatePart::Param(name) => Some(name.to_string()),
                    TemplatePart::Literal(_) => None,
                })
                .collect(),
            _ => Vec::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static ConventionRule {
        CONVENTION_RULES
            .iter()
            .find(|r| r.name == name)
            .unwrap()
    }

    #[test]
    fn test_extension_rule_strips_last_alpha_extension_only() {
        let r = rule("extension");
        assert_eq!(r.apply("users.get.ts"), "users.get");
        assert_eq!(r.apply("index.tsx"), "index");
        assert_eq!(r.apply("v2.d2"), "v2.d2");
    }

    #[test]
    fn test_route_group_rule() {
        let r = rule("route-group");
        assert_eq!(r.apply("(admin)/users"), "users");
        assert_eq!(r.apply("(a)/(b)/users"), "users");
        assert_eq!(r.apply("shop/(promo)/deals"), "shop/deals");
        assert_eq!(r.apply("(admin)\\users"), "users");
        // Not followed by a separator: stays literal
        assert_eq!(r.apply("users/(draft)"), "users/(draft)");
    }

    #[test]
    fn test_bracket_rules_in_order() {
        assert_eq!(rule("anonymous-catch-all").apply("a/[...]"), "a/**");
        assert_eq!(rule("named-catch-all").apply("a/[...rest]"), "a/**:rest");
        assert_eq!(rule("dynamic-segment").apply("a/[id]"), "a/:id");
        // Dynamic rule alone does not touch catch-all syntax
        assert_eq!(rule("dynamic-segment").apply("a/[...rest]"), "a/[...rest]");
    }

    #[test]
    fn test_multiple_brackets_convert_independently() {
        assert_eq!(
            normalize("shop/[category]/[item]/[...rest].ts", "/"),
            "/shop/:category/:item/**:rest"
        );
    }

    #[test]
    fn test_partial_bracket_keeps_outer_text() {
        assert_eq!(normalize("v[version]/info.ts", "/"), "/v:version/info");
    }

    #[test]
    fn test_malformed_brackets_are_literal() {
        assert_eq!(normalize("a/[id.ts", "/"), "/a/[id");
        assert_eq!(normalize("a/[].ts", "/"), "/a/[]");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for p in ["/", "/users", "/orders/:id", "/files/**:rest"] {
            assert_eq!(normalize(p, "/"), p);
        }
    }

    #[test]
    fn test_classify_segment_edge_cases() {
        assert_eq!(classify_segment(":"), PatternSegment::Static(":"));
        assert_eq!(classify_segment("**:"), PatternSegment::Static("**:"));
        assert_eq!(classify_segment("**x"), PatternSegment::Static("**x"));
        assert_eq!(classify_segment("a:"), PatternSegment::Static("a:"));
        assert_eq!(classify_segment("a::b"), PatternSegment::Template(vec![
            TemplatePart::Literal("a:"),
            TemplatePart::Param("b"),
        ]));
    }

    #[test]
    fn test_placeholder_inside_literal_text() {
        assert_eq!(
            classify_segment("v:version"),
            PatternSegment::Template(vec![TemplatePart::Literal("v"), TemplatePart::Param("version")])
        );
        assert_eq!(
            classify_segment(":id.json"),
            PatternSegment::Template(vec![TemplatePart::Param("id"), TemplatePart::Literal(".json")])
        );
        assert_eq!(
            classify_segment(":from-:to"),
            PatternSegment::Template(vec![
                TemplatePart::Param("from"),
                TemplatePart::Literal("-"),
                TemplatePart::Param("to"),
            ])
        );
        assert_eq!(param_names("/v:version/info"), vec!["version"]);
    }
}
