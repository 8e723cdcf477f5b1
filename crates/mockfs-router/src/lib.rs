//! # mockfs router
//!
//! Derives mock-handler routes from a file-system naming convention:
//! - Static routes (`products.ts` → `/products`)
//! - Dynamic parameters (`orders/[id].ts` → `/orders/:id`)
//! - Catch-all routes (`docs/[...path].ts` → `/docs/**:path`, `files/[...].ts` → `/files/**`)
//! - Route groups (`(admin)/users.ts` → `/users`)
//! - Index collapsing (`users/index.ts` → `/users`)
//! - Method suffixes (`orders.post.ts` → `POST /orders`)
//!
//! ## Functional Approach
//!
//! Every step is a pure function over strings:
//! - Conventions are an ordered list of `(regex, replacement)` rules
//! - Method suffixes are stripped by a configurable regex
//! - Matching walks pattern and path segments recursively
//!
//! ## Example
//!
//! ```
//! use mockfs_router::{Method, Route};
//!
//! let route = Route::from_path("orders/[id].post.ts", "/srv/mocks/orders/[id].post.ts");
//! assert_eq!(route.pattern, "/orders/:id");
//! assert_eq!(route.method, Method::Post);
//! assert_eq!(route.params, vec!["id"]);
//!
//! let params = route.matches("/orders/123").unwrap();
//! assert_eq!(params.get("id"), Some(&"123".to_string()));
//! ```

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

// ============================================================================
// Module Declarations
// ============================================================================

mod method;
pub mod path;
pub mod route;

pub use method::{Method, UnknownMethod};
pub use path::join_url;
pub use route::{
    classify_segment, extract_method, match_path, normalize, param_names, MethodSuffix,
    PatternSegment, TemplatePart, UrlPattern, DEFAULT_SUFFIX_PATTERN, DEFAULT_SUFFIX_REGEX,
};

// ============================================================================
// Core Types
// ============================================================================

/// A handler file resolved into a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// URL pattern like "/orders/:id"
    pub pattern: String,
    /// Method from the filename suffix, `All` without one
    pub method: Method,
    /// Absolute location of the handler module
    pub handler: PathBuf,
    /// Parameter names captured by the pattern, in order
    pub params: Vec<String>,
    /// Whether the pattern contains a `**` segment
    pub has_catch_all: bool,
}

impl Route {
    /// Creates a route from a path relative to its scan root, using the default method suffixes
    ///
    /// # Examples
    ///
    /// ```
    /// use mockfs_router::{Method, Route};
    ///
    /// let route = Route::from_path("index.get.ts", "/mocks/index.get.ts");
    /// assert_eq!(route.pattern, "/");
    /// assert_eq!(route.method, Method::Get);
    ///
    /// let route = Route::from_path("(admin)/users/[...rest].ts", "/mocks/(admin)/users/[...rest].ts");
    /// assert_eq!(route.pattern, "/users/**:rest");
    /// assert_eq!(route.method, Method::All);
    /// ```
    pub fn from_path(relative_path: &str, handler: impl Into<PathBuf>) -> Self {
        Self::from_path_with_suffix(relative_path, handler, &DEFAULT_SUFFIX_REGEX)
    }

    /// Creates a route using a custom method-suffix regex
    ///
    /// The regex's first capture group names the method.
    pub fn from_path_with_suffix(
        relative_path: &str,
        handler: impl Into<PathBuf>,
        suffix: &Regex,
    ) -> Self {
        let normalized = normalize(relative_path, "/");
        let MethodSuffix { pattern, method } = extract_method(&normalized, suffix);
        let params = param_names(&pattern);
        let has_catch_all = pattern
            .split('/')
            .any(|segment| matches!(classify_segment(segment), PatternSegment::CatchAll(_)));

        Route {
            pattern,
            method: method.unwrap_or(Method::All),
            handler: handler.into(),
            params,
            has_catch_all,
        }
    }

    /// Matches this route's pattern against a request path (case-sensitive)
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        match_path(&self.pattern, path)
    }

    /// Whether this route answers `method` at `path`
    pub fn accepts(&self, method: Method, path: &str) -> bool {
        self.method.accepts(method) && self.matches(path).is_some()
    }
}
