//! HTTP methods a handler file can be bound to

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Method a route answers to
///
/// `All` is what a file without a method suffix binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    All,
}

impl Method {
    /// Methods that can appear as a filename suffix, in suffix-regex order
    pub const SUFFIXES: [Method; 7] = [
        Method::Delete,
        Method::Get,
        Method::Head,
        Method::Options,
        Method::Patch,
        Method::Post,
        Method::Put,
    ];

    /// Lowercase token, as used in filenames
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Delete => "delete",
            Method::Get => "get",
            Method::Head => "head",
            Method::Options => "options",
            Method::Patch => "patch",
            Method::Post => "post",
            Method::Put => "put",
            Method::All => "all",
        }
    }

    /// Whether a route bound to `self` accepts a request made with `request`
    ///
    /// ```
    /// use mockfs_router::Method;
    ///
    /// assert!(Method::All.accepts(Method::Post));
    /// assert!(Method::Get.accepts(Method::Get));
    /// assert!(!Method::Get.accepts(Method::Post));
    /// ```
    pub fn accepts(&self, request: Method) -> bool {
        *self == Method::All || *self == request
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token that names no known method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown HTTP method: {}", self.0)
    }
}

impl std::error::Error for UnknownMethod {}

impl FromStr for Method {
    type Err = UnknownMethod;

    /// Parses a method token, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::SUFFIXES
            .iter()
            .chain(std::iter::once(&Method::All))
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("GET".parse::<Method>(), Ok(Method::Get));
        assert_eq!("Delete".parse::<Method>(), Ok(Method::Delete));
        assert_eq!("all".parse::<Method>(), Ok(Method::All));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "trace".parse::<Method>(),
            Err(UnknownMethod("trace".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_tokens() {
        for method in Method::SUFFIXES {
            assert_eq!(method.to_string().parse::<Method>(), Ok(method));
        }
    }
}
