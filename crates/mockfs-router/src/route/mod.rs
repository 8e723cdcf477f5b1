//! Route derivation and matching
//!
//! Pure functional components:
//! - [`pattern`]: filename conventions → URL pattern
//! - [`suffix`]: method suffix extraction and `index` collapsing
//! - [`matcher`]: request URL → parameters

pub mod matcher;
pub mod pattern;
pub mod suffix;

pub use matcher::{match_path, UrlPattern};
pub use pattern::{classify_segment, normalize, param_names, PatternSegment, TemplatePart};
pub use suffix::{extract_method, MethodSuffix, DEFAULT_SUFFIX_PATTERN, DEFAULT_SUFFIX_REGEX};
