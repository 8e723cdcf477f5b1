// File: src/config.rs
// Purpose: Scan options, loadable from mockfs.toml

use anyhow::{Context, Result};
use mockfs_router::DEFAULT_SUFFIX_REGEX;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Error;

/// Glob used when `scan_pattern` is not set
pub const DEFAULT_SCAN_PATTERN: &str = "**/*.{js,mjs,cjs,ts,mts,cts,tsx,jsx}";

/// Default config file name
pub const DEFAULT_CONFIG_FILE: &str = "mockfs.toml";

/// Options for one resolution run
///
/// ```toml
/// base_url = "http://localhost:3000"
/// scan_dirs = ["mocks", "fixtures/handlers"]
/// ignore = ["**/*.test.ts"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Options {
    /// URL every route pattern is joined onto
    #[serde(default)]
    pub base_url: String,

    /// Directories to scan, in registration order
    #[serde(default)]
    pub scan_dirs: Vec<PathBuf>,

    /// Glob selecting handler files (default: [`DEFAULT_SCAN_PATTERN`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_pattern: Option<String>,

    /// Regex matching the method suffix; group 1 names the method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix_regex: Option<String>,

    /// Globs excluded from the scan, relative to each scan directory
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Options {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_scan_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scan_dirs.push(dir.into());
        self
    }

    pub fn with_scan_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.scan_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn with_scan_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.scan_pattern = Some(pattern.into());
        self
    }

    pub fn with_suffix_regex(mut self, regex: impl Into<String>) -> Self {
        self.suffix_regex = Some(regex.into());
        self
    }

    pub fn with_ignore(mut self, glob: impl Into<String>) -> Self {
        self.ignore.push(glob.into());
        self
    }

    /// Effective scan glob
    pub fn scan_pattern(&self) -> &str {
        self.scan_pattern.as_deref().unwrap_or(DEFAULT_SCAN_PATTERN)
    }

    /// Compiles the effective method suffix regex
    pub fn suffix_regex(&self) -> Result<Cow<'static, Regex>, Error> {
        match &self.suffix_regex {
            None => Ok(Cow::Borrowed(&*DEFAULT_SUFFIX_REGEX)),
            Some(pattern) => Regex::new(pattern).map(Cow::Owned).map_err(|source| {
                Error::InvalidSuffixRegex {
                    pattern: pattern.clone(),
                    source,
                }
            }),
        }
    }

    /// Copy with every default spelled out
    pub fn effective(&self) -> Self {
        Self {
            scan_pattern: Some(self.scan_pattern().to_string()),
            suffix_regex: Some(
                self.suffix_regex
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SUFFIX_REGEX.as_str().to_string()),
            ),
            ..self.clone()
        }
    }

    /// Load options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let options: Options = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(options)
    }

    /// Load options from ./mockfs.toml
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_FILE)
    }
}
