// File: src/scanner.rs
// Purpose: Discovers handler files under the configured scan directories

use futures::future::try_join_all;
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use icu_collator::{Collator, CollatorOptions};
use serde::Serialize;
use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Options;
use crate::error::{Error, Result};

/// A discovered handler file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    /// Path relative to its scan directory, `/`-separated
    pub relative_path: String,
    /// Absolute location of the file
    pub absolute_path: PathBuf,
}

/// Compiled scan pattern and ignore globs
#[derive(Debug, Clone)]
pub struct FileMatcher {
    include: GlobSet,
    ignore: GlobSet,
}

impl FileMatcher {
    pub fn new(pattern: &str, ignore: &[String]) -> Result<Self> {
        let include = GlobSetBuilder::new()
            .add(compile_glob(pattern)?)
            .build()
            .map_err(|source| invalid_glob(pattern, source))?;

        let ignore = ignore
            .iter()
            .try_fold(GlobSetBuilder::new(), |mut builder, glob| {
                builder.add(compile_glob(glob)?);
                Ok::<_, Error>(builder)
            })?
            .build()
            .map_err(|source| invalid_glob(&ignore.join(", "), source))?;

        Ok(Self { include, ignore })
    }

    pub fn from_options(options: &Options) -> Result<Self> {
        Self::new(options.scan_pattern(), &options.ignore)
    }

    /// Whether a relative file path is selected
    pub fn is_match(&self, relative_path: &str) -> bool {
        self.include.is_match(relative_path) && !self.ignore.is_match(relative_path)
    }

    /// Whether a relative path is excluded by an ignore glob
    pub fn is_ignored(&self, relative_path: &str) -> bool {
        self.ignore.is_match(relative_path)
    }
}

// `*` stays within one path segment; `**` crosses them
fn compile_glob(pattern: &str) -> Result<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| invalid_glob(pattern, source))
}

fn invalid_glob(pattern: &str, source: globset::Error) -> Error {
    Error::InvalidGlob {
        pattern: pattern.to_string(),
        source,
    }
}

/// Scans every configured directory
///
/// Directories are walked concurrently on the blocking pool; results keep the
/// order of `options.scan_dirs`, each directory sorted by relative path.
pub async fn scan(options: &Options) -> Result<Vec<FileInfo>> {
    let matcher = Arc::new(FileMatcher::from_options(options)?);

    let tasks = options.scan_dirs.iter().map(|dir| {
        let dir = absolutize(dir);
        let matcher = Arc::clone(&matcher);
        tokio::task::spawn_blocking(move || scan_dir(&dir, &matcher))
    });

    let per_dir = try_join_all(tasks).await?;

    let mut files = Vec::new();
    for dir_files in per_dir {
        files.extend(dir_files?);
    }

    debug!(
        "Scanned {} directories, {} handler files",
        options.scan_dirs.len(),
        files.len()
    );

    Ok(files)
}

/// Scans a single directory
///
/// A directory that does not exist yields no files.
pub fn scan_dir(dir: &Path, matcher: &FileMatcher) -> Result<Vec<FileInfo>> {
    if !dir.exists() {
        warn!("Scan directory does not exist: {:?}", dir);
        return Ok(Vec::new());
    }

    let walker = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !matcher.is_ignored(&relative_to(dir, entry.path()))
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| Error::Discovery {
            dir: dir.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative_path = relative_to(dir, entry.path());
        if matcher.is_match(&relative_path) {
            files.push(FileInfo {
                relative_path,
                absolute_path: entry.path().to_path_buf(),
            });
        }
    }

    files.sort_by(|a, b| locale_cmp(&a.relative_path, &b.relative_path));

    debug!("Found {} handler files in {:?}", files.len(), dir);

    Ok(files)
}

/// `/`-separated path of `path` relative to `root`
pub fn relative_to(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Makes a path absolute against the current directory and drops `.` segments
pub fn absolutize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    absolute
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

thread_local! {
    // Root collation order, as used by the default ICU locale
    static COLLATOR: Option<Collator> =
        match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                warn!("Locale collation unavailable, sorting case-folded: {}", e);
                None
            }
        };
}

/// Locale-aware ordering of relative paths
///
/// Uses Unicode root collation: whitespace, punctuation, symbols, digits,
/// then letters, with accents and case only breaking ties (lowercase first).
/// Strings that collate equal fall back to byte order, so the result is total
/// and deterministic across machines.
///
/// ```
/// use mockfs::scanner::locale_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(locale_cmp("apple.ts", "Banana.ts"), Ordering::Less);
/// assert_eq!(locale_cmp("a.ts", "A.ts"), Ordering::Less);
/// assert_eq!(locale_cmp("[id].ts", "123.ts"), Ordering::Less);
/// assert_eq!(locale_cmp("äpfel.ts", "b.ts"), Ordering::Less);
/// ```
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        })
        .then_with(|| a.cmp(b))
}
