// File: src/resolver.rs
// Purpose: Turns scanned handler files into routes

use mockfs_router::Route;
use regex::Regex;
use tracing::{debug, info};

use crate::config::Options;
use crate::error::Result;
use crate::scanner::{scan, FileInfo};

/// Scans the configured directories and derives one route per handler file
///
/// Routes keep scan order. Duplicate patterns are not detected; every file
/// gets a route.
pub async fn resolve(options: &Options) -> Result<Vec<Route>> {
    // Compile before touching the filesystem so a bad regex fails fast
    let suffix = options.suffix_regex()?;
    let files = scan(options).await?;
    let routes = resolve_files(&files, &suffix);

    info!("Resolved {} routes", routes.len());

    Ok(routes)
}

/// Derives routes for already scanned files
pub fn resolve_files(files: &[FileInfo], suffix: &Regex) -> Vec<Route> {
    files
        .iter()
        .map(|file| {
            let route =
                Route::from_path_with_suffix(&file.relative_path, &file.absolute_path, suffix);
            debug!(
                "{} {} -> {:?}",
                route.method, route.pattern, file.relative_path
            );
            route
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockfs_router::{Method, DEFAULT_SUFFIX_REGEX};
    use std::path::PathBuf;

    fn file(relative: &str) -> FileInfo {
        FileInfo {
            relative_path: relative.to_string(),
            absolute_path: PathBuf::from("/mocks").join(relative),
        }
    }

    #[test]
    fn test_resolve_files_keeps_order_and_location() {
        let files = vec![
            file("index.get.ts"),
            file("orders/[id].post.ts"),
            file("products.ts"),
        ];
        let routes = resolve_files(&files, &DEFAULT_SUFFIX_REGEX);

        let summary: Vec<(Method, &str)> = routes
            .iter()
            .map(|r| (r.method, r.pattern.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Method::Get, "/"),
                (Method::Post, "/orders/:id"),
                (Method::All, "/products"),
            ]
        );
        assert_eq!(routes[1].handler, PathBuf::from("/mocks/orders/[id].post.ts"));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let files = vec![file("users.ts"), file("users/index.ts")];
        let routes = resolve_files(&files, &DEFAULT_SUFFIX_REGEX);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].pattern, routes[1].pattern);
    }
}
