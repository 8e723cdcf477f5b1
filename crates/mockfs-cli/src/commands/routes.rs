use anyhow::Result;
use colored::Colorize;
use mockfs::{resolve, Method, Options, Route};
use mockfs_router::join_url;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One line of the route table
#[derive(Debug, Serialize, PartialEq)]
struct RouteRow {
    method: Method,
    url: String,
    pattern: String,
    handler: PathBuf,
}

/// Command-line flags take precedence over the config file
pub fn apply_overrides(mut options: Options, base_url: Option<String>, dirs: Vec<PathBuf>) -> Options {
    if let Some(base_url) = base_url {
        options.base_url = base_url;
    }
    if !dirs.is_empty() {
        options.scan_dirs = dirs;
    }
    if options.scan_dirs.is_empty() {
        options.scan_dirs.push(PathBuf::from("."));
    }
    options
}

pub async fn execute(options: &Options, json: bool) -> Result<()> {
    let routes = resolve(options).await?;
    let rows = rows(&options.base_url, &routes);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("{}", "No handler files found".yellow());
        return Ok(());
    }

    let url_width = rows.iter().map(|r| r.url.len()).max().unwrap_or(0);
    let cwd = std::env::current_dir().unwrap_or_default();

    for row in &rows {
        println!(
            "{}  {:<width$}  {}",
            paint_method(row.method),
            row.url,
            display_path(&row.handler, &cwd).dimmed(),
            width = url_width
        );
    }

    println!();
    println!("{} routes", rows.len().to_string().green().bold());

    Ok(())
}

fn rows(base_url: &str, routes: &[Route]) -> Vec<RouteRow> {
    routes
        .iter()
        .map(|route| RouteRow {
            method: route.method,
            url: join_url(base_url, &route.pattern),
            pattern: route.pattern.clone(),
            handler: route.handler.clone(),
        })
        .collect()
}

fn paint_method(method: Method) -> colored::ColoredString {
    let label = format!("{:<7}", method.as_str().to_uppercase());
    match method {
        Method::Get | Method::Head | Method::Options => label.green(),
        Method::Post | Method::Put | Method::Patch => label.cyan(),
        Method::Delete => label.red(),
        Method::All => label.normal(),
    }
}

fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd).unwrap_or(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overrides_replace_config_values() {
        let options = Options::new("http://localhost").with_scan_dir("mocks");
        let options = apply_overrides(
            options,
            Some("http://localhost:4000".to_string()),
            vec![PathBuf::from("other")],
        );
        assert_eq!(options.base_url, "http://localhost:4000");
        assert_eq!(options.scan_dirs, vec![PathBuf::from("other")]);
    }

    #[test]
    fn test_no_dirs_scans_current_directory() {
        let options = apply_overrides(Options::default(), None, Vec::new());
        assert_eq!(options.scan_dirs, vec![PathBuf::from(".")]);
    }

    #[test]
    fn test_rows_join_base_url() {
        let routes = vec![
            Route::from_path("index.get.ts", "/mocks/index.get.ts"),
            Route::from_path("orders/[id].post.ts", "/mocks/orders/[id].post.ts"),
        ];
        let rows = rows("http://localhost/api", &routes);

        assert_eq!(rows[0].url, "http://localhost/api");
        assert_eq!(rows[0].method, Method::Get);
        assert_eq!(rows[1].url, "http://localhost/api/orders/:id");
        assert_eq!(rows[1].pattern, "/orders/:id");
    }

    #[test]
    fn test_display_path_relative_to_cwd() {
        assert_eq!(
            display_path(Path::new("/work/mocks/a.ts"), Path::new("/work")),
            "mocks/a.ts"
        );
        assert_eq!(
            display_path(Path::new("/elsewhere/a.ts"), Path::new("/work")),
            "/elsewhere/a.ts"
        );
    }
}
