//! File discovery and route resolution against real directory trees

mod common;

use common::{handler_tree, touch};
use mockfs::{resolve, scan, Error, Method, Options};
use pretty_assertions::assert_eq;

fn relative_paths(files: &[mockfs::FileInfo]) -> Vec<&str> {
    files.iter().map(|f| f.relative_path.as_str()).collect()
}

#[tokio::test]
async fn test_scan_sorts_within_directory() {
    let dir = handler_tree(&["products.ts", "index.get.ts", "orders/[id].post.ts", "Admin.ts"]);
    let options = Options::new("http://localhost").with_scan_dir(dir.path());

    let files = scan(&options).await.unwrap();
    assert_eq!(
        relative_paths(&files),
        vec!["Admin.ts", "index.get.ts", "orders/[id].post.ts", "products.ts"]
    );
}

#[tokio::test]
async fn test_scan_keeps_directory_order() {
    let first = handler_tree(&["b.ts", "a.ts"]);
    let second = handler_tree(&["c.ts"]);
    let options = Options::new("http://localhost")
        .with_scan_dir(second.path())
        .with_scan_dir(first.path());

    let files = scan(&options).await.unwrap();
    assert_eq!(relative_paths(&files), vec!["c.ts", "a.ts", "b.ts"]);
    assert!(files[0].absolute_path.starts_with(second.path()));
    assert!(files[1].absolute_path.starts_with(first.path()));
}

#[tokio::test]
async fn test_scan_is_deterministic() {
    let dir = handler_tree(&["z.ts", "m/n.ts", "a.ts", "m/a.ts", "(g)/x.ts"]);
    let options = Options::new("http://localhost").with_scan_dir(dir.path());

    let first = scan(&options).await.unwrap();
    let second = scan(&options).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_scan_filters_by_pattern_and_ignore() {
    let dir = handler_tree(&[
        "users.ts",
        "users.test.ts",
        "README.md",
        "data.json",
        ".internal/health.ts",
        "drafts/wip.ts",
    ]);
    let options = Options::new("http://localhost")
        .with_scan_dir(dir.path())
        .with_ignore("**/*.test.ts")
        .with_ignore("drafts/**");

    let files = scan(&options).await.unwrap();
    assert_eq!(relative_paths(&files), vec![".internal/health.ts", "users.ts"]);
}

#[tokio::test]
async fn test_scan_custom_pattern() {
    let dir = handler_tree(&["users.json", "users.ts"]);
    let options = Options::new("http://localhost")
        .with_scan_dir(dir.path())
        .with_scan_pattern("**/*.json");

    let files = scan(&options).await.unwrap();
    assert_eq!(relative_paths(&files), vec!["users.json"]);
}

#[tokio::test]
async fn test_scan_absolute_paths() {
    let dir = handler_tree(&["orders/[id].post.ts"]);
    let options = Options::new("http://localhost").with_scan_dir(dir.path());

    let files = scan(&options).await.unwrap();
    assert_eq!(files[0].absolute_path, dir.path().join("orders").join("[id].post.ts"));
    assert!(files[0].absolute_path.is_absolute());
}

#[tokio::test]
async fn test_missing_and_empty_directories_contribute_nothing() {
    let empty = tempfile::tempdir().unwrap();
    let populated = handler_tree(&["a.ts"]);
    let options = Options::new("http://localhost")
        .with_scan_dir(empty.path().join("does-not-exist"))
        .with_scan_dir(empty.path())
        .with_scan_dir(populated.path());

    let files = scan(&options).await.unwrap();
    assert_eq!(relative_paths(&files), vec!["a.ts"]);
}

#[tokio::test]
async fn test_invalid_glob_is_reported() {
    let dir = handler_tree(&["a.ts"]);
    let options = Options::new("http://localhost")
        .with_scan_dir(dir.path())
        .with_ignore("{unclosed");

    assert!(matches!(scan(&options).await, Err(Error::InvalidGlob { .. })));
}

#[tokio::test]
async fn test_resolve_derives_routes_in_scan_order() {
    let dir = handler_tree(&[
        "index.get.ts",
        "products.ts",
        "orders/[id].post.ts",
        "(admin)/users/[...rest].ts",
    ]);
    let options = Options::new("http://localhost").with_scan_dir(dir.path());

    let routes = resolve(&options).await.unwrap();
    let summary: Vec<(Method, &str)> = routes
        .iter()
        .map(|r| (r.method, r.pattern.as_str()))
        .collect();

    assert_eq!(
        summary,
        vec![
            (Method::All, "/users/**:rest"),
            (Method::Get, "/"),
            (Method::Post, "/orders/:id"),
            (Method::All, "/products"),
        ]
    );
}

#[tokio::test]
async fn test_resolve_with_custom_suffix_regex() {
    let dir = handler_tree(&["login@post.ts", "users.get.ts"]);
    let options = Options::new("http://localhost")
        .with_scan_dir(dir.path())
        .with_suffix_regex(r"@(get|post)$");

    let routes = resolve(&options).await.unwrap();
    assert_eq!(routes[0].pattern, "/login");
    assert_eq!(routes[0].method, Method::Post);
    assert_eq!(routes[1].pattern, "/users.get");
    assert_eq!(routes[1].method, Method::All);
}

#[tokio::test]
async fn test_resolve_rejects_invalid_suffix_regex() {
    let dir = handler_tree(&["a.ts"]);
    let options = Options::new("http://localhost")
        .with_scan_dir(dir.path())
        .with_suffix_regex("(unclosed");

    assert!(matches!(
        resolve(&options).await,
        Err(Error::InvalidSuffixRegex { .. })
    ));
}

#[tokio::test]
async fn test_new_files_show_up_on_next_scan() {
    let dir = handler_tree(&["a.ts"]);
    let options = Options::new("http://localhost").with_scan_dir(dir.path());

    assert_eq!(scan(&options).await.unwrap().len(), 1);
    touch(dir.path(), "b.ts");
    assert_eq!(scan(&options).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_scan_uses_locale_order() {
    let dir = handler_tree(&["123.ts", "[id].ts", "b.ts", "äpfel.ts", "_x.ts", "a.ts"]);
    let options = Options::new("http://localhost").with_scan_dir(dir.path());

    let files = scan(&options).await.unwrap();
    assert_eq!(
        relative_paths(&files),
        vec!["_x.ts", "[id].ts", "123.ts", "a.ts", "äpfel.ts", "b.ts"]
    );
}
