//! # mockfs
//!
//! File-system routed mock HTTP handlers.
//!
//! Point mockfs at one or more directories of handler files and it derives a
//! route per file from its path, then binds each route to a resolver that
//! loads the handler module on first use:
//!
//! ```text
//! mocks/
//! ├── index.get.ts            GET  /
//! ├── products.ts             *    /products
//! ├── orders/[id].post.ts     POST /orders/:id
//! └── (admin)/users/[...rest].ts   /users/**:rest
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use mockfs::{define_handler, handlers, MockRequest, MockResponse, MockServer, ModuleCache, Options, StaticModules};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let options = Options::new("http://localhost").with_scan_dir("mocks");
//!
//!     let modules = StaticModules::new("mocks")
//!         .with_handler("orders/[id].post.ts", define_handler(|request| async move {
//!             Ok(MockResponse::json(json!(request.param("id"))))
//!         }));
//!
//!     let bindings = handlers(&options, Arc::new(ModuleCache::new(modules))).await?;
//!     let server = MockServer::new(bindings);
//!
//!     let response = server.fetch(MockRequest::post("http://localhost/orders/123")).await?;
//!     assert_eq!(response.unwrap().body, "\"123\"");
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod loader;
pub mod registrar;
pub mod resolver;
pub mod scanner;
pub mod server;

pub use config::{Options, DEFAULT_CONFIG_FILE, DEFAULT_SCAN_PATTERN};
pub use error::{Error, LoadError, Result};
pub use loader::{define_handler, Handler, Module, ModuleCache, ModuleLoader, StaticModules};
pub use registrar::{register, Binding, Resolver};
pub use resolver::{resolve, resolve_files};
pub use scanner::{scan, FileInfo};
pub use server::{MockRequest, MockResponse, MockServer};

// Re-export the routing layer
pub use mockfs_router::{Method, Route, DEFAULT_SUFFIX_PATTERN};

/// Scans `options.scan_dirs` and returns one lazily loading binding per handler file
///
/// Discovery errors are returned as-is; nothing is loaded until a binding's
/// resolver is invoked.
pub async fn handlers(options: &Options, loader: Arc<dyn ModuleLoader>) -> Result<Vec<Binding>> {
    let routes = resolve(options).await?;
    Ok(register(&options.base_url, &routes, loader))
}
