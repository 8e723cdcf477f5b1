// File: src/loader.rs
// Purpose: Handler modules and the loaders that resolve a file location to one

use async_trait::async_trait;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use crate::error::LoadError;
use crate::scanner::absolutize;
use crate::server::{MockRequest, MockResponse};

/// Future returned by a [`Handler`]
pub type HandlerFuture = BoxFuture<'static, anyhow::Result<MockResponse>>;

/// A mock request handler, the default export of a handler module
pub type Handler = Arc<dyn Fn(MockRequest) -> HandlerFuture + Send + Sync>;

/// Wraps an async function into a [`Handler`]
///
/// # Examples
///
/// ```
/// use mockfs::{define_handler, MockResponse};
/// use serde_json::json;
///
/// let handler = define_handler(|request| async move {
///     Ok(MockResponse::json(json!({ "id": request.param("id") })))
/// });
/// ```
pub fn define_handler<F, Fut>(f: F) -> Handler
where
    F: Fn(MockRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<MockResponse>> + Send + 'static,
{
    Arc::new(move |request| -> HandlerFuture { Box::pin(f(request)) })
}

/// An evaluated handler module
#[derive(Clone, Default)]
pub struct Module {
    default: Option<Handler>,
}

impl Module {
    /// Module with no exports
    pub fn new() -> Self {
        Self::default()
    }

    /// Module whose default export is `handler`
    pub fn with_default(handler: Handler) -> Self {
        Self {
            default: Some(handler),
        }
    }

    /// The default export, or `MissingDefaultExport` for the module at `location`
    pub fn default_export(&self, location: &Path) -> Result<&Handler, LoadError> {
        self.default
            .as_ref()
            .ok_or_else(|| LoadError::MissingDefaultExport(location.to_path_buf()))
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("default", &self.default.as_ref().map(|_| "<handler>"))
            .finish()
    }
}

/// Resolves a handler file location to its module
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    /// Load the module at `location`
    async fn load(&self, location: &Path) -> Result<Arc<Module>, LoadError>;

    /// Loader name, for logs
    fn name(&self) -> &'static str;
}

type Initializer = Arc<dyn Fn() -> anyhow::Result<Module> + Send + Sync>;

/// Compile-time module table keyed by file location
///
/// Handler modules are Rust functions registered against the file that names
/// their route. Each module's initialiser runs on every `load`; wrap the table
/// in a [`ModuleCache`] to evaluate each module once.
///
/// ```
/// use mockfs::{define_handler, MockResponse, StaticModules};
///
/// let modules = StaticModules::new("mocks")
///     .with_handler("products.ts", define_handler(|_| async { Ok(MockResponse::text("ok")) }));
/// ```
#[derive(Clone)]
pub struct StaticModules {
    root: PathBuf,
    modules: HashMap<PathBuf, Initializer>,
}

impl StaticModules {
    /// Table for handler files under `root`
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: absolutize(root.as_ref()),
            modules: HashMap::new(),
        }
    }

    /// Register a module initialiser for `relative_path` under the root
    ///
    /// The initialiser stands in for module-level code: it runs when the
    /// module is loaded, not when it is registered.
    pub fn with_module<F>(mut self, relative_path: impl AsRef<Path>, init: F) -> Self
    where
        F: Fn() -> anyhow::Result<Module> + Send + Sync + 'static,
    {
        let location = self.location(relative_path.as_ref());
        self.modules.insert(location, Arc::new(init));
        self
    }

    /// Register a module whose default export is `handler`
    pub fn with_handler(self, relative_path: impl AsRef<Path>, handler: Handler) -> Self {
        self.with_module(relative_path, move || Ok(Module::with_default(handler.clone())))
    }

    /// Absolute location a relative handler path maps to
    pub fn location(&self, relative_path: &Path) -> PathBuf {
        absolutize(&self.root.join(relative_path))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[async_trait]
impl ModuleLoader for StaticModules {
    async fn load(&self, location: &Path) -> Result<Arc<Module>, LoadError> {
        let init = self
            .modules
            .get(location)
            .ok_or_else(|| LoadError::NotFound(location.to_path_buf()))?;

        debug!("Evaluating handler module {:?}", location);

        init().map(Arc::new).map_err(|e| LoadError::Evaluation {
            location: location.to_path_buf(),
            source: e.into(),
        })
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Memoizing wrapper around a [`ModuleLoader`]
///
/// Each location is loaded at most once; concurrent first loads share a
/// single evaluation. A failed load is not cached, the next call retries.
pub struct ModuleCache<L> {
    inner: L,
    modules: Mutex<HashMap<PathBuf, Arc<OnceCell<Arc<Module>>>>>,
}

impl<L: ModuleLoader> ModuleCache<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            modules: Mutex::new(HashMap::new()),
        }
    }

    /// Whether the module at `location` has been loaded successfully
    pub async fn is_loaded(&self, location: &Path) -> bool {
        self.modules
            .lock()
            .await
            .get(location)
            .map(|cell| cell.initialized())
            .unwrap_or(false)
    }

    /// Number of modules loaded so far
    pub async fn loaded_count(&self) -> usize {
        self.modules
            .lock()
            .await
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

#[async_trait]
impl<L: ModuleLoader> ModuleLoader for ModuleCache<L> {
    async fn load(&self, location: &Path) -> Result<Arc<Module>, LoadError> {
        let cell = {
            let mut modules = self.modules.lock().await;
            modules.entry(location.to_path_buf()).or_default().clone()
        };

        cell.get_or_try_init(|| self.inner.load(location))
            .await
            .cloned()
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ok_handler() -> Handler {
        define_handler(|_| async { Ok(MockResponse::text("ok")) })
    }

    #[tokio::test]
    async fn test_static_modules_load_registered() {
        let modules = StaticModules::new("/mocks").with_handler("a.ts", ok_handler());
        let module = modules.load(Path::new("/mocks/a.ts")).await.unwrap();
        assert!(module.default_export(Path::new("/mocks/a.ts")).is_ok());
        assert_eq!(modules.len(), 1);
    }

    #[tokio::test]
    async fn test_static_modules_not_found() {
        let modules = StaticModules::new("/mocks");
        let err = modules.load(Path::new("/mocks/missing.ts")).await.unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_initialiser_failure_is_evaluation_error() {
        let modules = StaticModules::new("/mocks")
            .with_module("broken.ts", || Err(anyhow::anyhow!("boom")));
        let err = modules.load(Path::new("/mocks/broken.ts")).await.unwrap_err();
        assert!(matches!(err, LoadError::Evaluation { .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_missing_default_export() {
        let modules = StaticModules::new("/mocks").with_module("empty.ts", || Ok(Module::new()));
        let location = Path::new("/mocks/empty.ts");
        let module = modules.load(location).await.unwrap();
        assert!(matches!(
            module.default_export(location),
            Err(LoadError::MissingDefaultExport(_))
        ));
    }

    #[tokio::test]
    async fn test_cache_evaluates_once() {
        let evaluations = Arc::new(AtomicUsize::new(0));
        let counter = evaluations.clone();
        let modules = StaticModules::new("/mocks").with_module("a.ts", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Module::with_default(ok_handler()))
        });
        let cache = ModuleCache::new(modules);
        let location = Path::new("/mocks/a.ts");

        assert!(!cache.is_loaded(location).await);
        let (a, b) = tokio::join!(cache.load(location), cache.load(location));
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        cache.load(location).await.unwrap();

        assert_eq!(evaluations.load(Ordering::SeqCst), 1);
        assert!(cache.is_loaded(location).await);
        assert_eq!(cache.loaded_count().await, 1);
    }

    #[tokio::test]
    async fn test_cache_retries_failed_loads() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let modules = StaticModules::new("/mocks").with_module("flaky.ts", move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(anyhow::anyhow!("first load fails"))
            } else {
                Ok(Module::with_default(ok_handler()))
            }
        });
        let cache = ModuleCache::new(modules);
        let location = Path::new("/mocks/flaky.ts");

        assert!(cache.load(location).await.is_err());
        assert!(cache.load(location).await.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(cache.loaded_count().await, 1);
    }
}
