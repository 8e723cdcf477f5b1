// File: src/registrar.rs
// Purpose: Binds routes to lazily loaded handler modules

use futures::future::BoxFuture;
use mockfs_router::route::matcher::UrlPattern;
use mockfs_router::{join_url, Method, Route};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::loader::ModuleLoader;
use crate::server::{MockRequest, MockResponse};

/// Future returned by a [`Resolver`]
pub type ResolverFuture = BoxFuture<'static, Result<MockResponse>>;

/// Request resolver handed to the interception layer
pub type Resolver = Arc<dyn Fn(MockRequest) -> ResolverFuture + Send + Sync>;

/// A route registered with the interception layer
#[derive(Clone)]
pub struct Binding {
    /// Method the binding answers to
    pub method: Method,
    /// Base URL joined with the route pattern
    pub url: String,
    /// Handler module location
    pub handler: PathBuf,
    matcher: UrlPattern,
    resolver: Resolver,
}

impl Binding {
    pub fn new(method: Method, url: impl Into<String>, handler: PathBuf, resolver: Resolver) -> Self {
        let url = url.into();
        Self {
            matcher: UrlPattern::parse(&url),
            method,
            url,
            handler,
            resolver,
        }
    }

    /// Parameters captured from `url` if this binding handles the request
    pub fn matches(
        &self,
        method: Method,
        url: &str,
        case_insensitive: bool,
    ) -> Option<std::collections::HashMap<String, String>> {
        if !self.method.accepts(method) {
            return None;
        }
        self.matcher.matches(url, case_insensitive)
    }

    /// Invoke the resolver
    pub fn resolve(&self, request: MockRequest) -> ResolverFuture {
        (self.resolver)(request)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("handler", &self.handler)
            .finish()
    }
}

/// Builds one binding per route, in route order
///
/// Nothing is loaded here: each resolver loads its module on first invocation.
pub fn register(base_url: &str, routes: &[Route], loader: Arc<dyn ModuleLoader>) -> Vec<Binding> {
    let bindings: Vec<Binding> = routes
        .iter()
        .map(|route| {
            let url = join_url(base_url, &route.pattern);
            debug!("Binding {} {} -> {:?}", route.method, url, route.handler);
            Binding::new(
                route.method,
                url,
                route.handler.clone(),
                lazy_resolver(&route.handler, Arc::clone(&loader)),
            )
        })
        .collect();

    info!(
        "Registered {} mock handlers ({} loader)",
        bindings.len(),
        loader.name()
    );

    bindings
}

/// Resolver that loads the module at `location` on each call and forwards the request
fn lazy_resolver(location: &Path, loader: Arc<dyn ModuleLoader>) -> Resolver {
    let location: Arc<Path> = Arc::from(location);

    Arc::new(move |request: MockRequest| -> ResolverFuture {
        let location = Arc::clone(&location);
        let loader = Arc::clone(&loader);

        Box::pin(async move {
            let module = loader.load(&location).await?;
            let handler = module.default_export(&location)?;
            handler(request).await.map_err(Error::Handler)
        })
    })
}
