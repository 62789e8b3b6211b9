//! Dispatcher core module - hot path for request dispatch.
//!
//! Captured parameters are created by the lookup for one request, lent to the
//! handler for the duration of its call, then dropped. There is no shared
//! parameter store, so concurrent requests for the same path are independent.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::router::{Params, RouteError, Router};
use crate::runtime_config::RuntimeConfig;

/// The parts of an inbound request the dispatcher routes on
pub trait RequestParts {
    /// HTTP method token
    fn method(&self) -> &Method;
    /// Request path, without query string
    fn path(&self) -> &str;
}

impl<B> RequestParts for http::Request<B> {
    fn method(&self) -> &Method {
        http::Request::method(self)
    }

    fn path(&self) -> &str {
        self.uri().path()
    }
}

/// Minimal request carrying only what routing needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path
    pub path: String,
}

impl RequestHead {
    /// Create a request head from a method and path
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

impl RequestParts for RequestHead {
    fn method(&self) -> &Method {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }
}

/// A route handler
///
/// Invoked with the response sink, the request and the parameters captured
/// for this request. Implemented for every matching closure:
///
/// ```rust
/// use tailrouter::dispatcher::{Handler, RequestHead};
/// use tailrouter::router::Params;
///
/// fn assert_handler<H: Handler<RequestHead, String>>(_: H) {}
/// assert_handler(|res: &mut String, _req: &RequestHead, params: &Params| {
///     res.push_str(params.get("id").unwrap_or("none"));
/// });
/// ```
pub trait Handler<Req, Res>: Send + Sync {
    /// Handle one request
    fn call(&self, res: &mut Res, req: &Req, params: &Params);
}

impl<F, Req, Res> Handler<Req, Res> for F
where
    F: Fn(&mut Res, &Req, &Params) + Send + Sync,
{
    fn call(&self, res: &mut Res, req: &Req, params: &Params) {
        self(res, req, params)
    }
}

/// Shared, type-erased handler as stored in the routing table
pub type BoxedHandler<Req, Res> = Arc<dyn Handler<Req, Res>>;

/// Outcome of [`Dispatcher::dispatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// A route matched and its handler ran
    Handled,
    /// No route matched; the not-found handler ran if one is set
    NotFound,
}

/// A matched route, ready to be invoked for one request
pub struct RouteMatch<'d, Req, Res> {
    handler: &'d dyn Handler<Req, Res>,
    /// Parameters captured for this request
    pub params: Params,
}

impl<Req, Res> RouteMatch<'_, Req, Res> {
    /// Run the matched handler with this request's parameters
    pub fn invoke(&self, res: &mut Res, req: &Req) {
        self.handler.call(res, req, &self.params);
    }
}

impl<Req, Res> fmt::Debug for RouteMatch<'_, Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Dispatch table from `(method, path)` to handlers
///
/// Build it at startup with [`Dispatcher::register`], then share it
/// immutably (e.g. behind an `Arc`) with every request-handling thread.
pub struct Dispatcher<Req, Res> {
    router: Router<BoxedHandler<Req, Res>>,
    not_found: Option<BoxedHandler<Req, Res>>,
}

impl<Req, Res> Default for Dispatcher<Req, Res> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Res> Dispatcher<Req, Res> {
    /// Create an empty dispatcher
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::from_env())
    }

    /// Create an empty dispatcher with explicit runtime configuration
    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Dispatcher {
            router: Router::with_config(config),
            not_found: None,
        }
    }

    /// Register `handler` for `method` and the route `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the [`RouteError`] describing why the route cannot be added.
    /// Startup code should treat any error as fatal: the route table would
    /// otherwise be inconsistent.
    pub fn register<H>(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), RouteError>
    where
        H: Handler<Req, Res> + 'static,
    {
        self.router.insert(method, pattern, Arc::new(handler))
    }

    /// Set the handler invoked when no route matches
    pub fn set_not_found<H>(&mut self, handler: H)
    where
        H: Handler<Req, Res> + 'static,
    {
        self.not_found = Some(Arc::new(handler));
    }

    /// Find the handler for `method` and `path` without invoking it
    #[must_use]
    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, Req, Res>> {
        self.router.at(method, path).map(|m| RouteMatch {
            handler: &**m.value,
            params: m.params,
        })
    }

    /// The underlying routing table
    #[must_use]
    pub fn router(&self) -> &Router<BoxedHandler<Req, Res>> {
        &self.router
    }

    /// Human-readable `METHOD pattern` lines for every registered route
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.router.routes()
    }
}

impl<Req: RequestParts, Res> Dispatcher<Req, Res> {
    /// Route `req` and invoke the matching handler.
    ///
    /// Handler panics are not caught here; fault isolation belongs to the
    /// server layer calling this.
    pub fn dispatch(&self, res: &mut Res, req: &Req) -> Dispatched {
        let method = req.method();
        let path = req.path();

        match self.lookup(method, path) {
            Some(route) => {
                debug!(
                    method = %method,
                    path = %path,
                    params_count = route.params.len(),
                    "Dispatching to handler"
                );
                route.invoke(res, req);
                Dispatched::Handled
            }
            None => {
                debug!(
                    method = %method,
                    path = %path,
                    has_fallback = self.not_found.is_some(),
                    "No handler for request"
                );
                if let Some(handler) = &self.not_found {
                    handler.call(res, req, &Params::new());
                }
                Dispatched::NotFound
            }
        }
    }
}
