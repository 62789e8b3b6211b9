//! Router core module - hot path for request routing.
//!
//! Registration happens once at startup; lookups are read-only and may run
//! from any number of threads at once. Captured parameters are returned by
//! value with each [`Match`], never stored in the router.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::error::RouteError;
use super::params::Params;
use super::tree::Node;
use crate::path::normalize;
use crate::runtime_config::RuntimeConfig;

/// Result of successfully matching a request path to a route
#[derive(Debug)]
pub struct Match<'r, T> {
    /// The value registered for the matched route
    pub value: &'r T,
    /// Values captured from dynamic segments, owned by this request
    pub params: Params,
}

/// Router that maps `(method, path)` to a registered value
///
/// Holds one segment trie per HTTP method. Methods are an open set: any token
/// accepted by [`http::Method`] can carry routes, including extension methods.
///
/// # Performance
///
/// - Route matching: O(d) where d is the path depth, not the number of routes
/// - Purely literal matches do not allocate for parameters
/// - Already-canonical paths are matched without copying
pub struct Router<T> {
    /// One trie root per method
    roots: HashMap<Method, Node<T>>,
    slow_lookup: Duration,
}

impl<T> fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&str> = self.roots.keys().map(Method::as_str).collect();
        methods.sort_unstable();
        f.debug_struct("Router")
            .field("methods", &methods)
            .field("routes", &self.len())
            .finish_non_exhaustive()
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Create an empty router, reading runtime knobs from the environment
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::from_env())
    }

    /// Create an empty router with explicit runtime configuration
    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            roots: HashMap::new(),
            slow_lookup: config.slow_lookup,
        }
    }

    /// Register `value` for `method` and the route `pattern`.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] when the pattern is malformed, when it would
    /// mask or be masked by an existing route, or when the exact route is
    /// already registered. The router is unchanged on error.
    pub fn insert(&mut self, method: Method, pattern: &str, value: T) -> Result<(), RouteError> {
        let result = match self.roots.get_mut(&method) {
            Some(root) => root.insert(method.as_str(), pattern, value),
            None => {
                // A method's root exists only once it holds a route
                let mut root = Node::default();
                let result = root.insert(method.as_str(), pattern, value);
                if result.is_ok() {
                    self.roots.insert(method.clone(), root);
                }
                result
            }
        };

        match &result {
            Ok(()) => debug!(method = %method, pattern = %pattern, "Route registered"),
            Err(err) => warn!(
                method = %method,
                pattern = %pattern,
                error = %err,
                "Route rejected"
            ),
        }
        result
    }

    /// Match a request to a route
    ///
    /// The path is normalized first, so `/a//b/./c` finds the route `/a/b/c`.
    ///
    /// # Returns
    ///
    /// * `Some(Match)` - the registered value and the captured parameters
    /// * `None` - no route matches (the caller turns this into a 404)
    #[must_use]
    pub fn at(&self, method: &Method, path: &str) -> Option<Match<'_, T>> {
        debug!(method = %method, path = %path, "Route match attempt");
        let start = Instant::now();

        let canonical = normalize(path);
        let mut params = Params::new();
        let value = self
            .roots
            .get(method)
            .and_then(|root| root.lookup(&canonical, &mut params));

        let elapsed = start.elapsed();
        if elapsed > self.slow_lookup {
            warn!(
                method = %method,
                path = %path,
                duration_us = elapsed.as_micros(),
                "Slow route matching detected"
            );
        }

        match value {
            Some(value) => {
                debug!(
                    method = %method,
                    path = %path,
                    params = ?params,
                    duration_us = elapsed.as_micros(),
                    "Route matched"
                );
                Some(Match { value, params })
            }
            None => {
                // Partial captures from a failed walk are dropped with `params`
                debug!(
                    method = %method,
                    path = %path,
                    duration_us = elapsed.as_micros(),
                    "No route matched"
                );
                None
            }
        }
    }

    /// All registered routes as `(method, pattern, value)`
    ///
    /// Sorted by method, then pattern. Patterns are rendered in route syntax
    /// (`:name`, `*name`, `#name:re`) in their canonical form.
    #[must_use]
    pub fn route_entries(&self) -> Vec<(Method, String, &T)> {
        let mut methods: Vec<&Method> = self.roots.keys().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        let mut entries = Vec::with_capacity(self.len());
        for method in methods {
            let mut routes = Vec::new();
            if let Some(root) = self.roots.get(method) {
                root.collect_routes(&mut String::new(), &mut routes);
            }
            entries.extend(
                routes
                    .into_iter()
                    .map(|(pattern, value)| (method.clone(), pattern, value)),
            );
        }
        entries
    }

    /// Human-readable `METHOD pattern` lines for every registered route
    ///
    /// For diagnostics only; not part of the matching contract.
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.route_entries()
            .into_iter()
            .map(|(method, pattern, _)| format!("{method} {pattern}"))
            .collect()
    }

    /// Log every registered route at `info` level
    pub fn dump_routes(&self) {
        let routes = self.routes();
        info!(routes_count = routes.len(), "Routing table loaded");
        for route in &routes {
            info!(route = %route, "Route");
        }
    }

    /// Total number of registered routes across all methods
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.values().map(Node::count).sum()
    }

    /// `true` when no route is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methods_have_separate_tables() {
        let mut router = Router::new();
        router.insert(Method::GET, "/items", "get_items").expect("GET");
        router.insert(Method::POST, "/items", "create_item").expect("POST");

        assert_eq!(router.at(&Method::GET, "/items").map(|m| *m.value), Some("get_items"));
        assert_eq!(router.at(&Method::POST, "/items").map(|m| *m.value), Some("create_item"));
        assert!(router.at(&Method::PUT, "/items").is_none());
    }

    #[test]
    fn test_same_pattern_under_other_method_is_not_a_duplicate() {
        let mut router = Router::new();
        router.insert(Method::GET, "/user/:id", 1).expect("GET");
        router.insert(Method::DELETE, "/user/:id", 2).expect("DELETE");
        // Different dynamic name is fine under a different method
        router.insert(Method::PUT, "/user/:name", 3).expect("PUT");

        let err = router.insert(Method::GET, "/user/:id", 4).expect_err("duplicate");
        assert!(matches!(err, RouteError::DuplicateRoute { ref method, .. } if method == "GET"));
        assert_eq!(router.len(), 3);
    }

    #[test]
    fn test_extension_method() {
        let purge = Method::from_bytes(b"PURGE").expect("valid method token");
        let mut router = Router::new();
        router.insert(purge.clone(), "/cache/*key", ()).expect("PURGE");

        let m = router.at(&purge, "/cache/a/b").expect("route should match");
        assert_eq!(m.params.get("key"), Some("/a/b"));
    }

    #[test]
    fn test_routes_listing() {
        let mut router = Router::new();
        router.insert(Method::POST, "/b", ()).expect("insert");
        router.insert(Method::GET, "/a/:id", ()).expect("insert");
        router.insert(Method::GET, "c/static//", ()).expect("insert");

        assert_eq!(
            router.routes(),
            vec!["GET /a/:id", "GET /c/static/", "POST /b"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
        assert!(!router.is_empty());
    }

    #[test]
    fn test_rejected_route_does_not_create_a_method_table() {
        let mut router = Router::new();
        router.insert(Method::GET, "/a/:id", ()).expect("insert");
        assert!(router.insert(Method::PUT, "/a/*rest/b", ()).is_err());
        assert!(router.insert(Method::GET, "/a/list", ()).is_err());

        assert_eq!(
            format!("{router:?}"),
            r#"Router { methods: ["GET"], routes: 1, .. }"#
        );
    }

    #[test]
    fn test_debug_lists_methods_in_order() {
        let mut router = Router::new();
        router.insert(Method::POST, "/b", 1).expect("insert");
        router.insert(Method::GET, "/a", 2).expect("insert");
        router.insert(Method::GET, "/", 3).expect("insert");

        assert_eq!(
            format!("{router:?}"),
            r#"Router { methods: ["GET", "POST"], routes: 3, .. }"#
        );
    }

    #[test]
    fn test_empty_router() {
        let router: Router<()> = Router::new();
        assert!(router.is_empty());
        assert!(router.at(&Method::GET, "/").is_none());
        assert!(router.routes().is_empty());
    }
}
