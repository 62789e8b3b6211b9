//! Captured path parameters.
//!
//! A [`Params`] value is produced fresh by every successful lookup and travels
//! with that one request. Nothing is stored in a shared table, so two
//! concurrent requests for the same path can never see each other's captures.

use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum number of captured parameters before heap allocation.
/// Most REST routes have ≤4 dynamic segments.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated capture storage for the hot path.
///
/// Param names use `Arc<str>` because they come from the route tree, built at
/// startup; cloning one is a reference-count increment. Values are per-request
/// data taken from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Values captured from dynamic segments during a single lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: ParamVec,
}

impl Params {
    /// An empty parameter set. Does not allocate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &Arc<str>, value: &str) {
        self.inner.push((Arc::clone(name), value.to_string()));
    }

    /// Get a captured value by parameter name
    ///
    /// Uses "last write wins" semantics: if the same name appears at different
    /// depths (e.g. `/org/:id/user/:id`), returns the deepest capture.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs in path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Number of captured values
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// `true` when the matched route had no dynamic segment
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// `true` once the captures no longer fit inline
    #[must_use]
    pub fn spilled(&self) -> bool {
        self.inner.spilled()
    }

    /// Convert to a HashMap for callers that want owned keys
    /// Note: This allocates - use [`Params::get`] in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.inner
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let id: Arc<str> = Arc::from("id");
        let mut params = Params::new();
        params.push(&id, "org-1");
        params.push(&id, "user-7");

        assert_eq!(params.get("id"), Some("user-7"));
        assert_eq!(params.len(), 2);
        assert_eq!(params.to_map().get("id").map(String::as_str), Some("user-7"));
    }

    #[test]
    fn test_empty_params_do_not_allocate() {
        let params = Params::new();
        assert!(params.is_empty());
        assert!(!params.spilled());
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_iter_preserves_path_order() {
        let mut params = Params::new();
        params.push(&Arc::from("a"), "1");
        params.push(&Arc::from("b"), "2");

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }
}
