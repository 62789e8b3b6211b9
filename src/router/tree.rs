//! Segment trie for HTTP route matching
//!
//! Each node stands for one path segment. Lookup walks one node per request
//! segment, so its cost is proportional to path depth and independent of the
//! number of registered routes.
//!
//! ## Structure
//!
//! A node's children are either a set of literal segments or exactly one
//! dynamic segment (named, regex-constrained or catch-all), never both.
//! Because of that, lookup never has to backtrack: at each depth there is at
//! most one candidate child, and a failed dynamic match is a definite miss.
//!
//! ```text
//! (root)
//! └── api
//!     ├── user
//!     │   └── :id
//!     │       └── :post        GET /api/user/:id/:post
//!     └── ...
//! ```
//!
//! Insertion rejects anything that would break this shape; see
//! [`RouteError::Conflict`].

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use super::error::RouteError;
use super::params::Params;
use super::segment::{self, Segment};
use crate::path::normalize;

/// Kind of a dynamic child
enum ParamKind {
    Named,
    CatchAll,
    Regex {
        /// Pattern text as written in the route
        source: Box<str>,
        /// Anchored matcher compiled from `source`
        regex: Regex,
    },
}

/// The single dynamic child of a node
struct ParamChild<T> {
    name: Arc<str>,
    kind: ParamKind,
    node: Node<T>,
}

impl<T> ParamChild<T> {
    /// Whether `other` denotes the same dynamic segment as `self`
    fn same_segment(&self, other: &Self) -> bool {
        if self.name != other.name {
            return false;
        }
        match (&self.kind, &other.kind) {
            (ParamKind::Named, ParamKind::Named) | (ParamKind::CatchAll, ParamKind::CatchAll) => {
                true
            }
            (ParamKind::Regex { source: a, .. }, ParamKind::Regex { source: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl<T> fmt::Display for ParamChild<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParamKind::Named => write!(f, ":{}", self.name),
            ParamKind::CatchAll => write!(f, "*{}", self.name),
            ParamKind::Regex { source, .. } => write!(f, "#{}:{}", self.name, source),
        }
    }
}

/// Node in the segment trie
///
/// Invariant: `literals` and `param` are never both populated.
pub(crate) struct Node<T> {
    /// Value bound to the route that ends at this node
    value: Option<T>,
    /// Literal children, sorted by segment text
    literals: Vec<(Box<str>, Node<T>)>,
    /// Dynamic child, exclusive with `literals`
    param: Option<Box<ParamChild<T>>>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            value: None,
            literals: Vec::new(),
            param: None,
        }
    }
}

impl<T> Node<T> {
    /// Insert a route pattern, binding `value` to its terminal node.
    ///
    /// `method` is only used to describe a duplicate route. On error the trie
    /// is left untouched: the pattern is fully parsed before any node is
    /// created, and conflicts can only be found on nodes that already existed.
    pub(crate) fn insert(&mut self, method: &str, pattern: &str, value: T) -> Result<(), RouteError> {
        let canonical = normalize(pattern);
        let segments = segment::parse(&canonical, pattern)?;

        let mut node = self;
        for segment in segments {
            node = node.child_for(segment, pattern)?;
        }

        if node.value.is_some() {
            return Err(RouteError::DuplicateRoute {
                method: method.to_string(),
                pattern: pattern.to_string(),
            });
        }
        node.value = Some(value);
        Ok(())
    }

    /// Descend into the child for `segment`, creating it if absent
    fn child_for(&mut self, segment: Segment<'_>, pattern: &str) -> Result<&mut Node<T>, RouteError> {
        let (name, kind) = match segment {
            Segment::Literal(text) => return self.literal_child(text, pattern),
            Segment::Named(name) => (name, ParamKind::Named),
            Segment::CatchAll(name) => (name, ParamKind::CatchAll),
            Segment::Regex {
                name,
                source,
                regex,
            } => (
                name,
                ParamKind::Regex {
                    source: source.into(),
                    regex,
                },
            ),
        };
        let incoming = ParamChild {
            name: Arc::from(name),
            kind,
            node: Node::default(),
        };

        if let Some((text, _)) = self.literals.first() {
            return Err(conflict(pattern, &incoming, text));
        }
        if let Some(existing) = &self.param {
            if !existing.same_segment(&incoming) {
                return Err(conflict(pattern, &incoming, existing));
            }
        }

        let child = self.param.get_or_insert_with(|| Box::new(incoming));
        Ok(&mut child.node)
    }

    fn literal_child(&mut self, text: &str, pattern: &str) -> Result<&mut Node<T>, RouteError> {
        if let Some(existing) = &self.param {
            return Err(conflict(pattern, &text, existing));
        }
        let idx = match self.literals.binary_search_by(|(t, _)| (**t).cmp(text)) {
            Ok(idx) => idx,
            Err(idx) => {
                self.literals.insert(idx, (text.into(), Node::default()));
                idx
            }
        };
        Ok(&mut self.literals[idx].1)
    }

    /// Find the value for a canonical `path`, pushing captures into `params`.
    ///
    /// On a miss `params` may hold captures from the segments walked before the
    /// failure; callers own it per lookup and discard it.
    pub(crate) fn lookup<'n>(&'n self, path: &str, params: &mut Params) -> Option<&'n T> {
        let mut node = self;
        let mut rest = path;

        loop {
            // `rest` is either empty or starts with the separator
            let Some(tail) = rest.strip_prefix('/') else {
                return node.value.as_ref();
            };
            let (segment, next) = match tail.find('/') {
                Some(idx) => tail.split_at(idx),
                None => (tail, ""),
            };
            // Canonical paths only produce an empty segment after a trailing slash
            let trailing_slash = segment.is_empty();

            if let Some(param) = &node.param {
                match &param.kind {
                    ParamKind::CatchAll => {
                        params.push(&param.name, rest);
                        return param.node.value.as_ref();
                    }
                    ParamKind::Named => {
                        if trailing_slash {
                            return node.value.as_ref();
                        }
                    }
                    ParamKind::Regex { regex, .. } => {
                        if trailing_slash {
                            return node.value.as_ref();
                        }
                        if !regex.is_match(segment) {
                            return None;
                        }
                    }
                }
                params.push(&param.name, segment);
                node = &param.node;
            } else {
                match node.literals.binary_search_by(|(t, _)| (**t).cmp(segment)) {
                    Ok(idx) => node = &node.literals[idx].1,
                    Err(_) if trailing_slash => return node.value.as_ref(),
                    Err(_) => return None,
                }
            }

            rest = next;
        }
    }

    /// Collect every bound route below this node as `(pattern, value)`
    pub(crate) fn collect_routes<'n>(&'n self, prefix: &mut String, out: &mut Vec<(String, &'n T)>) {
        if let Some(value) = &self.value {
            let pattern = if prefix.is_empty() { "/".to_string() } else { prefix.clone() };
            out.push((pattern, value));
        }

        let len = prefix.len();
        for (text, child) in &self.literals {
            prefix.push('/');
            prefix.push_str(text);
            child.collect_routes(prefix, out);
            prefix.truncate(len);
        }
        if let Some(param) = &self.param {
            prefix.push('/');
            prefix.push_str(&param.to_string());
            param.node.collect_routes(prefix, out);
            prefix.truncate(len);
        }
    }

    /// Number of bound routes below this node
    pub(crate) fn count(&self) -> usize {
        let own = usize::from(self.value.is_some());
        let literals: usize = self.literals.iter().map(|(_, child)| child.count()).sum();
        let param = self.param.as_ref().map_or(0, |p| p.node.count());
        own + literals + param
    }
}

fn conflict(pattern: &str, segment: &dyn fmt::Display, existing: &dyn fmt::Display) -> RouteError {
    RouteError::Conflict {
        pattern: pattern.to_string(),
        segment: segment.to_string(),
        existing: existing.to_string(),
    }
}
