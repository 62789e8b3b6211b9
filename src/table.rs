//! # Route Tables
//!
//! Declarative route tables loaded from TOML, so a whole table can be
//! validated before any traffic is served.
//!
//! ## Format
//!
//! ```toml
//! [[route]]
//! method = "GET"
//! path = "/api/user/:id/:post"
//! handler = "get_post"
//!
//! [[route]]
//! method = "GET"
//! path = "/static/*file"
//! handler = "serve_static"
//! ```
//!
//! Method tokens are case-sensitive, as in HTTP: `GET`, not `get`. Any valid
//! token is accepted, including extension methods such as `PURGE`.
//!
//! ## Validation
//!
//! [`RouteTable::build_router`] inserts every entry and collects *all*
//! failures instead of stopping at the first, so a single run reports every
//! problem in the table.

use anyhow::{Context, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::router::{RouteError, Router};

/// One route of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// HTTP method token
    pub method: String,
    /// Route pattern
    pub path: String,
    /// Name of the handler bound to the route
    pub handler: String,
}

/// A list of routes, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    /// Routes in declaration order
    #[serde(default, rename = "route")]
    pub routes: Vec<RouteEntry>,
}

/// Why a single table entry was rejected
#[derive(Debug, Error)]
pub enum EntryError {
    /// The method is not a valid HTTP token
    #[error("invalid HTTP method '{method}'")]
    InvalidMethod {
        /// Method text as written in the table
        method: String,
    },
    /// The route conflicts with the table or is malformed
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Every rejected entry of a table
#[derive(Debug, Error)]
#[error("route table has {} invalid route(s)", .errors.len())]
pub struct TableError {
    /// `(index in the table, entry, error)` for each rejected route
    pub errors: Vec<(usize, RouteEntry, EntryError)>,
}

impl RouteTable {
    /// Parse a table from TOML text
    ///
    /// # Errors
    ///
    /// Returns the TOML error when the text is not a valid table.
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Insert every route into a fresh router of handler names
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] listing every entry that could not be
    /// registered. Entries are inserted in declaration order, so for two
    /// conflicting routes the later one is reported.
    pub fn build_router(&self) -> std::result::Result<Router<String>, TableError> {
        let mut router = Router::new();
        let mut errors = Vec::new();

        for (idx, entry) in self.routes.iter().enumerate() {
            let result = Method::from_bytes(entry.method.trim().as_bytes())
                .map_err(|_| EntryError::InvalidMethod {
                    method: entry.method.clone(),
                })
                .and_then(|method| {
                    router
                        .insert(method, &entry.path, entry.handler.clone())
                        .map_err(EntryError::from)
                });

            if let Err(err) = result {
                errors.push((idx, entry.clone(), err));
            }
        }

        if !errors.is_empty() {
            return Err(TableError { errors });
        }

        info!(routes_count = router.len(), "Route table validated");
        Ok(router)
    }
}

/// Load a route table from a TOML file
///
/// # Errors
///
/// Fails when the file cannot be read or is not a valid table.
pub fn load_table(path: &Path) -> Result<RouteTable> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read route table {}", path.display()))?;
    RouteTable::from_toml(&text)
        .with_context(|| format!("failed to parse route table {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
[[route]]
method = "GET"
path = "/api/user/:id/:post"
handler = "get_post"

[[route]]
method = "POST"
path = "/api/user/:id"
handler = "update_user"
"#;

    #[test]
    fn test_parse_and_build() {
        let table = RouteTable::from_toml(TABLE).expect("valid table");
        assert_eq!(table.routes.len(), 2);
        assert_eq!(table.routes[0].handler, "get_post");

        let router = table.build_router().expect("valid routes");
        let m = router
            .at(&Method::GET, "/api/user/1/hello")
            .expect("route should match");
        assert_eq!(m.value, "get_post");
        assert_eq!(m.params.get("post"), Some("hello"));
    }

    #[test]
    fn test_empty_table() {
        let table = RouteTable::from_toml("").expect("empty table");
        assert!(table.routes.is_empty());
        assert!(table.build_router().expect("nothing to reject").is_empty());
    }

    #[test]
    fn test_all_errors_are_reported() {
        let table = RouteTable::from_toml(
            r#"
[[route]]
method = "GET"
path = "/user/:id"
handler = "a"

[[route]]
method = "GET"
path = "/user/list"
handler = "b"

[[route]]
method = "BAD METHOD"
path = "/x"
handler = "c"

[[route]]
method = "GET"
path = "/files/*rest/more"
handler = "d"

[[route]]
method = "GET"
path = "/user/:id"
handler = "e"
"#,
        )
        .expect("valid toml");

        let err = table.build_router().expect_err("invalid routes");
        let indices: Vec<usize> = err.errors.iter().map(|(idx, _, _)| *idx).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert!(matches!(err.errors[0].2, EntryError::Route(RouteError::Conflict { .. })));
        assert!(matches!(err.errors[1].2, EntryError::InvalidMethod { .. }));
        assert!(matches!(err.errors[2].2, EntryError::Route(RouteError::CatchAllNotLast { .. })));
        assert!(matches!(err.errors[3].2, EntryError::Route(RouteError::DuplicateRoute { .. })));
        assert_eq!(err.to_string(), "route table has 4 invalid route(s)");
    }

    #[test]
    fn test_missing_field_is_a_parse_error() {
        let result = RouteTable::from_toml("[[route]]\nmethod = \"GET\"\npath = \"/\"\n");
        assert!(result.is_err());
    }
}
