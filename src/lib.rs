//! # tailrouter
//!
//! **tailrouter** is a URL-path dispatch trie for HTTP services: it maps an HTTP
//! method and a request path to a registered handler, capturing named
//! parameters from the path along the way.
//!
//! ## Overview
//!
//! Routes are registered at startup, validated for ambiguity as they are added,
//! and then shared read-only by every request-handling thread. Each lookup
//! produces its own parameter set, so concurrent requests never observe each
//! other's captures.
//!
//! ## Architecture
//!
//! - **[`path`]** - Canonical path normalization (`//`, `.` and `..` handling)
//! - **[`router`]** - Per-method segment tries with literal, named, catch-all and regex segments
//! - **[`dispatcher`]** - Handler registration and request dispatch
//! - **[`table`]** - Declarative TOML route tables, validated as a whole
//! - **[`runtime_config`]** - Environment-driven runtime settings
//! - **[`logging`]** - `tracing` subscriber setup for binaries
//! - **[`cli`]** - The `tailrouter` command-line tool
//!
//! ## Route Syntax
//!
//! ```text
//! /api/user/:id/:post        named segments
//! /static/*filename          catch-all, captures "/css/site.css"
//! /api/#user:^[a-z]+$/profile regex segment
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use tailrouter::dispatcher::{Dispatched, Dispatcher, RequestHead};
//! use tailrouter::router::Params;
//!
//! # fn main() -> Result<(), tailrouter::router::RouteError> {
//! let mut dispatcher: Dispatcher<RequestHead, Vec<String>> = Dispatcher::new();
//! dispatcher.register(
//!     Method::GET,
//!     "/api/user/:id/:post",
//!     |res: &mut Vec<String>, _req: &RequestHead, params: &Params| {
//!         for (name, value) in params.iter() {
//!             res.push(format!("{name}={value}"));
//!         }
//!     },
//! )?;
//!
//! let mut out = Vec::new();
//! let req = RequestHead::new(Method::GET, "/api/user/12345/request");
//! assert_eq!(dispatcher.dispatch(&mut out, &req), Dispatched::Handled);
//! assert_eq!(out, vec!["id=12345", "post=request"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The library emits `tracing` events only. Route registration is logged at
//! `debug`, rejected routes at `warn`, and lookups slower than
//! [`runtime_config::SLOW_LOOKUP_ENV`] at `warn`. Call
//! [`logging::init_logging`] from a binary to install a subscriber.

pub mod cli;
pub mod dispatcher;
pub mod logging;
pub mod path;
pub mod router;
pub mod runtime_config;
pub mod table;

pub use dispatcher::{Dispatched, Dispatcher, Handler, RequestHead, RequestParts};
pub use router::{Params, RouteError, Router};
