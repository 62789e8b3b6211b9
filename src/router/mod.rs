//! # Router Module
//!
//! The router module maps an HTTP method and request path to a registered value
//! and the parameters captured from the path.
//!
//! ## Route Syntax
//!
//! | Syntax           | Matches                                                        |
//! |------------------|----------------------------------------------------------------|
//! | `/users`         | the literal segment `users`                                    |
//! | `/users/:id`     | any non-empty segment, captured as `id`                        |
//! | `/files/*path`   | the rest of the path including its leading `/`, as `path`      |
//! | `/#user:^[a-z]+$`| a segment that fully matches the regex, captured as `user`     |
//!
//! A catch-all must be the last segment of its route. A trailing `/` in a
//! pattern is significant: `/docs/` and `/docs` are different routes.
//!
//! ## Architecture
//!
//! Routes are stored in one segment trie per HTTP method. Registration
//! normalizes the pattern, parses it into segments and inserts them, rejecting
//! any route that would make matching ambiguous. Lookup normalizes the request
//! path and walks the trie one segment at a time.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use tailrouter::router::Router;
//!
//! # fn main() -> Result<(), tailrouter::router::RouteError> {
//! let mut router = Router::new();
//! router.insert(Method::GET, "/api/user/:id/:post", "get_post")?;
//! router.insert(Method::GET, "/api/files/*filename", "get_file")?;
//!
//! let m = router.at(&Method::GET, "/api/user/12345/request").expect("route matches");
//! assert_eq!(*m.value, "get_post");
//! assert_eq!(m.params.get("id"), Some("12345"));
//! assert_eq!(m.params.get("post"), Some("request"));
//! # Ok(())
//! # }
//! ```

mod core;
mod error;
mod params;
mod segment;
mod tree;

pub use core::{Match, Router};
pub use error::RouteError;
pub use params::{ParamVec, Params, MAX_INLINE_PARAMS};
