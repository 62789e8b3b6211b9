//! # Dispatcher Module
//!
//! The dispatcher owns the routing table of handlers and hands each request to
//! the handler of its route, together with the parameters captured from the
//! path.
//!
//! ## Request Flow
//!
//! 1. The request-handling layer calls [`Dispatcher::dispatch`] with a response
//!    sink and the request
//! 2. The router normalizes the path and walks the method's trie
//! 3. On a match, the handler runs with a [`Params`](crate::router::Params)
//!    value owned by this request alone
//! 4. On a miss, the not-found handler runs if one is set, and
//!    [`Dispatched::NotFound`] is returned either way
//!
//! ## Handler Registration
//!
//! ```rust
//! use http::Method;
//! use tailrouter::dispatcher::{Dispatched, Dispatcher, RequestHead};
//! use tailrouter::router::Params;
//!
//! # fn main() -> Result<(), tailrouter::router::RouteError> {
//! let mut dispatcher: Dispatcher<RequestHead, String> = Dispatcher::new();
//! dispatcher.register(
//!     Method::GET,
//!     "/pets/:id",
//!     |res: &mut String, _req: &RequestHead, params: &Params| {
//!         res.push_str(params.get("id").unwrap_or_default());
//!     },
//! )?;
//!
//! let mut body = String::new();
//! let outcome = dispatcher.dispatch(&mut body, &RequestHead::new(Method::GET, "/pets/42"));
//! assert_eq!(outcome, Dispatched::Handled);
//! assert_eq!(body, "42");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - Registration conflicts are returned as [`RouteError`](crate::router::RouteError)
//! - A missing route is a normal [`Dispatched::NotFound`] outcome, not an error
//! - Handler panics propagate to the caller, which owns fault isolation

mod core;

pub use core::{BoxedHandler, Dispatched, Dispatcher, Handler, RequestHead, RequestParts, RouteMatch};
