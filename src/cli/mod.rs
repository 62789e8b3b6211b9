//! # CLI Module
//!
//! Command-line tools for working with route tables before they are deployed.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Validate every route of a table and report all conflicts at once:
//!
//! ```bash
//! tailrouter check routes.toml
//! ```
//!
//! ### `routes`
//!
//! List the registered routes, grouped by method:
//!
//! ```bash
//! tailrouter routes routes.toml
//! ```
//!
//! ### `match`
//!
//! Resolve one request against a table and show the captured parameters:
//!
//! ```bash
//! tailrouter match routes.toml GET /api/user/12345/request
//! tailrouter match routes.toml GET /api/user/12345/request --json
//! ```
//!
//! Every command exits non-zero when the table is invalid; `match` also exits
//! non-zero when no route matches.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{execute, run_cli, Cli, CommandStatus, Commands};
