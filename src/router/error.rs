use thiserror::Error;

/// Configuration error raised while registering a route.
///
/// Every variant means the route table is structurally inconsistent. None of
/// them can occur during lookup: the trie only ever holds routes that passed
/// these checks.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A `:name`, `*name` or `#name:re` segment with nothing after the marker
    #[error("parameter name cannot be empty in route '{pattern}'")]
    EmptyParamName {
        /// The offending route pattern
        pattern: String,
    },

    /// A `*name` segment followed by further segments
    #[error("catch-all parameter '*{name}' must be the last segment of route '{pattern}'")]
    CatchAllNotLast {
        /// The offending route pattern
        pattern: String,
        /// Name of the catch-all parameter
        name: String,
    },

    /// A `#name` segment without a `:pattern` half, or with an empty one
    #[error("regex parameter '#{name}' in route '{pattern}' has no pattern")]
    MissingRegex {
        /// The offending route pattern
        pattern: String,
        /// Name of the regex parameter
        name: String,
    },

    /// A `#name:pattern` segment whose pattern does not compile
    #[error("regex parameter '#{name}' in route '{pattern}' does not compile")]
    InvalidRegex {
        /// The offending route pattern
        pattern: String,
        /// Name of the regex parameter
        name: String,
        /// Compilation failure reported by the regex engine
        #[source]
        source: regex::Error,
    },

    /// The segment would share a trie position with an incompatible sibling
    ///
    /// Literal and dynamic segments cannot coexist at the same position, and
    /// neither can two dynamic segments that differ in kind, name or pattern.
    #[error("segment '{segment}' of route '{pattern}' conflicts with existing segment '{existing}'")]
    Conflict {
        /// The offending route pattern
        pattern: String,
        /// The segment being inserted, in route syntax
        segment: String,
        /// The segment already registered at that position, in route syntax
        existing: String,
    },

    /// The exact route is already bound to a handler
    #[error("route {method} '{pattern}' is already registered")]
    DuplicateRoute {
        /// HTTP method of the route
        method: String,
        /// The offending route pattern
        pattern: String,
    },
}
