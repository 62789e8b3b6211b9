//! Route-pattern parsing.
//!
//! A canonical route pattern is split on `/` and every piece is classified by
//! its leading marker:
//!
//! | Syntax          | Segment                                      |
//! |-----------------|----------------------------------------------|
//! | `users`         | literal, matched by string equality          |
//! | `:id`           | named, matches one non-empty path element    |
//! | `*rest`         | catch-all, matches the remainder of the path |
//! | `#user:^[a-z]+$`| named, additionally constrained by a regex   |
//!
//! Parsing validates the whole pattern before the trie is touched, so a
//! syntax error never leaves a half-inserted route behind.

use std::fmt;

use regex::Regex;

use super::error::RouteError;

const NAMED_MARKER: char = ':';
const CATCH_ALL_MARKER: char = '*';
const REGEX_MARKER: char = '#';

/// One parsed segment of a route pattern
#[derive(Debug, Clone)]
pub(crate) enum Segment<'p> {
    Literal(&'p str),
    Named(&'p str),
    CatchAll(&'p str),
    Regex {
        name: &'p str,
        /// Pattern text as written in the route
        source: &'p str,
        /// Compiled whole-segment matcher
        regex: Regex,
    },
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Named(name) => write!(f, "{NAMED_MARKER}{name}"),
            Segment::CatchAll(name) => write!(f, "{CATCH_ALL_MARKER}{name}"),
            Segment::Regex { name, source, .. } => {
                write!(f, "{REGEX_MARKER}{name}{NAMED_MARKER}{source}")
            }
        }
    }
}

/// Split a canonical pattern into validated segments.
///
/// `canonical` must be the output of [`crate::path::normalize`]; `pattern` is
/// the text the caller registered and is only used in error messages. A
/// trailing slash yields a final empty literal segment, except for the root
/// pattern `/`, which has no segments at all.
pub(crate) fn parse<'p>(canonical: &'p str, pattern: &str) -> Result<Vec<Segment<'p>>, RouteError> {
    let rest = canonical.strip_prefix('/').unwrap_or(canonical);
    if rest.is_empty() {
        return Ok(Vec::new());
    }
    let count = rest.split('/').count();
    let mut segments = Vec::with_capacity(count);

    for (idx, raw) in rest.split('/').enumerate() {
        let segment = parse_segment(raw, pattern)?;
        if let Segment::CatchAll(name) = &segment {
            if idx + 1 != count {
                return Err(RouteError::CatchAllNotLast {
                    pattern: pattern.to_string(),
                    name: name.to_string(),
                });
            }
        }
        segments.push(segment);
    }

    Ok(segments)
}

fn parse_segment<'p>(raw: &'p str, pattern: &str) -> Result<Segment<'p>, RouteError> {
    let segment = if let Some(name) = raw.strip_prefix(NAMED_MARKER) {
        Segment::Named(non_empty_name(name, pattern)?)
    } else if let Some(name) = raw.strip_prefix(CATCH_ALL_MARKER) {
        Segment::CatchAll(non_empty_name(name, pattern)?)
    } else if let Some(spec) = raw.strip_prefix(REGEX_MARKER) {
        parse_regex(spec, pattern)?
    } else {
        Segment::Literal(raw)
    };
    Ok(segment)
}

fn parse_regex<'p>(spec: &'p str, pattern: &str) -> Result<Segment<'p>, RouteError> {
    let (name, source) = match spec.split_once(NAMED_MARKER) {
        Some((name, source)) => (name, source),
        None => (spec, ""),
    };
    let name = non_empty_name(name, pattern)?;

    if source.is_empty() {
        return Err(RouteError::MissingRegex {
            pattern: pattern.to_string(),
            name: name.to_string(),
        });
    }

    let invalid = |err| RouteError::InvalidRegex {
        pattern: pattern.to_string(),
        name: name.to_string(),
        source: err,
    };

    // Compile the raw text first so an unbalanced group cannot escape the anchors below
    Regex::new(source).map_err(invalid)?;
    let regex = Regex::new(&format!("^(?:{source})$")).map_err(invalid)?;

    Ok(Segment::Regex {
        name,
        source,
        regex,
    })
}

fn non_empty_name<'p>(name: &'p str, pattern: &str) -> Result<&'p str, RouteError> {
    if name.is_empty() {
        return Err(RouteError::EmptyParamName {
            pattern: pattern.to_string(),
        });
    }
    Ok(name)
}
