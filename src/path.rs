//! # Path Normalization
//!
//! Canonicalizes request paths and route patterns into the single form the
//! routing trie matches against.
//!
//! ## Canonical Form
//!
//! - Exactly one leading `/`
//! - No empty segments (`//` collapses to `/`)
//! - No `.` segments, and every `..` resolved against the preceding segment
//! - Ascent above the root is clamped to the root (`/../a` → `/a`)
//! - A trailing `/` is kept when the input denotes a directory: it ends in `/`,
//!   or its last segment is `.` or `..`
//!
//! ## Example
//!
//! ```rust
//! use tailrouter::path::normalize;
//!
//! assert_eq!(normalize("/a//b"), "/a/b");
//! assert_eq!(normalize("/a/b/.."), "/a/");
//! assert_eq!(normalize("a/b"), "/a/b");
//! ```
//!
//! ## Performance
//!
//! Almost every real request path is already canonical. [`normalize`] checks for
//! that first and hands back the input as [`Cow::Borrowed`], so the common case
//! allocates nothing.

use std::borrow::Cow;

/// Returns `true` if `path` is already in canonical form.
///
/// Scans the path once without allocating.
#[must_use]
pub fn is_canonical(path: &str) -> bool {
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };

    let mut segments = rest.split('/').peekable();
    while let Some(segment) = segments.next() {
        let last = segments.peek().is_none();
        match segment {
            // A single trailing slash is significant, any other empty segment is not
            "" if !last => return false,
            "." | ".." => return false,
            _ => {}
        }
    }
    true
}

/// Canonicalize `path`.
///
/// Returns the input unchanged (borrowed) when it is already canonical.
/// An empty input normalizes to `/`. Never fails: `..` past the root is
/// clamped rather than rejected.
#[must_use]
pub fn normalize(path: &str) -> Cow<'_, str> {
    if is_canonical(path) {
        return Cow::Borrowed(path);
    }

    // Invariant: `out` always starts and ends with '/'
    let mut out = String::with_capacity(path.len() + 1);
    out.push('/');
    let mut trailing_slash = false;

    let mut segments = path.split('/').peekable();
    while let Some(segment) = segments.next() {
        let last = segments.peek().is_none();
        match segment {
            "" | "." => trailing_slash = last,
            ".." => {
                pop_segment(&mut out);
                trailing_slash = last;
            }
            other => {
                out.push_str(other);
                out.push('/');
                trailing_slash = false;
            }
        }
    }

    if !trailing_slash && out.len() > 1 {
        out.pop();
    }
    Cow::Owned(out)
}

/// Drop the last written segment of `out`, never the root slash.
fn pop_segment(out: &mut String) {
    if out.len() <= 1 {
        return;
    }
    out.pop();
    let keep = out.rfind('/').map_or(1, |idx| idx + 1);
    out.truncate(keep);
}
