//! Path segmentation shared by the builder and the dispatcher.
//!
//! A path is split on `/` and only *trailing* empty segments are dropped:
//!
//! | path     | segments          |
//! |----------|-------------------|
//! | `/`      | `[]`              |
//! | `a/b/`   | `["a", "b"]`      |
//! | `/a`     | `["", "a"]`       |
//! | `a//b`   | `["a", "", "b"]`  |
//! | `""`     | `[]`              |
//!
//! Leading and embedded empty segments are ordinary static segments, so
//! `/users` and `users` are different routes.

use smallvec::SmallVec;

/// Segments held inline before spilling to the heap.
pub const MAX_INLINE_SEGMENTS: usize = 16;

pub type SegmentVec<'a> = SmallVec<[&'a str; MAX_INLINE_SEGMENTS]>;

/// Split `path` into segments, discarding trailing empty ones.
#[must_use]
pub fn split_segments(path: &str) -> SegmentVec<'_> {
    let mut segments: SegmentVec<'_> = path.split('/').collect();
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    segments
}

/// Whether a pattern segment names a parameter (`:name`).
#[inline]
#[must_use]
pub fn is_dynamic(segment: &str) -> bool {
    segment.starts_with(':')
}

/// Parameter name of a dynamic segment, `None` for static segments.
#[inline]
#[must_use]
pub fn param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix(':')
}
