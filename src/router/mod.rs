//! # Router Module
//!
//! Path matching and route resolution for segroute.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Building a segment trie from an ordered list of route declarations
//! - Matching incoming `(path, method)` requests against the trie
//! - Binding dynamic segments (`:id`) to named parameters
//! - Returning the winning declaration's handler and extra fields
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Build**: each declaration's pattern is split on `/` and inserted
//!    segment by segment. Literal segments become static children; every
//!    `:param` at a given position shares one dynamic child whose entry edges
//!    remember each declaration's parameter name and constraint. The route
//!    itself is stored at the node its pattern ends on.
//!
//! 2. **Dispatch**: the request path is walked one segment at a time. A static
//!    child always wins; otherwise the first dynamic edge whose constraint
//!    accepts the segment binds the parameter. At the end of the path the
//!    first stored route with the requested method whose own constraints all
//!    accept the bound values is returned.
//!
//! The walk never backtracks. If `files/static/readme` and `files/:name/meta`
//! are both declared, `files/static/meta` does not match: `static` commits the
//! walk to the static branch.
//!
//! ## Example
//!
//! ```rust
//! use segroute::{RouteDecl, Router};
//!
//! let router = Router::new(vec![
//!     RouteDecl::new("api/:id/:uid", "update").with_method("PUT"),
//!     RouteDecl::new("api/to/Japan/", "japan"),
//!     RouteDecl::new("/", "root"),
//! ])
//! .unwrap();
//!
//! let m = router.dispatch_str("api/v1/Risc/", "PUT").unwrap();
//! assert_eq!(*m.handler, "update");
//! assert_eq!(m.get_param("id"), Some("v1"));
//! assert_eq!(m.get_param("uid"), Some("Risc"));
//!
//! assert!(router.dispatch_get("nope/here").is_err());
//! ```
//!
//! ## Performance
//!
//! - Build: O(total segments) plus one regex compilation per constraint
//! - Dispatch: O(depth) static lookups; dynamic levels additionally run the
//!   edge constraints in order until one accepts

mod constraint;
mod core;
pub mod segments;
mod trie;
#[cfg(test)]
mod performance_tests;

pub use self::constraint::{Constraint, MatchMode};
pub use self::core::{ParamVec, RouteMatch, RouteSummary, Router, MAX_INLINE_PARAMS};
