//! # segroute
//!
//! **segroute** is a segment-trie request router: it resolves a request path
//! and method to exactly one declared route, binding `:param` segments along
//! the way and returning the route's opaque handler payload.
//!
//! ## Overview
//!
//! Routes are declared as an ordered list of [`RouteDecl`]s. Each declaration
//! has a `/`-separated path pattern, a method (`GET` when absent), a handler
//! payload of any type, optional per-parameter regex constraints and any
//! number of extra fields that are returned untouched on match.
//!
//! ## Architecture
//!
//! - **[`declaration`]** - Route declaration types and YAML/JSON loaders
//! - **[`router`]** - Segment splitting, constraints, the trie and dispatch
//! - **[`shared`]** - Atomically swappable router handle for concurrent readers
//! - **[`hot_reload`]** - Rebuild a shared router when its route file changes
//! - **[`runtime_config`]** - Environment-driven router configuration
//! - **[`otel`]** - Structured logging setup for binaries embedding the router
//! - **[`error`]** - Build and dispatch error taxonomy
//! - **[`cli`]** - The `segroute` command-line tool
//!
//! ### Dispatch Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Router
//!     participant Trie as TrieNode
//!
//!     Caller->>Router: dispatch("api/v1/Risc/", PUT)
//!     Router->>Router: split_segments -> [api, v1, Risc]
//!     loop each segment
//!         Router->>Trie: static child?
//!         alt static hit
//!             Trie-->>Router: descend
//!         else dynamic edges in order
//!             Trie-->>Router: first accepting edge binds param
//!         end
//!     end
//!     Router->>Trie: first binding with method + constraints
//!     alt found
//!         Router-->>Caller: RouteMatch { handler, params, extra }
//!     else
//!         Router-->>Caller: No such path -- api/v1/Risc/
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use segroute::{RouteDecl, Router};
//!
//! let router = Router::new(vec![
//!     RouteDecl::new("users/long/:id", "create")
//!         .with_method("POST")
//!         .with_constraint("id", r"\d+"),
//!     RouteDecl::new("users/long/:way", "show").with_constraint("way", "[a-z]"),
//!     RouteDecl::new("users/long/way/:name", "by_name"),
//!     RouteDecl::new("/", "root"),
//! ])
//! .unwrap();
//!
//! let m = router.dispatch_str("users/long/1", "POST").unwrap();
//! assert_eq!(*m.handler, "create");
//! assert_eq!(m.get_param("id"), Some("1"));
//!
//! let m = router.dispatch_get("users/long/way/to").unwrap();
//! assert_eq!(*m.handler, "by_name");
//!
//! let err = router.dispatch_get("nope").unwrap_err();
//! assert_eq!(err.to_string(), "No such path -- nope");
//! ```
//!
//! ## Route Files
//!
//! The CLI and [`hot_reload`] read declarations from YAML or JSON:
//!
//! ```yaml
//! routes:
//!   - path: users/long/:id
//!     method: POST
//!     handler: create_user
//!     constraints:
//!       id: '\d+'
//!   - path: api/to/Japan/
//!     handler: japan
//!     owner: travel        # extra field, returned on match
//! ```
//!
//! ## Matching Rules
//!
//! - A literal segment always wins over a `:param` at the same level.
//! - `:param` edges are tried in declaration order; the first whose
//!   constraint accepts the segment binds it.
//! - At the end of the path the first declaration with the requested method
//!   whose constraints all accept the bound values wins.
//! - The walk never backtracks.
//! - Trailing slashes are ignored; a leading slash is an empty first segment.

pub mod cli;
pub mod declaration;
pub mod error;
pub mod hot_reload;
pub mod otel;
pub mod router;
pub mod runtime_config;
pub mod shared;

pub use declaration::{load_routes, parse_routes_json, parse_routes_yaml, RouteDecl};
pub use error::RouterError;
pub use router::{MatchMode, RouteMatch, Router};
pub use runtime_config::RouterConfig;
pub use shared::SharedRouter;
