//! # Route Declarations
//!
//! Input side of the router: the [`RouteDecl`] type describing one route and
//! loaders that read an ordered list of declarations from YAML or JSON.
//!
//! A declaration file is either a top-level sequence or a mapping with a
//! `routes` key:
//!
//! ```yaml
//! routes:
//!   - path: users/long/:id
//!     method: POST
//!     handler: { body: create_user }
//!     constraints: { id: '\d+' }
//!     owner: accounts
//! ```
//!
//! Any field besides `path`, `method`, `handler` and `constraints` (here
//! `owner`) is kept verbatim and echoed back in every match of that route.

mod load;
mod types;

pub use load::*;
pub use types::*;
