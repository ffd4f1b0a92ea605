use std::fmt;

/// Errors produced while building a [`Router`](crate::router::Router) or
/// dispatching a request against it.
///
/// Dispatch failures collapse into two variants: a request path
/// that cannot be split into segments, and everything else ("no such path").
/// Unknown paths, wrong methods and rejected constraints are all reported as
/// [`RouterError::NoMatch`].
#[derive(Debug)]
pub enum RouterError {
    /// Request path split into zero segments but is not the root path `/`
    MalformedPath {
        /// The rejected request path
        path: String,
    },
    /// No route in the tree accepts this request
    NoMatch {
        /// The request path
        path: String,
        /// The request method
        method: String,
    },
    /// A declaration's method is not a valid HTTP method token
    InvalidMethod {
        /// Position of the declaration in the input sequence
        route_index: usize,
        /// The offending method string
        method: String,
    },
    /// A declaration's constraint failed to compile
    InvalidConstraint {
        /// Position of the declaration in the input sequence
        route_index: usize,
        /// Parameter name the constraint is attached to
        param: String,
        /// The constraint source as declared
        pattern: String,
        /// Underlying regex compilation error
        source: regex::Error,
    },
}

impl RouterError {
    /// True for the request-time failures (`MalformedPath` and `NoMatch`).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RouterError::MalformedPath { .. } | RouterError::NoMatch { .. }
        )
    }
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::MalformedPath { path } | RouterError::NoMatch { path, .. } => {
                write!(f, "No such path -- {}", path)
            }
            RouterError::InvalidMethod {
                route_index,
                method,
            } => {
                write!(
                    f,
                    "route #{}: invalid method '{}'",
                    route_index, method
                )
            }
            RouterError::InvalidConstraint {
                route_index,
                param,
                pattern,
                source,
            } => {
                write!(
                    f,
                    "route #{}: invalid constraint for '{}' ({}): {}",
                    route_index, param, pattern, source
                )
            }
        }
    }
}

impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouterError::InvalidConstraint { source, .. } => Some(source),
            _ => None,
        }
    }
}
