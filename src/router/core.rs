//! Router core: tree construction and request dispatch.
//!
//! Dispatch is on the caller's request path. It allocates nothing beyond the
//! returned [`RouteMatch`] for routes with up to [`MAX_INLINE_PARAMS`]
//! parameters and up to 16 segments.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::constraint::Constraint;
use super::segments::split_segments;
use super::trie::{Binding, TrieNode};
use crate::declaration::{Extra, RouteDecl};
use crate::error::RouterError;
use crate::runtime_config::RouterConfig;

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Bound parameters in binding order.
///
/// Names are `Arc<str>` shared with the tree; values are per-request data.
/// A name appears at most once: rebinding a name overwrites its value.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

#[inline]
pub(crate) fn get_param<'a>(params: &'a ParamVec, name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k.as_ref() == name)
        .map(|(_, v)| v.as_str())
}

#[inline]
pub(crate) fn set_param(params: &mut ParamVec, name: &Arc<str>, value: &str) {
    match params.iter_mut().find(|(k, _)| k == name) {
        Some((_, existing)) => {
            existing.clear();
            existing.push_str(value);
        }
        None => params.push((Arc::clone(name), value.to_owned())),
    }
}

/// Successful dispatch result.
pub struct RouteMatch<H> {
    /// Handler payload of the winning declaration
    pub handler: Arc<H>,
    /// Extra fields of the winning declaration
    pub extra: Arc<Extra>,
    /// Parameters bound while walking the tree
    pub params: ParamVec,
    /// The request path, as given
    pub path: String,
    /// The request method
    pub method: Method,
    /// Path pattern of the winning declaration
    pub pattern: Arc<str>,
}

impl<H> RouteMatch<H> {
    /// Get a bound parameter by name.
    #[inline]
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        get_param(&self.params, name)
    }

    /// Parameters as an owned map.
    /// Note: This allocates - use get_param() in hot paths instead
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

impl<H> Clone for RouteMatch<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            extra: Arc::clone(&self.extra),
            params: self.params.clone(),
            path: self.path.clone(),
            method: self.method.clone(),
            pattern: Arc::clone(&self.pattern),
        }
    }
}

impl<H: fmt::Debug> fmt::Debug for RouteMatch<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("handler", &self.handler)
            .field("params", &self.params)
            .field("path", &self.path)
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("extra", &self.extra)
            .finish()
    }
}

const RESERVED_KEYS: [&str; 5] = ["handler", "method", "path", "pattern", "params"];

struct ParamsRef<'a>(&'a ParamVec);

impl Serialize for ParamsRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k.as_ref(), v.as_str())))
    }
}

/// Flat object: the declaration's extra fields, then `handler`, `method`,
/// `path`, `pattern` and `params`. Extra fields sharing one of those names
/// are left out.
impl<H: Serialize> Serialize for RouteMatch<H> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.extra.iter() {
            if !RESERVED_KEYS.contains(&key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("handler", &*self.handler)?;
        map.serialize_entry("method", self.method.as_str())?;
        map.serialize_entry("path", &self.path)?;
        map.serialize_entry("pattern", &*self.pattern)?;
        map.serialize_entry("params", &ParamsRef(&self.params))?;
        map.end()
    }
}

/// Method and pattern of one declaration, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RouteSummary {
    pub method: String,
    pub path: String,
}

/// Segment-trie router.
///
/// Built once from an ordered list of [`RouteDecl`]s and read-only afterwards,
/// so a built router can be shared across threads and dispatched against
/// concurrently. To change the route set build a new router and swap it in
/// (see [`SharedRouter`](crate::shared::SharedRouter)).
///
/// # Example
///
/// ```rust
/// use segroute::{RouteDecl, Router};
///
/// let router = Router::new(vec![
///     RouteDecl::new("users/long/:id", "create")
///         .with_method("POST")
///         .with_constraint("id", r"\d+"),
///     RouteDecl::new("users/long/:way", "show").with_constraint("way", "[a-z]"),
/// ])
/// .unwrap();
///
/// let m = router.dispatch_str("users/long/a", "GET").unwrap();
/// assert_eq!(*m.handler, "show");
/// assert_eq!(m.get_param("way"), Some("a"));
/// ```
pub struct Router<H> {
    root: TrieNode<H>,
    routes: Vec<RouteSummary>,
    config: RouterConfig,
}

impl<H> Router<H> {
    /// Build a router with the default [`RouterConfig`].
    pub fn new<I>(declarations: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = RouteDecl<H>>,
    {
        Self::with_config(declarations, &RouterConfig::default())
    }

    /// Alias for [`Router::new`].
    pub fn build<I>(declarations: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = RouteDecl<H>>,
    {
        Self::new(declarations)
    }

    /// Build a router, inserting declarations in iteration order.
    ///
    /// Fails on the first declaration with an invalid method or constraint;
    /// no partially built router is returned.
    pub fn with_config<I>(declarations: I, config: &RouterConfig) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = RouteDecl<H>>,
    {
        let mut root = TrieNode::new();
        let mut routes = Vec::new();

        for (index, decl) in declarations.into_iter().enumerate() {
            let RouteDecl {
                path,
                method,
                handler,
                constraints,
                extra,
            } = decl;

            let method_str = method.as_deref().unwrap_or(crate::declaration::DEFAULT_METHOD);
            let method = Method::from_bytes(method_str.as_bytes()).map_err(|_| {
                RouterError::InvalidMethod {
                    route_index: index,
                    method: method_str.to_owned(),
                }
            })?;

            let constraints = constraints
                .into_iter()
                .map(|(param, pattern)| match Constraint::compile(&pattern, config.match_mode) {
                    Ok(constraint) => Ok((Arc::from(param.as_str()), constraint)),
                    Err(source) => Err(RouterError::InvalidConstraint {
                        route_index: index,
                        param,
                        pattern,
                        source,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;

            debug!(
                route_index = index,
                method = %method,
                path = %path,
                constraints = constraints.len(),
                "Inserting route"
            );

            routes.push(RouteSummary {
                method: method.to_string(),
                path: path.clone(),
            });

            let segments = split_segments(&path);
            let binding = Binding {
                index,
                pattern: Arc::from(path.as_str()),
                method,
                handler: Arc::new(handler),
                constraints,
                extra: Arc::new(extra),
            };
            root.insert(&segments, binding);
        }

        info!(
            routes_count = routes.len(),
            match_mode = %config.match_mode,
            "Routing tree built"
        );

        Ok(Self {
            root,
            routes,
            config: *config,
        })
    }

    /// Resolve `(path, method)` to the single matching route.
    ///
    /// Static segments win over the dynamic child at every level, dynamic
    /// edges and terminal routes are tried in declaration order, and the
    /// walk never backtracks. Every failure is reported as "no such path".
    pub fn dispatch(&self, path: &str, method: &Method) -> Result<RouteMatch<H>, RouterError> {
        debug!(method = %method, path = %path, "Route match attempt");

        let match_start = Instant::now();
        let segments = split_segments(path);
        if segments.is_empty() && path != "/" {
            debug!(method = %method, path = %path, "Malformed request path");
            return Err(RouterError::MalformedPath {
                path: path.to_owned(),
            });
        }

        let mut params = ParamVec::new();
        let binding = self
            .root
            .walk(&segments, &mut params)
            .and_then(|node| node.select(method, &params));
        let match_duration = match_start.elapsed();

        let Some(binding) = binding else {
            debug!(
                method = %method,
                path = %path,
                duration_us = match_duration.as_micros(),
                "No route matched"
            );
            return Err(RouterError::NoMatch {
                path: path.to_owned(),
                method: method.to_string(),
            });
        };

        if match_duration > self.config.slow_match_threshold {
            warn!(
                method = %method,
                path = %path,
                route_pattern = %binding.pattern,
                route_index = binding.index,
                path_params = ?params,
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        } else {
            info!(
                method = %method,
                path = %path,
                route_pattern = %binding.pattern,
                route_index = binding.index,
                path_params = ?params,
                duration_us = match_duration.as_micros(),
                "Route matched"
            );
        }

        Ok(RouteMatch {
            handler: Arc::clone(&binding.handler),
            extra: Arc::clone(&binding.extra),
            params,
            path: path.to_owned(),
            method: method.clone(),
            pattern: Arc::clone(&binding.pattern),
        })
    }

    /// [`dispatch`](Self::dispatch) with the default `GET` method.
    pub fn dispatch_get(&self, path: &str) -> Result<RouteMatch<H>, RouterError> {
        self.dispatch(path, &Method::GET)
    }

    /// [`dispatch`](Self::dispatch) with a method given as a string.
    ///
    /// A string that is not a valid method token cannot name any declared
    /// route, so it fails as "no such path".
    pub fn dispatch_str(&self, path: &str, method: &str) -> Result<RouteMatch<H>, RouterError> {
        match Method::from_bytes(method.as_bytes()) {
            Ok(method) => self.dispatch(path, &method),
            Err(_) => Err(RouterError::NoMatch {
                path: path.to_owned(),
                method: method.to_owned(),
            }),
        }
    }

    /// Number of declarations the router was built from.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Method and pattern of every declaration, in declaration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteSummary] {
        &self.routes
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Indented rendering of the tree; static children are sorted.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.root.render("/", 0, &mut out);
        out
    }

    /// Print all registered routes to stdout.
    pub fn dump_routes(&self) {
        println!(
            "[routes] count={} match_mode={}",
            self.routes.len(),
            self.config.match_mode
        );
        for (index, route) in self.routes.iter().enumerate() {
            println!("[route] #{index} {} {}", route.method, route.path);
        }
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &TrieNode<H> {
        &self.root
    }
}

impl<H> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
