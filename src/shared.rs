//! # Shared Router Module
//!
//! A [`Router`] is immutable once built. [`SharedRouter`] lets many threads
//! dispatch against the current router while another thread installs a
//! freshly built one.
//!
//! Reads go through [`arc_swap::ArcSwap`], so dispatch never takes a lock and
//! never observes a half-built tree: a reader sees either the old router or
//! the new one. A rebuild that fails leaves the current router in place.
//!
//! ## Usage
//!
//! ```rust
//! use segroute::{RouteDecl, Router, SharedRouter};
//!
//! let shared = SharedRouter::new(Router::new(vec![RouteDecl::new("ping", "v1")]).unwrap());
//! assert_eq!(*shared.dispatch_str("ping", "GET").unwrap().handler, "v1");
//!
//! shared.rebuild(vec![RouteDecl::new("ping", "v2")]).unwrap();
//! assert_eq!(*shared.dispatch_str("ping", "GET").unwrap().handler, "v2");
//! ```

use arc_swap::ArcSwap;
use http::Method;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::declaration::RouteDecl;
use crate::error::RouterError;
use crate::router::{RouteMatch, Router};

/// Cloneable handle to an atomically swappable [`Router`].
///
/// Clones share the same slot: a [`replace`](Self::replace) through one
/// handle is visible to all of them.
pub struct SharedRouter<H> {
    inner: Arc<ArcSwap<Router<H>>>,
}

impl<H> SharedRouter<H> {
    pub fn new(router: Router<H>) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(router)),
        }
    }

    /// Snapshot of the current router.
    ///
    /// The snapshot stays valid after a later swap; it just no longer
    /// reflects the newest routes.
    #[must_use]
    pub fn load(&self) -> Arc<Router<H>> {
        self.inner.load_full()
    }

    /// Dispatch against the current router.
    pub fn dispatch(&self, path: &str, method: &Method) -> Result<RouteMatch<H>, RouterError> {
        self.inner.load().dispatch(path, method)
    }

    /// Dispatch against the current router with a method given as a string.
    pub fn dispatch_str(&self, path: &str, method: &str) -> Result<RouteMatch<H>, RouterError> {
        self.inner.load().dispatch_str(path, method)
    }

    /// Install `router`, returning the one it replaced.
    pub fn replace(&self, router: Router<H>) -> Arc<Router<H>> {
        let routes_count = router.route_count();
        let previous = self.inner.swap(Arc::new(router));
        info!(
            routes_count,
            previous_routes_count = previous.route_count(),
            "Router swapped"
        );
        previous
    }

    /// Build a router from `declarations` with the current router's config
    /// and swap it in.
    ///
    /// On error nothing is swapped and the current router keeps serving.
    pub fn rebuild<I>(&self, declarations: I) -> Result<(), RouterError>
    where
        I: IntoIterator<Item = RouteDecl<H>>,
    {
        let config = *self.inner.load().config();
        match Router::with_config(declarations, &config) {
            Ok(router) => {
                self.replace(router);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Router rebuild failed, keeping current routes");
                Err(e)
            }
        }
    }
}

impl<H> Clone for SharedRouter<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H> fmt::Debug for SharedRouter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRouter")
            .field("router", &*self.inner.load())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::MatchMode;
    use crate::runtime_config::RouterConfig;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    fn router(handler: &'static str) -> Router<&'static str> {
        Router::new(vec![
            RouteDecl::new("ping", handler),
            RouteDecl::new("items/:id", handler).with_constraint("id", "[0-9]+"),
        ])
        .unwrap()
    }

    #[test]
    fn test_replace_is_visible_to_clones() {
        let shared = SharedRouter::new(router("v1"));
        let other = shared.clone();

        let previous = shared.replace(router("v2"));
        assert_eq!(previous.route_count(), 2);
        assert_eq!(*other.dispatch("ping", &Method::GET).unwrap().handler, "v2");
    }

    #[test]
    fn test_snapshot_survives_swap() {
        let shared = SharedRouter::new(router("v1"));
        let snapshot = shared.load();
        shared.replace(router("v2"));

        assert_eq!(*snapshot.dispatch_get("ping").unwrap().handler, "v1");
        assert_eq!(*shared.dispatch_str("ping", "GET").unwrap().handler, "v2");
    }

    #[test]
    fn test_failed_rebuild_keeps_current_router() {
        let shared = SharedRouter::new(router("v1"));
        let err = shared
            .rebuild(vec![RouteDecl::new("x/:id", "bad").with_constraint("id", "[")])
            .unwrap_err();

        assert!(matches!(err, RouterError::InvalidConstraint { .. }));
        assert_eq!(*shared.dispatch_str("ping", "GET").unwrap().handler, "v1");
    }

    #[test]
    fn test_rebuild_keeps_match_mode() {
        let config = RouterConfig::default().with_match_mode(MatchMode::Search);
        let initial = Router::with_config(vec![RouteDecl::new("a", "a")], &config).unwrap();
        let shared = SharedRouter::new(initial);

        shared
            .rebuild(vec![RouteDecl::new("v/:x", "v").with_constraint("x", "[0-9]")])
            .unwrap();
        assert_eq!(shared.load().config().match_mode, MatchMode::Search);
        // Unanchored: one digit anywhere is enough.
        assert!(shared.dispatch_str("v/ab1", "GET").is_ok());
    }

    #[test]
    fn test_concurrent_dispatch_during_swaps() {
        let shared = SharedRouter::new(router("v1"));
        let done = AtomicBool::new(false);

        thread::scope(|s| {
            for _ in 0..4 {
                let shared = shared.clone();
                let done = &done;
                s.spawn(move || {
                    while !done.load(Ordering::Relaxed) {
                        let m = shared.dispatch_str("items/42", "GET").unwrap();
                        assert!(*m.handler == "v1" || *m.handler == "v2");
                        assert_eq!(m.get_param("id"), Some("42"));
                    }
                });
            }

            for i in 0..50 {
                shared.replace(router(if i % 2 == 0 { "v2" } else { "v1" }));
            }
            done.store(true, Ordering::Relaxed);
        });

        assert_eq!(*shared.dispatch_str("ping", "GET").unwrap().handler, "v1");
    }
}
