//! # Hot Reload Module
//!
//! Live reloading of route files without restarting the embedding service.
//!
//! ## Overview
//!
//! Hot reload watches a YAML or JSON route file and, on every modify or
//! create event:
//! - Reloads the declarations with [`load_routes`]
//! - Builds a new [`Router`] with the given [`RouterConfig`]
//! - Swaps it into the [`SharedRouter`]
//! - Calls an optional reload hook with the new router
//!
//! ## Usage
//!
//! ```rust,no_run
//! use segroute::hot_reload::watch_routes;
//! use segroute::{load_routes, Router, RouterConfig, SharedRouter};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = RouterConfig::from_env();
//! let router = Router::with_config(load_routes("routes.yaml")?, &config)?;
//! let shared = SharedRouter::new(router);
//!
//! // Keep the watcher alive for as long as reloads should happen
//! let _watcher = watch_routes("routes.yaml", shared.clone(), config)?;
//!
//! let m = shared.dispatch_str("api/to/Japan/", "GET");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! If the new file fails to parse or the router fails to build:
//! - The error is logged
//! - The previous router remains active
//! - Dispatch keeps working against the previous routes
//!
//! A route file that parses to no routes at all is treated the same way,
//! since editors commonly truncate a file before writing it back.
//!
//! Saving a half-edited route file therefore never takes routing down.
//!
//! ## Debouncing
//!
//! Editors often write a file several times per save. Each event triggers a
//! full reload; the last one wins.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::declaration::load_routes;
use crate::router::Router;
use crate::runtime_config::RouterConfig;
use crate::shared::SharedRouter;

/// Watch a route file and rebuild `shared` when it changes.
///
/// The returned watcher stops watching when dropped.
pub fn watch_routes<P>(
    routes_path: P,
    shared: SharedRouter<Value>,
    config: RouterConfig,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
{
    watch_routes_with(routes_path, shared, config, |_| {})
}

/// [`watch_routes`] with a hook called after every successful swap.
pub fn watch_routes_with<P, F>(
    routes_path: P,
    shared: SharedRouter<Value>,
    config: RouterConfig,
    mut on_reload: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(&Router<Value>) + Send + 'static,
{
    let path: PathBuf = routes_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    info!(path = %watch_path.display(), "Route file change detected, reloading");
                    reload(&watch_path, &shared, &config, &mut on_reload);
                }
            }
            Err(e) => error!(error = ?e, "Route file watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    info!(path = %path.display(), "Route file watcher started");
    Ok(watcher)
}

fn reload<F>(path: &Path, shared: &SharedRouter<Value>, config: &RouterConfig, on_reload: &mut F)
where
    F: FnMut(&Router<Value>),
{
    let declarations = match load_routes(path) {
        Ok(declarations) => declarations,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Failed to reload routes, keeping current router");
            return;
        }
    };

    // Editors truncate before writing; an empty table is treated as mid-save.
    if declarations.is_empty() {
        warn!(path = %path.display(), "Route file has no routes, keeping current router");
        return;
    }

    match Router::with_config(declarations, config) {
        Ok(router) => {
            info!(
                routes_count = router.route_count(),
                "hot-reload: applying route updates"
            );
            shared.replace(router);
            on_reload(&shared.load());
        }
        Err(e) => {
            error!(error = %e, "Failed to rebuild router, keeping current router");
        }
    }
}
