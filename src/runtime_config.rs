//! # Runtime Configuration Module
//!
//! Environment-driven configuration for building and dispatching routers.
//!
//! ## Environment Variables
//!
//! ### `SEGROUTE_MATCH_MODE`
//!
//! How constraint patterns are applied to segment values:
//! - `full` (default): the pattern must match the whole segment
//! - `search`: the pattern may match anywhere inside the segment
//!
//! ### `SEGROUTE_SLOW_MATCH_US`
//!
//! Dispatch time in microseconds above which a match is logged at `warn`
//! instead of `info`. Default: `1000`.
//!
//! ## Usage
//!
//! ```rust
//! use segroute::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! println!("match mode: {}", config.match_mode);
//! ```

use std::env;
use std::time::Duration;

use crate::router::MatchMode;

const DEFAULT_SLOW_MATCH_US: u64 = 1000;

/// Router configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// How constraint patterns are anchored
    pub match_mode: MatchMode,
    /// Matches slower than this are logged as slow
    pub slow_match_threshold: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Full,
            slow_match_threshold: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let match_mode = lookup("SEGROUTE_MATCH_MODE")
            .map(|v| MatchMode::parse(&v))
            .unwrap_or_default();
        let slow_us = lookup("SEGROUTE_SLOW_MATCH_US")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_SLOW_MATCH_US);
        Self {
            match_mode,
            slow_match_threshold: Duration::from_micros(slow_us),
        }
    }

    #[must_use]
    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }
}
