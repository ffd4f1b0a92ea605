//! # CLI Module
//!
//! Command-line interface for loading, checking and querying route files.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Load a route file, build the router and list the routes:
//!
//! ```bash
//! segroute check --routes routes.yaml
//! ```
//!
//! ### `match`
//!
//! Dispatch one request and print the match as pretty JSON, or
//! `No such path -- <path>` with a nonzero exit status:
//!
//! ```bash
//! segroute match --routes routes.yaml --path api/v1/Risc/ --method PUT
//! ```
//!
//! ### `dump`
//!
//! Print the routing tree, static children sorted:
//!
//! ```bash
//! segroute dump --routes routes.yaml
//! ```
//!
//! ### `watch`
//!
//! Rebuild the router whenever the route file changes while dispatching
//! `METHOD PATH` lines read from stdin:
//!
//! ```bash
//! printf 'GET users/long/a\nPOST users/long/1\n' | segroute watch --routes routes.yaml
//! ```
//!
//! Every command accepts `--mode full|search` to override
//! `SEGROUTE_MATCH_MODE`, and the global `--log-level` flag.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use segroute::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! let code = run_cli(&cli)?;
//! ```

mod commands;


pub use commands::{execute, run_cli, Cli, Commands, ModeArg};
