use crate::{
    declaration::load_routes,
    hot_reload::watch_routes,
    router::{MatchMode, Router},
    runtime_config::RouterConfig,
    shared::SharedRouter,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Command-line interface for segroute
///
/// Loads a YAML or JSON route file and builds, inspects or queries the
/// resulting router.
#[derive(Parser, Debug)]
#[command(name = "segroute", version)]
#[command(about = "Segment-trie router CLI", long_about = None)]
pub struct Cli {
    /// Log level: trace/debug/info/warn/error
    #[arg(long, global = true, env = "SEGROUTE_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a route file and build the router
    Check {
        /// Path to the route file (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// Constraint match mode (default: SEGROUTE_MATCH_MODE or full)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// Dispatch a single request and print the match as JSON
    Match {
        /// Path to the route file (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// Request path to dispatch
        #[arg(short, long)]
        path: String,

        /// Request method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Constraint match mode (default: SEGROUTE_MATCH_MODE or full)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// Print the routing tree
    Dump {
        /// Path to the route file (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// Constraint match mode (default: SEGROUTE_MATCH_MODE or full)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// Watch a route file and dispatch `METHOD PATH` lines read from stdin
    Watch {
        /// Path to the route file (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// Constraint match mode (default: SEGROUTE_MATCH_MODE or full)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
}

/// `--mode` values
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Constraints must match the whole segment
    Full,
    /// Constraints may match anywhere in the segment
    Search,
}

impl From<ModeArg> for MatchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Full => MatchMode::Full,
            ModeArg::Search => MatchMode::Search,
        }
    }
}

/// Execute the parsed command against stdin/stdout.
///
/// Returns a failure exit code when `match` finds no route; loading and
/// build failures are returned as errors.
pub fn run_cli(cli: &Cli) -> Result<ExitCode> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let ok = execute(&cli.command, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Execute `command`, reading request lines from `input` (for `watch`) and
/// writing results to `out`.
///
/// Returns `Ok(false)` when `match` found no route.
pub fn execute<R: BufRead, W: Write>(command: &Commands, input: &mut R, out: &mut W) -> Result<bool> {
    match command {
        Commands::Check { routes, mode } => {
            let router = build_router(routes, *mode)?;
            writeln!(
                out,
                "{}: {} routes (match mode: {})",
                routes.display(),
                router.route_count(),
                router.config().match_mode
            )?;
            for (index, route) in router.routes().iter().enumerate() {
                writeln!(out, "  #{index} {} {}", route.method, route.path)?;
            }
            Ok(true)
        }
        Commands::Match {
            routes,
            path,
            method,
            mode,
        } => {
            let router = build_router(routes, *mode)?;
            match router.dispatch_str(path, method) {
                Ok(m) => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&m)?)?;
                    Ok(true)
                }
                Err(e) => {
                    writeln!(out, "{e}")?;
                    Ok(false)
                }
            }
        }
        Commands::Dump { routes, mode } => {
            let router = build_router(routes, *mode)?;
            write!(out, "{}", router.dump())?;
            Ok(true)
        }
        Commands::Watch { routes, mode } => {
            let config = resolve_config(*mode);
            let router = build_router_with(routes, &config)?;
            let shared = SharedRouter::new(router);
            let _watcher = watch_routes(routes, shared.clone(), config)
                .with_context(|| format!("failed to watch {}", routes.display()))?;
            serve_lines(&shared, input, out)?;
            Ok(true)
        }
    }
}

/// Dispatch each `METHOD PATH` (or bare `PATH`, meaning `GET`) line and
/// write one compact JSON result per line. Blank lines are skipped.
pub(crate) fn serve_lines<R: BufRead, W: Write>(
    shared: &SharedRouter<Value>,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read request line")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (method, path) = match line.split_once(char::is_whitespace) {
            Some((method, path)) => (method, path.trim()),
            None => ("GET", line),
        };
        match shared.dispatch_str(path, method) {
            Ok(m) => writeln!(out, "{}", serde_json::to_string(&m)?)?,
            Err(e) => writeln!(out, "{e}")?,
        }
        out.flush()?;
    }
    Ok(())
}

fn resolve_config(mode: Option<ModeArg>) -> RouterConfig {
    let config = RouterConfig::from_env();
    match mode {
        Some(mode) => config.with_match_mode(mode.into()),
        None => config,
    }
}

fn build_router(routes: &Path, mode: Option<ModeArg>) -> Result<Router<Value>> {
    build_router_with(routes, &resolve_config(mode))
}

fn build_router_with(routes: &Path, config: &RouterConfig) -> Result<Router<Value>> {
    let declarations = load_routes(routes)?;
    Router::with_config(declarations, config)
        .with_context(|| format!("failed to build router from {}", routes.display()))
}
