use clap::Parser;
use segroute::cli::{run_cli, Cli};
use segroute::otel;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = otel::init_logging(&cli.log_level) {
        eprintln!("Warning: {e:#}");
    }

    let code = match run_cli(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    };

    otel::shutdown();
    code
}
