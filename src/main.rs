use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use keycase::cli::{self, Args, CliConfig};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let result = CliConfig::from_args(args).and_then(|config| {
        if config.is_verbose() {
            tracing::debug!("verbose mode enabled");
        }
        cli::run(&config)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::handle_error(&e);
            ExitCode::FAILURE
        }
    }
}

// RUST_LOG wins over the command-line flags when set
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "keycase=debug"
    } else if quiet {
        "keycase=error"
    } else {
        "keycase=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
