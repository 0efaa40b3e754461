//! Outfitter CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use outfitter::cli::{run_detect, run_install, Cli, Commands, WizardOptions};
use outfitter::download::HttpTransport;
use outfitter::exec::SystemRunner;
use outfitter::manifest::load_manifest;
use outfitter::session::SessionDirs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("outfitter=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("outfitter=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Outfitter starting with args: {:?}", cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> outfitter::Result<()> {
    let manifest = load_manifest(&cli.manifest)?;

    std::fs::create_dir_all(&cli.temp_dir)?;
    std::fs::create_dir_all(&cli.install_dir)?;
    let dirs = SessionDirs::new(&cli.temp_dir, &cli.install_dir);
    let runner = SystemRunner::new();

    match cli.command {
        Some(Commands::Detect) => run_detect(&manifest, &dirs, &runner),
        Some(Commands::Install) | None => {
            let transport = HttpTransport::new();
            let options = WizardOptions {
                assume_yes: cli.yes,
                quiet: cli.quiet,
            };
            run_install(&manifest, &dirs, &runner, &transport, options)
        }
    }
}
