use anyhow::Result;
use clap::Parser;
use roadwatch::cli::{Cli, Commands};
use roadwatch::commands::{export_segments, init_config, run_report, ExportConfig, ReportConfig};
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise -v counts raise the level from warn
fn init_tracing(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match cli.command {
        Commands::Report {
            filter,
            format,
            output,
            plain,
        } => {
            let config = roadwatch::config::load_config();
            run_report(
                ReportConfig {
                    filter,
                    format,
                    output,
                    plain,
                },
                &config,
            )
        }
        Commands::Export { filter, output } => {
            let config = roadwatch::config::load_config();
            export_segments(ExportConfig { filter, output }, &config)
        }
        Commands::Init { force } => init_config(force),
    }
}
