//! cfgxml-extract entry point.
//!
//! Reads the switch configuration document, prints the port settings and
//! default VLAN report blocks to stdout and exits with failure when either
//! section yields nothing. Logs go to stderr.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use sonic_cfgxml::{report, ConfigExtractor, ExtractorConfig};

/// Switch configuration port and VLAN extractor
#[derive(Parser, Debug)]
#[command(name = "cfgxml-extract")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Switch configuration document (overrides input.path)
    input: Option<PathBuf>,

    /// Extractor configuration file (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,

    /// Print a JSON summary after the report
    #[arg(long)]
    json: bool,
}

/// Initialize tracing with an env filter, writing to stderr.
fn init_logging(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .init();
}

/// Builds the effective configuration from the config file and arguments.
fn load_config(args: &Args) -> anyhow::Result<ExtractorConfig> {
    let mut config = match &args.config {
        Some(path) => ExtractorConfig::load_or_default(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ExtractorConfig::default(),
    };

    if let Some(input) = &args.input {
        config.input.path = input.clone();
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json {
        config.output.json_summary = true;
    }

    config.validate().context("validating configuration")?;
    Ok(config)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cfgxml-extract: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging.level);

    info!("--- Starting cfgxml-extract ---");
    info!("Input: {}", config.input.path.display());

    let stdout = io::stdout();
    let mut extractor =
        ConfigExtractor::new(stdout.lock()).with_sections(config.sections.clone());

    let result = extractor.run(&config.input.path);
    let reported = extractor.errors().len();
    let mut out = extractor.into_inner();

    let code = match result {
        Ok(extraction) => {
            info!(
                "Extracted {} ports and {} default VLANs ({} errors reported)",
                extraction.ports.len(),
                extraction.vlans.len(),
                reported
            );
            if config.output.json_summary {
                if let Err(e) = report::write_json_summary(&mut out, &extraction) {
                    error!("Failed to write JSON summary: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Printed directly so it survives `--log-level off`.
            eprintln!("cfgxml-extract: {}", e);
            ExitCode::FAILURE
        }
    };

    if let Err(e) = out.flush() {
        error!("Failed to flush report: {}", e);
        return ExitCode::FAILURE;
    }

    code
}
