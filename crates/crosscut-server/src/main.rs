//! crosscut-server: HTTP endpoint for rendering mesh cross-sections.
//!
//! Exposes `POST /slice`, which takes a mesh file path and a list of
//! locators and writes one cross-section image per locator under
//! `<base>/data/generated_slices/`.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=crosscut=info` - Basic operation logging
//! - `RUST_LOG=crosscut=debug` - Per-locator slicing detail
//! - `RUST_LOG=debug` - All debug output
//!
//! # Example
//!
//! ```bash
//! RUST_LOG=crosscut=info crosscut-server --port 5000 --base-dir ./work
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod handler;
mod server;

/// HTTP endpoint for rendering mesh cross-sections at locators.
#[derive(Parser)]
#[command(name = "crosscut-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value = "5000")]
    port: u16,

    /// Base directory for mesh lookup and image output
    /// (defaults to the current directory)
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over the -v flags.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "crosscut=info,crosscut_server=info",
            1 => "crosscut=info,crosscut_server=debug",
            2 => "crosscut=debug,crosscut_server=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let base_dir = match cli.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let result = server::run(&cli.host, cli.port, &base_dir);

    if let Err(e) = &result {
        if !cli.quiet {
            eprintln!("{}: {}", "Error".red().bold(), e);
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {}", "Caused by".yellow(), cause);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
