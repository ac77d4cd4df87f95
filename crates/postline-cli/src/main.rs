//! postline - resumable post corpus hydration
//!
//! Resolves post identifiers against the lookup service and writes
//! per-batch metadata, text, and length artifacts, with a durable
//! checkpoint so interrupted runs resume where they left off.

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use clap::{Parser, Subcommand};
use postline_core::shutdown_flag;

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "postline")]
#[command(about = "Resumable post corpus hydration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./postline.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Hydrate identifier files into corpus artifacts
    Hydrate(cmd::hydrate::HydrateArgs),
    /// Show checkpoint coverage for an output directory
    Status(cmd::status::StatusArgs),
    /// Show current configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = Arc::new(postline_core::ProgressContext::new());

    // Logging:
    //   TTY:     quiet (warn) unless --debug  — progress bars show activity
    //   non-TTY: info unless --debug          — logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    postline_core::init_logging(quiet, cli.debug, multi);

    let config = match load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Configuration error: {e:#}");
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Command::Hydrate(args) => {
            setup_signal_handler();
            match cmd::hydrate::run(args, &config, &progress) {
                Ok(summary) if summary.interrupted => ExitCode::from(130),
                Ok(_) => ExitCode::SUCCESS,
                Err(e) => {
                    log::error!("Fatal error: {e:#}");
                    ExitCode::from(2)
                }
            }
        }
        Command::Status(args) => match cmd::status::run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{e:#}");
                ExitCode::from(2)
            }
        },
        Command::Config => {
            print_config(&config);
            ExitCode::SUCCESS
        }
    }
}

fn load_config(path: Option<std::path::PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_file(&path),
        None => Config::load(),
    }
}

fn print_config(config: &Config) {
    use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Setting").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    table.add_row(vec![
        "Ids directory",
        &config.input.ids_dir.display().to_string(),
    ]);
    table.add_row(vec![
        "Output directory",
        &config.output.dir.display().to_string(),
    ]);
    table.add_row(vec!["Lookup URL", &config.lookup.base_url]);
    table.add_row(vec![
        "Lookup token",
        if config.lookup.token.is_some() {
            "configured"
        } else {
            "not set"
        },
    ]);
    table.add_row(vec![
        "Chunk concurrency",
        &config.lookup.chunk_concurrency.to_string(),
    ]);
    table.add_row(vec!["Batch size", &config.batch.size.to_string()]);
    table.add_row(vec![
        "Round limit",
        &config
            .batch
            .round_limit
            .map_or_else(|| "auto".to_string(), |n| n.to_string()),
    ]);

    eprintln!("\n{table}");
}

fn setup_signal_handler() {
    // First signal: set graceful shutdown flag
    // Second signal: force exit (default SIGINT behavior restored)
    // SAFETY: AtomicBool::store and process::exit are async-signal-safe
    unsafe {
        signal_hook::low_level::register(signal_hook::consts::SIGTERM, || {
            if shutdown_flag().swap(true, Ordering::Relaxed) {
                std::process::exit(130);
            }
        })
        .expect("Failed to register SIGTERM handler");
        signal_hook::low_level::register(signal_hook::consts::SIGINT, || {
            if shutdown_flag().swap(true, Ordering::Relaxed) {
                std::process::exit(130);
            }
        })
        .expect("Failed to register SIGINT handler");
    }
}
