use clap::Parser;
use flexi_logger::Logger;
use log::info;
use std::path::PathBuf;
use std::process;

use pgntocsv::config::{DEFAULT_BLACK_OUTPUT, DEFAULT_INPUT, DEFAULT_WHITE_OUTPUT};
use pgntocsv::CsvExporter;

/// PGN to CSV converter
///
/// Splits a PGN archive into two CSV datasets of decisive games, one per
/// winning side. Filters are fixed: both players rated 1700 or more, no draws,
/// an estimated 20+ plies, and no engine-evaluation comments.
///
/// ## Usage Examples:
/// ```bash
/// # Default archive and outputs
/// ./pgntocsv
///
/// # Explicit paths
/// ./pgntocsv games.pgn --white-out white.csv --black-out black.csv
///
/// # Per-game discard reasons
/// RUST_LOG=debug ./pgntocsv games.pgn
/// ```
#[derive(Parser)]
#[command(name = "pgntocsv")]
#[command(about = "Split decisive PGN games into White-wins and Black-wins CSV files")]
#[command(version = "0.1.0")]
struct Args {
    /// Path to the PGN archive
    #[arg(value_name = "PGN", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// CSV file receiving games won by White
    #[arg(long, value_name = "FILE", default_value = DEFAULT_WHITE_OUTPUT)]
    white_out: PathBuf,

    /// CSV file receiving games won by Black
    #[arg(long, value_name = "FILE", default_value = DEFAULT_BLACK_OUTPUT)]
    black_out: PathBuf,
}

fn main() {
    let args = Args::parse();

    let _logger = match Logger::try_with_env_or_str("info").and_then(|logger| logger.start()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: failed to start logger: {}", e);
            process::exit(1);
        }
    };

    info!("Converting PGN archive '{}' to CSV...", args.input.display());

    let exporter = CsvExporter::new();
    match exporter.export(&args.input, &args.white_out, &args.black_out) {
        Ok(stats) => {
            info!(
                "Scanned {} games: {} annotated, {} filtered out",
                stats.games_seen, stats.annotated, stats.rejected
            );
            info!(
                "Wrote {} white wins to '{}' and {} black wins to '{}'",
                stats.white_wins,
                args.white_out.display(),
                stats.black_wins,
                args.black_out.display()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
