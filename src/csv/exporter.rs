use std::fs::{self, File};
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use log::info;

use super::sink::WinnerSinks;
use crate::config::{FilterConfig, PROGRESS_INTERVAL};
use crate::error::{ConvertError, Result};
use crate::pgn::{GameAssembler, LineReader, Verdict, Winner};

/// Counters for one conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Every game block that reached finalization
    pub games_seen: u64,
    /// Discarded because the move text carried `%eval`
    pub annotated: u64,
    /// Failed the rating / draw / length filter
    pub rejected: u64,
    pub white_wins: u64,
    pub black_wins: u64,
}

impl ConversionStats {
    pub fn rows_written(&self) -> u64 {
        self.white_wins + self.black_wins
    }
}

/// PGN to CSV exporter
///
/// Reads a PGN archive once, front to back, and splits the accepted games
/// into a White-wins and a Black-wins CSV file.
pub struct CsvExporter {
    config: FilterConfig,
}

impl CsvExporter {
    pub fn new() -> Self {
        CsvExporter {
            config: FilterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FilterConfig) -> Self {
        self.config = config;
        self
    }

    /// Convert the PGN file at `input` into the two CSV files.
    ///
    /// The input is opened before either output is created, so a missing
    /// archive leaves no empty CSV files behind. Parent directories of the
    /// outputs are created as needed.
    pub fn export(&self, input: &Path, white_out: &Path, black_out: &Path) -> Result<ConversionStats> {
        let reader = LineReader::open(input).map_err(|source| ConvertError::OpenInput {
            path: input.to_path_buf(),
            source,
        })?;

        let white = create_output(white_out)?;
        let black = create_output(black_out)?;
        let mut sinks = WinnerSinks::new(white, black)?;

        let stats = self.export_lines(reader, &mut sinks)?;
        sinks.flush()?;

        Ok(stats)
    }

    /// Convert from any buffered source into any pair of writers
    pub fn export_streams<R: BufRead, W: Write>(
        &self,
        input: R,
        sinks: &mut WinnerSinks<W>,
    ) -> Result<ConversionStats> {
        self.export_lines(LineReader::new(input), sinks)
    }

    fn export_lines<R: BufRead, W: Write>(
        &self,
        reader: LineReader<R>,
        sinks: &mut WinnerSinks<W>,
    ) -> Result<ConversionStats> {
        let mut assembler = GameAssembler::new(reader, self.config.clone())?;
        let mut stats = ConversionStats::default();

        while let Some(game) = assembler.next_game()? {
            stats.games_seen += 1;

            match game.verdict {
                Verdict::Accepted(winner) => {
                    sinks.route(game.record, winner)?;
                    match winner {
                        Winner::White => stats.white_wins += 1,
                        Winner::Black => stats.black_wins += 1,
                    }
                }
                Verdict::Annotated => stats.annotated += 1,
                Verdict::Rejected(_) => stats.rejected += 1,
            }

            // Progress indicator for large archives
            if stats.games_seen % PROGRESS_INTERVAL == 0 {
                info!(
                    "Scanned {} games over {} lines ({} white wins, {} black wins)...",
                    stats.games_seen,
                    assembler.line_number(),
                    stats.white_wins,
                    stats.black_wins
                );
            }
        }

        Ok(stats)
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let open_err = |source| ConvertError::OpenOutput {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(open_err)?;
    }
    let file = File::create(path).map_err(open_err)?;

    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ANNOTATED: &str = "[Event \"Rated Bullet game\"]\n\
        [White \"Eve\"]\n[Black \"Mallory\"]\n[Result \"0-1\"]\n\
        [WhiteElo \"2200\"]\n[BlackElo \"2200\"]\n\n\
        1. e4 { [%eval 0.2] } 1... c5 { [%eval 0.3] } 0-1\n\n";

    fn decisive(result: &str) -> String {
        let mut moves = String::new();
        for n in 1..=22 {
            moves.push_str(&format!("{}. e4 e5 ", n));
        }
        format!(
            "[Event \"Rated Blitz game\"]\n[White \"A\"]\n[Black \"B\"]\n[Result \"{}\"]\n\
             [WhiteElo \"1800\"]\n[BlackElo \"1800\"]\n\n{}{}\n\n",
            result, moves, result
        )
    }

    #[test]
    fn test_stats_count_every_outcome() {
        let pgn = format!(
            "{}{}{}{}",
            decisive("1-0"),
            decisive("0-1"),
            decisive("1/2-1/2"),
            ANNOTATED
        );
        let mut sinks = WinnerSinks::new(Vec::new(), Vec::new()).unwrap();

        let stats = CsvExporter::new()
            .export_streams(Cursor::new(pgn), &mut sinks)
            .unwrap();

        assert_eq!(
            stats,
            ConversionStats {
                games_seen: 4,
                annotated: 1,
                rejected: 1,
                white_wins: 1,
                black_wins: 1,
            }
        );
        assert_eq!(stats.rows_written(), 2);
        assert_eq!(sinks.white.rows_written(), 1);
        assert_eq!(sinks.black.rows_written(), 1);
    }

    #[test]
    fn test_custom_config_changes_thresholds() {
        let config = FilterConfig {
            min_rating: 1900,
            ..FilterConfig::default()
        };
        let mut sinks = WinnerSinks::new(Vec::new(), Vec::new()).unwrap();

        let stats = CsvExporter::new()
            .with_config(config)
            .export_streams(Cursor::new(decisive("1-0")), &mut sinks)
            .unwrap();

        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.rows_written(), 0);
    }

    #[test]
    fn test_unallocatable_move_buffer_stops_conversion() {
        let config = FilterConfig {
            initial_moves_capacity: usize::MAX,
            ..FilterConfig::default()
        };
        let mut sinks = WinnerSinks::new(Vec::new(), Vec::new()).unwrap();

        let result = CsvExporter::new()
            .with_config(config)
            .export_streams(Cursor::new("[Event \"x\"]\n"), &mut sinks);

        assert!(matches!(result, Err(ConvertError::Alloc(_))), "got: {:?}", result);
        assert_eq!(sinks.white.rows_written(), 0);
        assert_eq!(sinks.black.rows_written(), 0);
    }

    #[test]
    fn test_empty_input_writes_headers_only() {
        let mut sinks = WinnerSinks::new(Vec::new(), Vec::new()).unwrap();
        let stats = CsvExporter::new()
            .export_streams(Cursor::new(""), &mut sinks)
            .unwrap();

        assert_eq!(stats, ConversionStats::default());
        let white = String::from_utf8(sinks.white.into_inner()).unwrap();
        assert_eq!(white.lines().count(), 1);
    }
}
