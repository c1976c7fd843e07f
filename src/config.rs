//! Fixed conversion settings.
//!
//! The thresholds are constants, not command-line flags.

/// Minimum rating required of both players
pub const MIN_RATING: i32 = 1700;

/// Minimum estimated ply count (see `pgn::movetext::ply_count`)
pub const MIN_PLY_ESTIMATE: usize = 20;

/// Result string of a drawn game
pub const DRAW_RESULT: &str = "1/2-1/2";

/// Marker of an engine evaluation comment inside move text
pub const EVAL_MARKER: &[u8] = b"%eval";

/// Starting capacity of the move buffer in bytes
pub const INITIAL_MOVES_CAPACITY: usize = 1024;

/// Default input archive
pub const DEFAULT_INPUT: &str = "PGN_Files/lichess_db_1GB.pgn";

/// Default White-wins output
pub const DEFAULT_WHITE_OUTPUT: &str = "CSV_Files/1GB_white_wins.csv";

/// Default Black-wins output
pub const DEFAULT_BLACK_OUTPUT: &str = "CSV_Files/1GB_black_wins.csv";

/// Number of games between progress log lines
pub const PROGRESS_INTERVAL: u64 = 100_000;

/// Inclusion rules applied to every finished game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub min_rating: i32,
    pub min_ply_estimate: usize,
    pub eval_marker: &'static [u8],
    pub initial_moves_capacity: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            min_rating: MIN_RATING,
            min_ply_estimate: MIN_PLY_ESTIMATE,
            eval_marker: EVAL_MARKER,
            initial_moves_capacity: INITIAL_MOVES_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_uses_constants() {
        let config = FilterConfig::default();
        assert_eq!(config.min_rating, 1700);
        assert_eq!(config.min_ply_estimate, 20);
        assert_eq!(config.eval_marker, b"%eval");
        assert_eq!(config.initial_moves_capacity, 1024);
    }
}
