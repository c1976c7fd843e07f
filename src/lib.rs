//! PGN to CSV Dataset Splitter Library
//!
//! Streams a PGN archive one game at a time and writes the decisive, well-rated,
//! long enough games into two CSV files: one for White wins, one for Black wins.
//! Games carrying engine evaluations (`%eval`) are dropped.

pub mod config;
pub mod csv;
pub mod error;
pub mod pgn;

pub use config::FilterConfig;
pub use csv::{ConversionStats, CsvExporter};
pub use error::ConvertError;
pub use pgn::{GameAssembler, GameRecord, LineReader, Verdict, Winner};
