pub mod assembler;
pub mod game;
pub mod movetext;
pub mod reader;
pub mod tags;

pub use assembler::{FinishedGame, GameAssembler, Rejection, State, Verdict};
pub use game::{GameRecord, Winner};
pub use reader::LineReader;

/// Substring that marks the first tag line of a game
pub const GAME_START_MARKER: &[u8] = b"[Event ";

/// Byte-substring search
pub(crate) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

/// A line holding nothing but its terminator
pub(crate) fn is_blank_line(line: &[u8]) -> bool {
    line == b"\n" || line == b"\r\n"
}
