use std::io::BufRead;

use log::{debug, warn};

use super::game::{GameRecord, Winner};
use super::movetext::ply_count;
use super::reader::LineReader;
use super::{contains, is_blank_line, tags, GAME_START_MARKER};
use crate::config::FilterConfig;
use crate::error::Result;

/// Game assembler states
///
/// ```text
/// SeekingGame --[Event ]--> ReadingHeaders --non-tag line--> ReadingMoves
///      ^                                                           |
///      |                                    blank / tag / end of input
///      +---------------------- Finalizing <------------------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    SeekingGame,
    ReadingHeaders,
    ReadingMoves,
    Finalizing,
}

/// Why a finished game did not make it into either output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    LowRating,
    Draw,
    MissingResult,
    TooShort,
}

/// Outcome of one finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted(Winner),
    /// The move text carried an engine evaluation
    Annotated,
    Rejected(Rejection),
}

/// A game that just left the `Finalizing` state
#[derive(Debug)]
pub struct FinishedGame<'a> {
    pub record: &'a GameRecord,
    pub verdict: Verdict,
}

/// Streams games out of a PGN line source.
///
/// Only one `GameRecord` exists; it is reset at each `[Event ` line and handed
/// out by reference once the game is finalized, so callers must write it out
/// before asking for the next game.
pub struct GameAssembler<R> {
    reader: LineReader<R>,
    record: GameRecord,
    state: State,
    config: FilterConfig,
}

impl<R: BufRead> GameAssembler<R> {
    pub fn new(reader: LineReader<R>, config: FilterConfig) -> Result<Self> {
        let record = GameRecord::new(config.initial_moves_capacity)?;
        Ok(GameAssembler {
            reader,
            record,
            state: State::SeekingGame,
            config,
        })
    }

    /// Number of input lines consumed so far
    pub fn line_number(&self) -> u64 {
        self.reader.line_number()
    }

    /// Run the state machine until the next game is finalized.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    pub fn next_game(&mut self) -> Result<Option<FinishedGame<'_>>> {
        loop {
            if !self.step()? {
                return Ok(None);
            }
            if self.state == State::Finalizing {
                let verdict = self.finalize();
                self.state = State::SeekingGame;
                return Ok(Some(FinishedGame {
                    record: &self.record,
                    verdict,
                }));
            }
        }
    }

    /// Consume one line and apply the resulting transition.
    ///
    /// Returns `false` when the input ended while seeking a game. The
    /// `Finalizing` state is left by `next_game`, which hands out the verdict.
    fn step(&mut self) -> Result<bool> {
        match self.state {
            State::SeekingGame => match self.reader.next_line()? {
                None => return Ok(false),
                Some(line) => {
                    if contains(line, GAME_START_MARKER) {
                        self.record.reset();
                        apply_tag(&mut self.record, line);
                        self.state = State::ReadingHeaders;
                    }
                }
            },
            State::ReadingHeaders => match self.reader.next_line()? {
                None => {
                    warn!(
                        "Input ended inside a header block (line {})",
                        self.reader.line_number()
                    );
                    self.state = State::Finalizing;
                }
                Some(line) if line.starts_with(b"[") => apply_tag(&mut self.record, line),
                Some(line) => {
                    // First line after the tags belongs to the move phase but
                    // is not checked for the end of the block.
                    absorb_move_line(&mut self.record, line, &self.config)?;
                    self.state = State::ReadingMoves;
                }
            },
            State::ReadingMoves => match self.reader.next_line()? {
                None => self.state = State::Finalizing,
                Some(line) if is_blank_line(line) => self.state = State::Finalizing,
                Some(line) if line.starts_with(b"[") => {
                    self.reader.push_back();
                    self.state = State::Finalizing;
                }
                Some(line) => absorb_move_line(&mut self.record, line, &self.config)?,
            },
            State::Finalizing => {}
        }
        Ok(true)
    }

    /// Normalize the finished game and decide where it goes
    fn finalize(&mut self) -> Verdict {
        if self.record.skip {
            debug!(
                "Skipping annotated game {} vs {} (line {})",
                self.record.white,
                self.record.black,
                self.reader.line_number()
            );
            return Verdict::Annotated;
        }

        self.record.moves.normalize();
        let verdict = evaluate(&self.record, &self.config);

        if let Verdict::Rejected(reason) = verdict {
            debug!(
                "Rejected game {} vs {}: {:?} (line {})",
                self.record.white,
                self.record.black,
                reason,
                self.reader.line_number()
            );
        }

        verdict
    }
}

/// Apply the inclusion filter to a normalized, non-annotated game
pub fn evaluate(record: &GameRecord, config: &FilterConfig) -> Verdict {
    if record.white_rating() < config.min_rating || record.black_rating() < config.min_rating {
        return Verdict::Rejected(Rejection::LowRating);
    }
    if record.is_draw() {
        return Verdict::Rejected(Rejection::Draw);
    }
    if ply_count(record.moves.as_bytes()) < config.min_ply_estimate {
        return Verdict::Rejected(Rejection::TooShort);
    }
    match record.winner() {
        Some(winner) => Verdict::Accepted(winner),
        None => Verdict::Rejected(Rejection::MissingResult),
    }
}

fn apply_tag(record: &mut GameRecord, line: &[u8]) {
    if let Some((tag, value)) = tags::extract(line) {
        record.set_tag(tag, value);
    }
}

/// Move-phase handling of one line: flag evaluations, append real move text
fn absorb_move_line(record: &mut GameRecord, line: &[u8], config: &FilterConfig) -> Result<()> {
    if contains(line, config.eval_marker) {
        record.skip = true;
    }
    if !record.skip && !line.starts_with(b"[") && line.len() > 2 {
        record.moves.append(line)?;
    }
    Ok(())
}
