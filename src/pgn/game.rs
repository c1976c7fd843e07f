use std::collections::TryReserveError;

use super::movetext::MoveBuffer;
use super::tags::Tag;
use crate::config::DRAW_RESULT;

/// The one game currently being assembled.
///
/// A single instance lives for the whole run: `reset` is called at every game
/// start so a game missing a tag never inherits the previous game's value, and
/// the move buffer keeps whatever capacity earlier games grew it to.
#[derive(Debug)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    pub result: String,
    pub white_elo: String,
    pub black_elo: String,
    pub time_control: String,
    pub termination: String,
    pub moves: MoveBuffer,
    /// Set once an evaluation annotation is seen in the move text
    pub skip: bool,
}

/// Which output a finished game belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    White,
    Black,
}

impl GameRecord {
    pub fn new(initial_moves_capacity: usize) -> Result<Self, TryReserveError> {
        Ok(GameRecord {
            white: String::new(),
            black: String::new(),
            result: String::new(),
            white_elo: String::new(),
            black_elo: String::new(),
            time_control: String::new(),
            termination: String::new(),
            moves: MoveBuffer::with_capacity(initial_moves_capacity)?,
            skip: false,
        })
    }

    /// Clear every field for the next game, keeping allocations
    pub fn reset(&mut self) {
        self.white.clear();
        self.black.clear();
        self.result.clear();
        self.white_elo.clear();
        self.black_elo.clear();
        self.time_control.clear();
        self.termination.clear();
        self.moves.clear();
        self.skip = false;
    }

    /// Store an extracted tag value in its field
    pub fn set_tag(&mut self, tag: Tag, value: String) {
        let field = match tag {
            Tag::White => &mut self.white,
            Tag::Black => &mut self.black,
            Tag::Result => &mut self.result,
            Tag::WhiteElo => &mut self.white_elo,
            Tag::BlackElo => &mut self.black_elo,
            Tag::TimeControl => &mut self.time_control,
            Tag::Termination => &mut self.termination,
        };
        *field = value;
    }

    pub fn white_rating(&self) -> i32 {
        parse_rating(&self.white_elo)
    }

    pub fn black_rating(&self) -> i32 {
        parse_rating(&self.black_elo)
    }

    pub fn is_draw(&self) -> bool {
        self.result == DRAW_RESULT
    }

    /// Output stream for this game's result.
    ///
    /// `"1-0"` goes to White; any other non-empty result that isn't a draw is
    /// treated as decisive for Black. Draws and missing results have no winner.
    pub fn winner(&self) -> Option<Winner> {
        match self.result.as_str() {
            "" => None,
            DRAW_RESULT => None,
            "1-0" => Some(Winner::White),
            _ => Some(Winner::Black),
        }
    }
}

/// Lenient rating parse: optional leading whitespace and sign, then as many
/// digits as there are. Anything unparsable (`"?"`, `""`, `"-"`) is 0.
pub fn parse_rating(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i32 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add((b - b'0') as i32);
    }

    if negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("1800"), 1800);
        assert_eq!(parse_rating(" 2150"), 2150);
        assert_eq!(parse_rating("1500?"), 1500);
        assert_eq!(parse_rating("+1700"), 1700);
        assert_eq!(parse_rating("-5"), -5);
        assert_eq!(parse_rating("?"), 0);
        assert_eq!(parse_rating(""), 0);
        assert_eq!(parse_rating("-"), 0);
        assert_eq!(parse_rating("99999999999999"), i32::MAX);
    }

    #[test]
    fn test_winner_routing() {
        let mut game = GameRecord::new(16).unwrap();

        game.result = "1-0".to_string();
        assert_eq!(game.winner(), Some(Winner::White));

        game.result = "0-1".to_string();
        assert_eq!(game.winner(), Some(Winner::Black));

        game.result = "1/2-1/2".to_string();
        assert_eq!(game.winner(), None);
        assert!(game.is_draw());

        game.result.clear();
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_reset_clears_fields_and_keeps_capacity() {
        let mut game = GameRecord::new(8).unwrap();
        game.set_tag(Tag::White, "Alice".to_string());
        game.set_tag(Tag::Termination, "Normal".to_string());
        game.moves.append(b"1. e4 e5 2. Nf3 Nc6\n").unwrap();
        game.skip = true;
        let grown = game.moves.capacity();

        game.reset();

        assert!(game.white.is_empty());
        assert!(game.termination.is_empty());
        assert!(game.moves.is_empty());
        assert!(!game.skip);
        assert_eq!(game.moves.capacity(), grown);
    }

    #[test]
    fn test_ratings_from_tags() {
        let mut game = GameRecord::new(8).unwrap();
        game.set_tag(Tag::WhiteElo, "1800".to_string());
        assert_eq!(game.white_rating(), 1800);
        assert_eq!(game.black_rating(), 0);
    }
}
