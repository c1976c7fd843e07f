use std::io::{self, Write};

use crate::pgn::{GameRecord, Winner};

/// Header row of both output files
pub const CSV_HEADER: &str = "White,Black,Result,WhiteElo,BlackElo,TimeControl,Termination,Moves";

/// One CSV output: header on creation, then one row per accepted game.
///
/// Every field is wrapped in double quotes. Embedded quotes and commas are
/// written as they are, without escaping.
pub struct CsvSink<W: Write> {
    writer: W,
    row: Vec<u8>,
    rows_written: u64,
}

impl<W: Write> CsvSink<W> {
    /// Wrap `writer` and emit the header row
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "{}", CSV_HEADER)?;
        Ok(CsvSink {
            writer,
            row: Vec::with_capacity(1024),
            rows_written: 0,
        })
    }

    /// Write one game as a single row.
    ///
    /// The row is assembled in memory first and handed to the writer in one
    /// `write_all`.
    pub fn write_game(&mut self, record: &GameRecord) -> io::Result<()> {
        self.row.clear();

        let fields: [&[u8]; 7] = [
            record.white.as_bytes(),
            record.black.as_bytes(),
            record.result.as_bytes(),
            record.white_elo.as_bytes(),
            record.black_elo.as_bytes(),
            record.time_control.as_bytes(),
            record.termination.as_bytes(),
        ];
        for field in fields {
            push_quoted(&mut self.row, field);
            self.row.push(b',');
        }
        push_quoted(&mut self.row, record.moves.as_bytes());
        self.row.push(b'\n');

        self.writer.write_all(&self.row)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn push_quoted(row: &mut Vec<u8>, field: &[u8]) {
    row.push(b'"');
    row.extend_from_slice(field);
    row.push(b'"');
}

/// The two outputs, split by winner
pub struct WinnerSinks<W: Write> {
    pub white: CsvSink<W>,
    pub black: CsvSink<W>,
}

impl<W: Write> WinnerSinks<W> {
    pub fn new(white: W, black: W) -> io::Result<Self> {
        Ok(WinnerSinks {
            white: CsvSink::new(white)?,
            black: CsvSink::new(black)?,
        })
    }

    /// Write `record` to the output for `winner`
    pub fn route(&mut self, record: &GameRecord, winner: Winner) -> io::Result<()> {
        match winner {
            Winner::White => self.white.write_game(record),
            Winner::Black => self.black.write_game(record),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.white.flush()?;
        self.black.flush()
    }
}
