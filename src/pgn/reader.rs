use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Sequential line source with a single line of pushback.
///
/// The game assembler needs to "unread" the line that ends a move block when
/// that line already belongs to the next game's headers. Instead of seeking
/// back in the file, the last line is kept and handed out again on the next
/// call, so any `BufRead` works.
///
/// Lines are raw bytes including their terminator; PGN archives are not
/// guaranteed to be valid UTF-8.
pub struct LineReader<R> {
    inner: R,
    line: Vec<u8>,
    pushed_back: bool,
    line_number: u64,
}

impl LineReader<BufReader<File>> {
    /// Open a PGN file for line-by-line reading
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(LineReader::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        LineReader {
            inner,
            line: Vec::with_capacity(256),
            pushed_back: false,
            line_number: 0,
        }
    }

    /// Next line including its terminator, or `None` at end of input
    pub fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        if self.pushed_back {
            self.pushed_back = false;
            return Ok(Some(&self.line));
        }

        self.line.clear();
        if self.inner.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        Ok(Some(&self.line))
    }

    /// Hand the most recent line out again on the next `next_line` call.
    ///
    /// Only one line of lookahead exists; pushing back twice in a row is the
    /// same as pushing back once.
    pub fn push_back(&mut self) {
        debug_assert!(!self.line.is_empty(), "push_back before any line was read");
        self.pushed_back = true;
    }

    /// 1-based number of the last line taken from the underlying source
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}
