use std::collections::TryReserveError;

/// Accumulated move text of the game currently being read.
///
/// The buffer tracks its own logical capacity, which starts at the configured
/// initial size and doubles whenever the next line would not fit together with
/// a terminator byte. Clearing between games keeps the capacity.
///
/// Growth goes through `try_reserve_exact`: running out of memory is reported
/// to the caller instead of aborting.
#[derive(Debug)]
pub struct MoveBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl MoveBuffer {
    pub fn with_capacity(initial: usize) -> Result<Self, TryReserveError> {
        let capacity = initial.max(1);
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(capacity)?;
        Ok(MoveBuffer { bytes, capacity })
    }

    /// Append one raw move line (terminator included)
    pub fn append(&mut self, line: &[u8]) -> Result<(), TryReserveError> {
        self.ensure_capacity(line.len())?;
        self.bytes.extend_from_slice(line);
        Ok(())
    }

    /// Make room for `additional` more bytes plus the terminator slot
    fn ensure_capacity(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let needed = self
            .bytes
            .len()
            .saturating_add(additional)
            .saturating_add(1);
        if needed <= self.capacity {
            return Ok(());
        }

        let mut new_capacity = self.capacity;
        while new_capacity < needed {
            new_capacity = new_capacity.saturating_mul(2);
        }

        self.bytes.try_reserve_exact(new_capacity - self.bytes.len())?;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Forget the content but keep the capacity
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Strip move numbers and the final line terminator
    pub fn normalize(&mut self) {
        strip_move_numbers(&mut self.bytes);
        strip_trailing_newline(&mut self.bytes);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Remove move-number markers such as `"12. "` in a single left-to-right pass.
///
/// A run of digits is dropped together with the following `". "`; digits that
/// are not followed by `". "` are copied through one at a time, so `"1-0"`,
/// `"O-O"` or `"Rd1"` are untouched. Black move numbers written as `"12..."`
/// are kept as they are.
pub fn strip_move_numbers(bytes: &mut Vec<u8>) {
    let len = bytes.len();
    let mut src = 0;
    let mut dst = 0;

    while src < len {
        if bytes[src].is_ascii_digit() {
            let mut peek = src;
            while peek < len && bytes[peek].is_ascii_digit() {
                peek += 1;
            }
            if bytes.get(peek) == Some(&b'.') && bytes.get(peek + 1) == Some(&b' ') {
                src = peek + 2;
                continue;
            }
        }
        bytes[dst] = bytes[src];
        dst += 1;
        src += 1;
    }

    bytes.truncate(dst);
}

/// Drop one trailing `"\n"` (or `"\r\n"`)
pub fn strip_trailing_newline(bytes: &mut Vec<u8>) {
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
}

/// Approximate ply count: number of spaces divided by two.
///
/// This is a heuristic, not an exact count. With move numbers stripped, a
/// mainline like `"e4 e5 Nf3 Nc6 1-0"` has one space per ply, so halving it
/// undercounts by about half. The filter threshold applies to this estimate.
pub fn ply_count(moves: &[u8]) -> usize {
    moves.iter().filter(|&&b| b == b' ').count() / 2
}
