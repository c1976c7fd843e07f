/// PGN tag line parsing - `[Key "Value"]`
///
/// Only the seven tags that end up in the CSV are recognized; every other tag
/// (Event, Site, Date, ECO, ...) is skipped so new tags in future archives are
/// harmless. Malformed lines are not an error, they simply don't match.
///
/// ## Field bounds
/// Each field has a fixed maximum byte length. Longer values are truncated
/// silently (on a UTF-8 character boundary):
/// ```text
/// White, Black     99
/// Result            9
/// WhiteElo/BlackElo 9
/// TimeControl      19
/// Termination      49
/// ```

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    White,
    Black,
    Result,
    WhiteElo,
    BlackElo,
    TimeControl,
    Termination,
}

impl Tag {
    /// Look up a recognized tag by its name
    pub fn from_key(key: &[u8]) -> Option<Tag> {
        match key {
            b"White" => Some(Tag::White),
            b"Black" => Some(Tag::Black),
            b"Result" => Some(Tag::Result),
            b"WhiteElo" => Some(Tag::WhiteElo),
            b"BlackElo" => Some(Tag::BlackElo),
            b"TimeControl" => Some(Tag::TimeControl),
            b"Termination" => Some(Tag::Termination),
            _ => None,
        }
    }

    /// Maximum stored length of the tag value in bytes
    pub fn max_len(self) -> usize {
        match self {
            Tag::White | Tag::Black => 99,
            Tag::Result | Tag::WhiteElo | Tag::BlackElo => 9,
            Tag::TimeControl => 19,
            Tag::Termination => 49,
        }
    }
}

/// Split a tag line into its raw key and value.
///
/// The line must start with `[`; the key runs up to the first space, and the
/// value is everything between the opening quote and the next quote (or the
/// end of the line if the closing quote is missing). Returns `None` for lines
/// that are not shaped like a tag or whose value is empty.
pub fn parse_tag_line(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let body = line.strip_prefix(b"[")?;
    let body = trim_line_end(body);

    let key_end = body.iter().position(|&b| b == b' ' || b == b'\t')?;
    let (key, rest) = body.split_at(key_end);
    if key.is_empty() {
        return None;
    }

    let rest = skip_blanks(rest);
    let rest = rest.strip_prefix(b"\"")?;
    let value_end = rest.iter().position(|&b| b == b'"').unwrap_or(rest.len());
    let value = &rest[..value_end];

    if value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Extract a recognized tag and its bounded value from a tag line
pub fn extract(line: &[u8]) -> Option<(Tag, String)> {
    let (key, value) = parse_tag_line(line)?;
    let tag = Tag::from_key(key)?;
    Some((tag, bounded(value, tag.max_len())))
}

/// Keep at most `max_len` source bytes of `value`, then decode it.
///
/// The cut backs up to the start of a UTF-8 sequence it would split. Invalid
/// bytes count as one byte each against the bound and decode to U+FFFD.
pub fn bounded(value: &[u8], max_len: usize) -> String {
    let mut cut = value.len().min(max_len);
    // A UTF-8 sequence has at most three continuation bytes
    let floor = cut.saturating_sub(3);
    while cut > floor && cut < value.len() && is_continuation(value[cut]) {
        cut -= 1;
    }
    String::from_utf8_lossy(&value[..cut]).into_owned()
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

fn skip_blanks(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn trim_line_end(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_recognized_tags() {
        assert_eq!(
            extract(b"[White \"Magnus\"]\n"),
            Some((Tag::White, "Magnus".to_string()))
        );
        assert_eq!(
            extract(b"[WhiteElo \"1800\"]\n"),
            Some((Tag::WhiteElo, "1800".to_string()))
        );
        assert_eq!(
            extract(b"[Result \"1/2-1/2\"]\r\n"),
            Some((Tag::Result, "1/2-1/2".to_string()))
        );
        assert_eq!(
            extract(b"[Termination \"Time forfeit\"]\n"),
            Some((Tag::Termination, "Time forfeit".to_string()))
        );
    }

    #[test]
    fn test_unknown_tags_are_ignored() {
        assert_eq!(extract(b"[Event \"Rated Blitz game\"]\n"), None);
        assert_eq!(extract(b"[ECO \"C20\"]\n"), None);
        assert_eq!(extract(b"[WhiteRatingDiff \"+5\"]\n"), None);
    }

    #[test]
    fn test_malformed_lines_do_not_match() {
        assert_eq!(extract(b"White \"Magnus\"]\n"), None);
        assert_eq!(extract(b"[White]\n"), None);
        assert_eq!(extract(b"[White Magnus]\n"), None);
        assert_eq!(extract(b"[White \"\"]\n"), None);
        assert_eq!(extract(b"[\n"), None);
    }

    #[test]
    fn test_missing_closing_quote_takes_rest_of_line() {
        assert_eq!(
            extract(b"[Black \"Hikaru\n"),
            Some((Tag::Black, "Hikaru".to_string()))
        );
    }

    #[test]
    fn test_long_values_are_truncated() {
        let long_name = "x".repeat(150);
        let line = format!("[White \"{}\"]\n", long_name);
        let (tag, value) = extract(line.as_bytes()).unwrap();
        assert_eq!(tag, Tag::White);
        assert_eq!(value.len(), 99);

        let (_, tc) = extract(b"[TimeControl \"600+5000000000000000000\"]\n").unwrap();
        assert_eq!(tc, "600+500000000000000");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // "é" is two bytes; 9 bytes would split the fifth one
        assert_eq!(bounded("ééééé".as_bytes(), 9), "éééé");
        assert_eq!(bounded(b"short", 9), "short");
        assert_eq!(bounded("ab€".as_bytes(), 4), "ab");
    }

    #[test]
    fn test_invalid_bytes_count_once_against_the_bound() {
        let value = bounded(&[0xFF; 20], 9);
        assert_eq!(value.chars().count(), 9);
        assert!(value.chars().all(|c| c == char::REPLACEMENT_CHARACTER));

        let (tag, name) = extract(b"[White \"M\xF6ller\"]\n").unwrap();
        assert_eq!(tag, Tag::White);
        assert_eq!(name, "M\u{FFFD}ller");
    }

    #[test]
    fn test_parse_tag_line_raw() {
        assert_eq!(
            parse_tag_line(b"[Site \"https://lichess.org/abc\"]\n"),
            Some((&b"Site"[..], &b"https://lichess.org/abc"[..]))
        );
    }
}
