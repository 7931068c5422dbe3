// Token reader for the interactive prompts.
//
// Input is a stream of whitespace-delimited integers that may span lines, the
// same way a user types answers after each prompt. The reader remembers the
// unread rest of the current line so it can be discarded after a bad answer.

use crate::error::{Field, InputError};
use std::io::BufRead;
use std::num::IntErrorKind;

pub struct TokenReader<R> {
    reader: R,
    /// Unread rest of the current line. `Some` while that line's newline has
    /// not been consumed yet.
    pending: Option<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        TokenReader {
            reader,
            pending: None,
        }
    }

    /// Read one line from the underlying reader, without its line ending.
    /// Bytes that are not valid UTF-8 become U+FFFD, so they surface as an
    /// ordinary bad token instead of a read failure.
    fn next_line(&mut self) -> Result<String, InputError> {
        let mut raw = Vec::new();
        if self.reader.read_until(b'\n', &mut raw)? == 0 {
            return Err(InputError::Eof);
        }
        let mut line = String::from_utf8_lossy(&raw).into_owned();
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Next whitespace-delimited token, reading more lines as needed.
    pub fn next_token(&mut self) -> Result<String, InputError> {
        loop {
            if let Some(rest) = self.pending.take() {
                let rest = rest.trim_start();
                if !rest.is_empty() {
                    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                    let token = rest[..end].to_string();
                    self.pending = Some(rest[end..].to_string());
                    return Ok(token);
                }
            }
            self.pending = Some(self.next_line()?);
        }
    }

    /// Next token parsed as an integer for `field`. The whole token must be
    /// numeric; a number too large for an `i64` is a range error, not a
    /// parse error.
    pub fn read_int(&mut self, field: Field) -> Result<i64, InputError> {
        let token = self.next_token()?;
        token.parse::<i64>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => InputError::Range {
                field,
                value: token.clone(),
            },
            _ => InputError::Parse {
                token: token.clone(),
            },
        })
    }

    /// Drop whatever is left of the current line. Does nothing when the
    /// current line has already been consumed.
    pub fn discard_line(&mut self) {
        if let Some(rest) = self.pending.take() {
            if !rest.trim().is_empty() {
                tracing::debug!(discarded = %rest.trim(), "discarding rest of input line");
            }
        }
    }

    /// Block until a full new line is entered and return it.
    pub fn read_line(&mut self) -> Result<String, InputError> {
        self.pending = None;
        self.next_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(text: &str) -> TokenReader<Cursor<Vec<u8>>> {
        TokenReader::new(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn reads_tokens_across_lines() {
        let mut r = reader("1  2\n\n   3\n");
        assert_eq!(r.read_int(Field::MenuChoice).unwrap(), 1);
        assert_eq!(r.read_int(Field::MenuChoice).unwrap(), 2);
        assert_eq!(r.read_int(Field::MenuChoice).unwrap(), 3);
        assert!(matches!(r.read_int(Field::MenuChoice), Err(InputError::Eof)));
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        let mut r = reader("abc\n12abc\n-4\n");
        assert!(matches!(r.read_int(Field::MenuChoice), Err(InputError::Parse { token }) if token == "abc"));
        assert!(matches!(r.read_int(Field::MenuChoice), Err(InputError::Parse { token }) if token == "12abc"));
        assert_eq!(r.read_int(Field::MenuChoice).unwrap(), -4);
    }

    #[test]
    fn discard_drops_rest_of_line_only() {
        let mut r = reader("abc def 9\n5\n");
        assert!(r.read_int(Field::MenuChoice).is_err());
        r.discard_line();
        assert_eq!(r.read_int(Field::MenuChoice).unwrap(), 5);
    }

    #[test]
    fn discard_twice_does_not_eat_next_line() {
        let mut r = reader("7\nnext\n");
        assert_eq!(r.read_int(Field::MenuChoice).unwrap(), 7);
        r.discard_line();
        r.discard_line();
        assert_eq!(r.read_line().unwrap(), "next");
    }

    #[test]
    fn invalid_utf8_is_a_bad_token_not_a_read_error() {
        let mut r = TokenReader::new(Cursor::new(vec![0xff, 0xfe, b'\n', b'3', b'\n']));
        assert!(matches!(
            r.read_int(Field::MenuChoice),
            Err(InputError::Parse { token }) if token == "\u{fffd}\u{fffd}"
        ));
        r.discard_line();
        assert_eq!(r.read_int(Field::MenuChoice).unwrap(), 3);
    }

    #[test]
    fn oversized_numbers_are_out_of_range() {
        let mut r = reader("99999999999999999999 -99999999999999999999\n");
        assert!(matches!(
            r.read_int(Field::FocusMinutes),
            Err(InputError::Range { field: Field::FocusMinutes, value }) if value == "99999999999999999999"
        ));
        assert!(matches!(
            r.read_int(Field::Cycles),
            Err(InputError::Range { field: Field::Cycles, .. })
        ));
    }

    #[test]
    fn handles_crlf_line_endings() {
        let mut r = reader("2\r\n\r\n");
        assert_eq!(r.read_int(Field::MenuChoice).unwrap(), 2);
        r.discard_line();
        assert_eq!(r.read_line().unwrap(), "");
        assert!(matches!(r.read_line(), Err(InputError::Eof)));
    }
}
