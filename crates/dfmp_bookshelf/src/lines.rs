//! Line handling shared by the Bookshelf readers.

use crate::error::BookshelfError;
use std::str::FromStr;

/// A significant line: comment stripped, trimmed, non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    /// 1-based line number in the file.
    pub number: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn tokens(&self) -> Vec<&'a str> {
        self.text.split_whitespace().collect()
    }
}

/// Iterates over the lines that carry content, skipping blanks, `#`
/// comments and the `UCLA <kind> 1.0` banner.
pub(crate) fn content_lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.lines().enumerate().filter_map(|(i, raw)| {
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() || text.starts_with("UCLA") {
            None
        } else {
            Some(Line { number: i + 1, text })
        }
    })
}

/// Returns the value of a `Key : value` header line, if the line is one.
pub(crate) fn header_value<'a>(line: &Line<'a>, key: &str) -> Option<&'a str> {
    let rest = line.text.strip_prefix(key)?;
    let rest = rest.trim_start().strip_prefix(':')?;
    Some(rest.trim())
}

/// Parses a token, naming `what` in the error message.
pub(crate) fn parse_token<T: FromStr>(
    token: &str,
    what: &str,
    file: &str,
    line: usize,
) -> Result<T, BookshelfError> {
    token
        .parse()
        .map_err(|_| BookshelfError::parse(file, line, format!("invalid {what} '{token}'")))
}
