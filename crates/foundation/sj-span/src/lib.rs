//! Source lines and line numbers

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A 1-based line number in the original source file
#[derive(
    Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Display, From,
)]
#[display("{_0}")]
pub struct LineNumber(
    /// Raw 1-based value
    pub u32,
);

impl LineNumber {
    /// Creates a line number
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// Raw 1-based value
    pub fn get(self) -> u32 {
        self.0
    }
}

/// A normalized source line: trimmed text plus the line it came from
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct SourceLine {
    /// Where the line sits in the file
    pub number: LineNumber,
    /// Text with surrounding whitespace removed
    pub text: String,
}

impl SourceLine {
    /// Creates a source line
    pub fn new(number: impl Into<LineNumber>, text: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            text: text.into(),
        }
    }
}

/// Byte range of a physical line in `source`, excluding the line terminator.
///
/// Used to attach diagnostics to the line an error was reported on.
pub fn line_range(source: &str, line: LineNumber) -> Option<Range<usize>> {
    let wanted = line.get().checked_sub(1)? as usize;
    let mut start = 0;
    for (idx, text) in source.split('\n').enumerate() {
        let end = start + text.len();
        if idx == wanted {
            let trimmed_end = if text.ends_with('\r') { end - 1 } else { end };
            return Some(start..trimmed_end);
        }
        start = end + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_range_finds_each_line() {
        let source = "int a;\r\nvoid f() {\n}";
        assert_eq!(line_range(source, LineNumber(1)), Some(0..6));
        assert_eq!(line_range(source, LineNumber(2)), Some(8..18));
        assert_eq!(&source[line_range(source, LineNumber(3)).unwrap_or_default()], "}");
    }

    #[test]
    fn test_line_range_out_of_bounds() {
        assert_eq!(line_range("a", LineNumber(0)), None);
        assert_eq!(line_range("a", LineNumber(2)), None);
    }

    #[test]
    fn test_line_number_display() {
        assert_eq!(LineNumber::new(42).to_string(), "42");
        assert_eq!(LineNumber::from(7).get(), 7);
    }
}
