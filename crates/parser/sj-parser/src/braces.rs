//! Locating the line that closes a block

use serde::{Deserialize, Serialize};
use sj_span::SourceLine;
use std::fmt;
use std::str::FromStr;

/// How `{` and `}` are counted when looking for the end of a block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BraceScan {
    /// Count brace characters outside char and string literals
    #[default]
    LiteralAware,
    /// A line containing `{` opens one level and a line containing `}` closes
    /// one, whatever else is on the line
    Raw,
}

impl BraceScan {
    /// Name used in configuration and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LiteralAware => "literal-aware",
            Self::Raw => "raw",
        }
    }

    /// Depth after `text`, and whether the block closed on it
    fn scan_line(self, text: &str, depth: usize) -> (usize, bool) {
        match self {
            Self::Raw => {
                let mut depth = depth;
                if text.contains('{') {
                    depth += 1;
                }
                if text.contains('}') {
                    depth = depth.saturating_sub(1);
                    return (depth, depth == 0);
                }
                (depth, false)
            }
            Self::LiteralAware => {
                let mut depth = depth;
                let mut quote = None;
                for ch in text.chars() {
                    match (quote, ch) {
                        (Some(open), _) if ch == open => quote = None,
                        (None, '"' | '\'') => quote = Some(ch),
                        (None, '{') => depth += 1,
                        (None, '}') => {
                            depth = depth.saturating_sub(1);
                            if depth == 0 {
                                return (0, true);
                            }
                        }
                        _ => {}
                    }
                }
                (depth, false)
            }
        }
    }
}

impl fmt::Display for BraceScan {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for BraceScan {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "literal-aware" => Ok(Self::LiteralAware),
            "raw" => Ok(Self::Raw),
            other => Err(format!(
                "unknown brace scan mode `{other}` (expected `literal-aware` or `raw`)"
            )),
        }
    }
}

/// Index of the line closing the block opened at `header`.
///
/// The header itself counts as the opening brace; scanning starts on the next
/// line and runs to the end of `lines`.
pub fn find_block_end(lines: &[SourceLine], header: usize, scan: BraceScan) -> Option<usize> {
    let mut depth = 1;
    for (idx, line) in lines.iter().enumerate().skip(header + 1) {
        let (next, closed) = scan.scan_line(&line.text, depth);
        if closed {
            return Some(idx);
        }
        depth = next;
    }
    None
}
