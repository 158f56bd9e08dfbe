//! Source normalization

use sj_span::{LineNumber, SourceLine};

/// Split `source` into trimmed lines, dropping blank lines and lines whose
/// first non-blank characters are `//`. Line numbers stay 1-based and refer to
/// the physical lines of `source`.
pub fn preprocess(source: &str) -> Vec<SourceLine> {
    source
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let text = raw.trim();
            if text.is_empty() || text.starts_with("//") {
                return None;
            }
            Some(SourceLine::new(LineNumber::new(idx as u32 + 1), text))
        })
        .collect()
}
