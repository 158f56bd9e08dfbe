//! Integration test utilities for the s-Java verifier
//!
//! Fixtures are `.sjava` files. Valid ones live under `tests/fixtures/valid`.
//! Invalid ones live under `tests/fixtures/invalid` and start with a header
//! comment naming the expected failure:
//!
//! ```text
//! // expect: variable 2
//! // expect: scope -
//! ```
//!
//! The second field is the reported line, or `-` for failures without one.
//! Being a whole-line comment, the header is invisible to the verifier.

use anyhow::{Context as _, Result, bail};
use sj_resolve::{Category, CheckError};
use sj_span::LineNumber;
use std::fs;
use std::path::{Path, PathBuf};

/// What a fixture is expected to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Validation succeeds
    Valid,
    /// Validation fails with this category on this line
    Invalid {
        /// Expected error family
        category: Category,
        /// Expected line, `None` for unlined errors
        line: Option<LineNumber>,
    },
}

impl Expectation {
    /// Whether `outcome` matches this expectation
    pub fn matches<T>(self, outcome: &Result<T, CheckError>) -> bool {
        match (self, outcome) {
            (Self::Valid, Ok(_)) => true,
            (Self::Invalid { category, line }, Err(err)) => {
                err.category() == category && err.line == line
            }
            _ => false,
        }
    }
}

/// A fixture file and its expectation
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Location of the file
    pub path: PathBuf,
    /// Full file contents
    pub source: String,
    /// Outcome declared by the file's location and header
    pub expectation: Expectation,
}

impl Fixture {
    /// File name, for messages
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned())
    }
}

/// Root of the fixture tree of this crate
pub fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Parse a `// expect: <category> <line|->` header
///
/// # Errors
///
/// Returns an error if the header is missing or malformed
pub fn parse_expectation(source: &str) -> Result<Expectation> {
    let header = source
        .lines()
        .next()
        .and_then(|line| line.trim().strip_prefix("// expect:"))
        .context("missing `// expect:` header")?;

    let mut fields = header.split_whitespace();
    let (Some(category), Some(line), None) = (fields.next(), fields.next(), fields.next()) else {
        bail!("expected `// expect: <category> <line|->`, found `{}`", header.trim());
    };

    let category = match category {
        "scope" => Category::Scope,
        "variable" => Category::Variable,
        "method" => Category::Method,
        "condition" => Category::Condition,
        other => bail!("unknown category `{other}`"),
    };
    let line = match line {
        "-" => None,
        number => Some(LineNumber::new(
            number
                .parse()
                .with_context(|| format!("bad line number `{number}`"))?,
        )),
    };

    Ok(Expectation::Invalid { category, line })
}

/// Load every `.sjava` file of one fixture directory, sorted by name
///
/// # Errors
///
/// Returns an error if the directory cannot be read or an invalid fixture
/// has a bad header
pub fn load_fixtures(dir: &Path, valid: bool) -> Result<Vec<Fixture>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "sjava") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let source = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let expectation = if valid {
                Expectation::Valid
            } else {
                parse_expectation(&source).with_context(|| path.display().to_string())?
            };
            Ok(Fixture {
                path,
                source,
                expectation,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expectation() {
        assert_eq!(
            parse_expectation("// expect: variable 12\nint a;").unwrap(),
            Expectation::Invalid {
                category: Category::Variable,
                line: Some(LineNumber(12)),
            }
        );
        assert_eq!(
            parse_expectation("  // expect:   scope -").unwrap(),
            Expectation::Invalid {
                category: Category::Scope,
                line: None,
            }
        );
        parse_expectation("int a;").unwrap_err();
        parse_expectation("// expect: syntax 1").unwrap_err();
        parse_expectation("// expect: method").unwrap_err();
        parse_expectation("// expect: method x").unwrap_err();
    }

    #[test]
    fn test_load_fixtures_from_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.sjava"), "// expect: method 3\n").unwrap();
        fs::write(dir.path().join("a.sjava"), "// expect: condition -\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let fixtures = load_fixtures(dir.path(), false).unwrap();
        let names: Vec<String> = fixtures.iter().map(Fixture::name).collect();
        assert_eq!(names, vec!["a.sjava", "b.sjava"]);
    }
}
