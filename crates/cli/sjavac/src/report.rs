//! Rendering of check failures as miette diagnostics
//!
//! Note: These struct fields are read by miette's `#[derive(Diagnostic)]`
//! macro.

use miette::{Diagnostic, NamedSource, SourceSpan};
use sj_resolve::{Category, CheckError, ErrorKind};
use sj_span::line_range;
use std::path::Path;
use thiserror::Error;

/// A check failure with the source it was found in
#[derive(Error, Debug, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(sjavac::check))]
pub struct CheckReport {
    message: String,
    category: Category,
    #[source_code]
    src: NamedSource<String>,
    #[label("{category} error")]
    span: Option<SourceSpan>,
    #[help]
    help: Option<String>,
}

impl CheckReport {
    /// Build the report for `err` found in `source`
    pub fn new(path: &Path, source: String, err: &CheckError) -> Self {
        let line = match &err.kind {
            ErrorKind::UnterminatedBlock { header } => Some(*header),
            _ => err.line,
        };
        let span = line
            .and_then(|line| line_range(&source, line))
            .map(SourceSpan::from);

        Self {
            message: err.to_string(),
            category: err.category(),
            src: NamedSource::new(path.display().to_string(), source),
            span,
            help: help_for(&err.kind),
        }
    }
}

fn help_for(kind: &ErrorKind) -> Option<String> {
    let help = match kind {
        ErrorKind::UnterminatedBlock { .. } => "add a line containing only `}`",
        ErrorKind::MissingReturn | ErrorKind::EmptyMethod(_) => {
            "the last statement of a method must be `return;`"
        }
        ErrorKind::FinalWithoutValue(_) => "give the variable a value where it is declared",
        ErrorKind::MisplacedOperator(_) | ErrorKind::EmptyOperand(_) => {
            "join operands with `&&` or `||`, one operator between each pair"
        }
        ErrorKind::MalformedClose => "put the closing `}` on its own line",
        _ => return None,
    };
    Some(help.to_owned())
}
