//! Parameter and argument lists

use crate::util::{final_modifier, quoted, var_type, word};
use nom::branch::alt;
use nom::bytes::complete::is_not;
use nom::character::complete::{char, multispace1};
use nom::combinator::{all_consuming, recognize};
use nom::error::Error as NomError;
use nom::multi::{many0, separated_list1};
use nom::sequence::tuple;
use sj_syntax::VarType;
use thiserror::Error;

/// One entry of a method declaration's parameter list
///
/// The name is captured as written; identifier rules are applied by the
/// resolver so that a bad name reports as a variable error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Declared type
    pub ty: VarType,
    /// Declared `final`
    pub is_final: bool,
}

/// Why a parameter list was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// `(, int a)` or `(int a,)`
    #[error("parameter list starts or ends with a comma")]
    DanglingComma,

    /// `(int a,, int b)`
    #[error("parameter list contains an empty entry")]
    EmptyEntry,

    /// Entry that is not `[final] <type> <name>`
    #[error("malformed parameter `{0}`")]
    Malformed(String),
}

/// Parse the text between a method header's parentheses.
///
/// Blank text is an empty list. Otherwise every comma-separated entry must be
/// `[final] <type> <name>` with mandatory whitespace between the parts.
///
/// # Errors
///
/// Returns the first [`ParameterError`] in list order.
pub fn parse_parameters(raw: &str) -> Result<Vec<Parameter>, ParameterError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    if raw.starts_with(',') || raw.ends_with(',') {
        return Err(ParameterError::DanglingComma);
    }

    raw.split(',').map(str::trim).map(parse_parameter).collect()
}

fn parse_parameter(entry: &str) -> Result<Parameter, ParameterError> {
    if entry.is_empty() {
        return Err(ParameterError::EmptyEntry);
    }

    let (_, (is_final, ty, _, name)) =
        all_consuming(tuple((final_modifier, var_type, multispace1, word)))(entry)
            .map_err(|_: nom::Err<NomError<&str>>| {
                ParameterError::Malformed(entry.to_owned())
            })?;

    Ok(Parameter {
        name: name.to_owned(),
        ty,
        is_final,
    })
}

/// Split call arguments on commas outside quotes.
///
/// Blank text means no arguments. Empty entries are kept (as empty strings)
/// so the caller can reject them with a proper diagnostic. Text with an
/// unbalanced quote comes back as a single argument.
pub fn split_arguments(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let argument = recognize(many0(alt((quoted, is_not(",\"'")))));
    all_consuming(separated_list1(char(','), argument))(raw).map_or_else(
        |_: nom::Err<NomError<&str>>| vec![raw.trim().to_owned()],
        |(_, arguments)| arguments.iter().map(|arg| arg.trim().to_owned()).collect(),
    )
}
