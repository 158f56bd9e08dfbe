//! Identifier grammar for variables and methods

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::take_while;
use nom::character::complete::{char, satisfy};
use nom::combinator::{all_consuming, recognize};
use nom::sequence::{pair, tuple};

/// Words that can never name a variable, parameter or method
pub const RESERVED_WORDS: &[&str] = &[
    "int", "double", "boolean", "char", "String", "void", "final", "if", "while", "true",
    "false", "return",
];

/// Why a name was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// Characters outside the identifier grammar
    #[error("is not a legal identifier")]
    Malformed,
    /// Starts with `__`
    #[error("must not start with a double underscore")]
    DoubleUnderscore,
    /// Exactly `_`
    #[error("must not be a lone underscore")]
    LoneUnderscore,
    /// One of [`RESERVED_WORDS`]
    #[error("is a reserved word")]
    Reserved,
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// `[A-Za-z][A-Za-z0-9_]*`
fn letter_led(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|ch| ch.is_ascii_alphabetic()),
        take_while(is_word_char),
    ))(input)
}

/// `_[A-Za-z0-9][A-Za-z0-9_]*`
fn underscore_led(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        char('_'),
        satisfy(|ch| ch.is_ascii_alphanumeric()),
        take_while(is_word_char),
    )))(input)
}

/// Grammar check only; reserved words pass
pub fn is_variable_name(text: &str) -> bool {
    all_consuming(alt((letter_led, underscore_led)))(text).is_ok()
}

/// Grammar check only; reserved words pass
pub fn is_method_name(text: &str) -> bool {
    all_consuming(letter_led)(text).is_ok()
}

/// Whether `text` is one of [`RESERVED_WORDS`]
pub fn is_reserved(text: &str) -> bool {
    RESERVED_WORDS.contains(&text)
}

/// Full rule for declaring a variable or parameter named `name`
///
/// # Errors
///
/// Returns the first rule the name breaks.
pub fn check_variable_name(name: &str) -> Result<(), NameError> {
    if name == "_" {
        return Err(NameError::LoneUnderscore);
    }
    if name.starts_with("__") {
        return Err(NameError::DoubleUnderscore);
    }
    if !is_variable_name(name) {
        return Err(NameError::Malformed);
    }
    if is_reserved(name) {
        return Err(NameError::Reserved);
    }
    Ok(())
}

/// Full rule for declaring a method named `name`
///
/// # Errors
///
/// Returns the first rule the name breaks.
pub fn check_method_name(name: &str) -> Result<(), NameError> {
    if !is_method_name(name) {
        return Err(NameError::Malformed);
    }
    if is_reserved(name) {
        return Err(NameError::Reserved);
    }
    Ok(())
}
