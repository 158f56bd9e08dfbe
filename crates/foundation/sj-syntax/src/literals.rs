//! Literal recognizers
//!
//! Each recognizer must consume the whole (already trimmed) text.

use crate::types::VarType;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{char, digit0, digit1, none_of, one_of};
use nom::combinator::{all_consuming, opt, recognize};
use nom::sequence::{delimited, pair, tuple};

/// `[+-]?[0-9]+`
fn int_literal(input: &str) -> IResult<&str, &str> {
    recognize(pair(opt(one_of("+-")), digit1))(input)
}

/// `[+-]?([0-9]+\.[0-9]*|\.[0-9]+)`
fn double_literal(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        opt(one_of("+-")),
        alt((
            recognize(tuple((digit1, char('.'), digit0))),
            recognize(pair(char('.'), digit1)),
        )),
    ))(input)
}

fn boolean_literal(input: &str) -> IResult<&str, &str> {
    alt((tag("true"), tag("false")))(input)
}

/// A single character other than a quote or backslash, in single quotes
fn char_literal(input: &str) -> IResult<&str, &str> {
    recognize(delimited(char('\''), none_of("'\\"), char('\'')))(input)
}

/// Any run of characters other than a quote or backslash, in double quotes
fn string_literal(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('"'),
        take_while(|ch: char| ch != '"' && ch != '\\'),
        char('"'),
    ))(input)
}

fn full_match(parser: fn(&str) -> IResult<&str, &str>, text: &str) -> bool {
    all_consuming(parser)(text).is_ok()
}

/// Whole text is an int literal
pub fn is_int_literal(text: &str) -> bool {
    full_match(int_literal, text)
}

/// Whole text is a double literal; ints do not count
pub fn is_double_literal(text: &str) -> bool {
    full_match(double_literal, text)
}

/// `true` or `false`
pub fn is_boolean_literal(text: &str) -> bool {
    full_match(boolean_literal, text)
}

/// Whole text is a char literal
pub fn is_char_literal(text: &str) -> bool {
    full_match(char_literal, text)
}

/// Whole text is a string literal
pub fn is_string_literal(text: &str) -> bool {
    full_match(string_literal, text)
}

/// Most specific type of a literal, or `None` when `text` is not a literal.
///
/// `5` is an `int` even though `double` and `boolean` would accept it too.
pub fn literal_type(text: &str) -> Option<VarType> {
    if is_int_literal(text) {
        Some(VarType::Int)
    } else if is_double_literal(text) {
        Some(VarType::Double)
    } else if is_boolean_literal(text) {
        Some(VarType::Boolean)
    } else if is_char_literal(text) {
        Some(VarType::Char)
    } else if is_string_literal(text) {
        Some(VarType::String)
    } else {
        None
    }
}

/// Whether `text` is a literal storable into `target`, numeric widening included
pub fn literal_matches(target: VarType, text: &str) -> bool {
    literal_type(text).is_some_and(|found| target.accepts(found))
}
