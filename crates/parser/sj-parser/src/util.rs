use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_while1};
use nom::character::complete::{alpha1, char, multispace0, multispace1};
use nom::combinator::{eof, map, map_opt, opt, recognize, value};
use nom::sequence::{delimited, terminated, tuple};
use sj_syntax::VarType;

/// A run of identifier characters. Deliberately looser than the identifier
/// grammar so that bad names surface as naming errors, not unknown statements.
pub fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|ch: char| ch.is_ascii_alphanumeric() || ch == '_')(input)
}

/// One of the five type keywords
pub fn var_type(input: &str) -> IResult<&str, VarType> {
    map_opt(alpha1, VarType::from_keyword)(input)
}

/// Optional `final` followed by mandatory whitespace
pub fn final_modifier(input: &str) -> IResult<&str, bool> {
    map(opt(terminated(tag("final"), multispace1)), |modifier| {
        modifier.is_some()
    })(input)
}

/// `,` with optional surrounding whitespace
pub fn list_separator(input: &str) -> IResult<&str, ()> {
    value((), delimited(multispace0, char(','), multispace0))(input)
}

/// `=` with optional surrounding whitespace
pub fn equals(input: &str) -> IResult<&str, ()> {
    value((), delimited(multispace0, char('='), multispace0))(input)
}

/// Optional whitespace, `;`, end of line
pub fn statement_end(input: &str) -> IResult<&str, ()> {
    value((), tuple((multispace0, char(';'), eof)))(input)
}

/// A `"..."` or `'...'` run taken as one piece, so separators inside it do
/// not split the surrounding list. Literal validity is checked later.
pub fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(delimited(char('"'), take_till(|ch: char| ch == '"'), char('"'))),
        recognize(delimited(char('\''), take_till(|ch: char| ch == '\''), char('\''))),
    ))(input)
}
