//! Statement classification
//!
//! Classification is total: every normalized line is exactly one
//! [`Statement`], with [`Statement::Unrecognized`] as the catch-all. Nothing
//! here resolves names or checks types; captured names and values are handed
//! on verbatim (trimmed) for the scope engine to validate.

use crate::params::split_arguments;
use crate::util::{equals, final_modifier, list_separator, quoted, statement_end, var_type, word};
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag};
use nom::character::complete::{char, multispace0, multispace1};
use nom::combinator::{all_consuming, map, map_opt, opt, recognize, rest};
use nom::multi::{many0, many1, separated_list1};
use nom::sequence::{pair, preceded, tuple};
use sj_syntax::VarType;
use std::fmt;

/// Which control-flow keyword opened a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `if (...) {`
    If,
    /// `while (...) {`
    While,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::If => "if",
            Self::While => "while",
        })
    }
}

/// One `name [= value]` entry of a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declarator {
    /// Declared name
    pub name: String,
    /// Initial value text, if any
    pub value: Option<String>,
}

/// One `name = value` entry of an assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Assigned name
    pub name: String,
    /// Value text
    pub value: String,
}

/// The kind of a normalized line, with its captured sub-text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `[final] type name [= value], ...;`
    VariableDeclaration {
        /// Declared type
        ty: VarType,
        /// Whether `final` was given
        is_final: bool,
        /// Entries in source order
        declarators: Vec<Declarator>,
    },
    /// `name = value, ...;`
    Assignment {
        /// Entries in source order
        bindings: Vec<Binding>,
    },
    /// `void name(params) {`
    MethodDeclaration {
        /// Method name
        name: String,
        /// Raw text between the parentheses
        parameters: String,
    },
    /// `name(args);`
    MethodCall {
        /// Method called
        name: String,
        /// Argument texts, empty entries kept
        arguments: Vec<String>,
    },
    /// `if (condition) {`
    If {
        /// Text between the outer parentheses
        condition: String,
    },
    /// `while (condition) {`
    While {
        /// Text between the outer parentheses
        condition: String,
    },
    /// `return;`
    Return,
    /// `}`
    BlockClose,
    /// Anything else
    Unrecognized,
}

impl Statement {
    /// Short human name used in diagnostics and logs
    pub fn describe(&self) -> &'static str {
        match self {
            Self::VariableDeclaration { .. } => "variable declaration",
            Self::Assignment { .. } => "assignment",
            Self::MethodDeclaration { .. } => "method declaration",
            Self::MethodCall { .. } => "method call",
            Self::If { .. } => "if block",
            Self::While { .. } => "while block",
            Self::Return => "return statement",
            Self::BlockClose => "closing brace",
            Self::Unrecognized => "unrecognized statement",
        }
    }
}

/// Classify one normalized (trimmed, non-blank, non-comment) line
pub fn classify(text: &str) -> Statement {
    if text == "}" {
        return Statement::BlockClose;
    }

    all_consuming(alt((
        declaration,
        assignment,
        method_declaration,
        method_call,
        return_statement,
        if_header,
        while_header,
    )))(text)
    .map_or(Statement::Unrecognized, |(_, statement)| statement)
}

/// Value text up to the next `,` or `;` outside quotes, trailing blanks removed
fn value_text(input: &str) -> IResult<&str, String> {
    map(
        recognize(many1(alt((quoted, is_not(",;\"'"))))),
        |value: &str| value.trim_end().to_owned(),
    )(input)
}

fn declarator(input: &str) -> IResult<&str, Declarator> {
    map(
        pair(word, opt(preceded(equals, value_text))),
        |(name, value)| Declarator {
            name: name.to_owned(),
            value,
        },
    )(input)
}

fn declaration(input: &str) -> IResult<&str, Statement> {
    let (input, is_final) = final_modifier(input)?;
    let (input, ty) = var_type(input)?;
    let (input, _) = multispace1(input)?;
    let (input, declarators) = separated_list1(list_separator, declarator)(input)?;
    let (input, ()) = statement_end(input)?;
    Ok((
        input,
        Statement::VariableDeclaration {
            ty,
            is_final,
            declarators,
        },
    ))
}

fn binding(input: &str) -> IResult<&str, Binding> {
    map(
        tuple((word, equals, value_text)),
        |(name, (), value)| Binding {
            name: name.to_owned(),
            value,
        },
    )(input)
}

fn assignment(input: &str) -> IResult<&str, Statement> {
    let (input, bindings) = separated_list1(list_separator, binding)(input)?;
    let (input, ()) = statement_end(input)?;
    Ok((input, Statement::Assignment { bindings }))
}

/// `(` ... `)`, where a `)` inside quotes does not close
fn parenthesized(input: &str) -> IResult<&str, &str> {
    let (input, _) = pair(multispace0, char('('))(input)?;
    let (input, inner) = recognize(many0(alt((quoted, is_not(")\"'")))))(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, inner))
}

fn method_declaration(input: &str) -> IResult<&str, Statement> {
    let (input, _) = pair(tag("void"), multispace1)(input)?;
    let (input, name) = word(input)?;
    let (input, parameters) = parenthesized(input)?;
    let (input, _) = pair(multispace0, char('{'))(input)?;
    Ok((
        input,
        Statement::MethodDeclaration {
            name: name.to_owned(),
            parameters: parameters.trim().to_owned(),
        },
    ))
}

fn method_call(input: &str) -> IResult<&str, Statement> {
    let (input, name) = word(input)?;
    let (input, arguments) = parenthesized(input)?;
    let (input, ()) = statement_end(input)?;
    Ok((
        input,
        Statement::MethodCall {
            name: name.to_owned(),
            arguments: split_arguments(arguments),
        },
    ))
}

fn return_statement(input: &str) -> IResult<&str, Statement> {
    map(pair(tag("return"), statement_end), |_| Statement::Return)(input)
}

/// Text between the header's `(` and the last `)` before the trailing `{`
fn header_condition(input: &str) -> Option<&str> {
    input.strip_suffix('{')?.trim_end().strip_suffix(')')
}

fn block_condition<'src>(keyword: &'static str) -> impl FnMut(&'src str) -> IResult<&'src str, String> {
    map(
        preceded(
            tuple((tag(keyword), multispace0, char('('))),
            map_opt(rest, header_condition),
        ),
        str::to_owned,
    )
}

fn if_header(input: &str) -> IResult<&str, Statement> {
    map(block_condition("if"), |condition| Statement::If { condition })(input)
}

fn while_header(input: &str) -> IResult<&str, Statement> {
    map(block_condition("while"), |condition| Statement::While {
        condition,
    })(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declarator_of(name: &str, value: Option<&str>) -> Declarator {
        Declarator {
            name: name.to_owned(),
            value: value.map(str::to_owned),
        }
    }

    #[test]
    fn test_declarations() {
        assert_eq!(
            classify("final int a = 5, b, c=a ;"),
            Statement::VariableDeclaration {
                ty: VarType::Int,
                is_final: true,
                declarators: vec![
                    declarator_of("a", Some("5")),
                    declarator_of("b", None),
                    declarator_of("c", Some("a")),
                ],
            }
        );
        assert_eq!(
            classify("String s = \"hi there\";"),
            Statement::VariableDeclaration {
                ty: VarType::String,
                is_final: false,
                declarators: vec![declarator_of("s", Some("\"hi there\""))],
            }
        );
    }

    #[test]
    fn test_separators_inside_literals() {
        assert_eq!(
            classify("String s = \"a, b\", t = \"x;y\";"),
            Statement::VariableDeclaration {
                ty: VarType::String,
                is_final: false,
                declarators: vec![
                    declarator_of("s", Some("\"a, b\"")),
                    declarator_of("t", Some("\"x;y\"")),
                ],
            }
        );
        assert_eq!(
            classify("c = ',';"),
            Statement::Assignment {
                bindings: vec![Binding {
                    name: "c".to_owned(),
                    value: "','".to_owned(),
                }],
            }
        );
        assert_eq!(
            classify("f(\")\", \"x,y\");"),
            Statement::MethodCall {
                name: "f".to_owned(),
                arguments: vec!["\")\"".to_owned(), "\"x,y\"".to_owned()],
            }
        );
        assert_eq!(classify("String s = \"open;"), Statement::Unrecognized);
    }

    #[test]
    fn test_missing_spacing_is_not_a_declaration() {
        assert_eq!(
            classify("intx = 5;"),
            Statement::Assignment {
                bindings: vec![Binding {
                    name: "intx".to_owned(),
                    value: "5".to_owned(),
                }],
            }
        );
        assert_eq!(classify("finalint x = 5;"), Statement::Unrecognized);
        assert_eq!(classify("int x = 5"), Statement::Unrecognized);
    }

    #[test]
    fn test_assignments() {
        assert_eq!(
            classify("a = 1, b = c;"),
            Statement::Assignment {
                bindings: vec![
                    Binding {
                        name: "a".to_owned(),
                        value: "1".to_owned(),
                    },
                    Binding {
                        name: "b".to_owned(),
                        value: "c".to_owned(),
                    },
                ],
            }
        );
        assert_eq!(classify("a = ;"), Statement::Unrecognized);
        assert_eq!(classify("a = 1,;"), Statement::Unrecognized);
    }

    #[test]
    fn test_methods() {
        assert_eq!(
            classify("void foo ( int a, final String b ) {"),
            Statement::MethodDeclaration {
                name: "foo".to_owned(),
                parameters: "int a, final String b".to_owned(),
            }
        );
        assert_eq!(
            classify("foo(1, x ,'c');"),
            Statement::MethodCall {
                name: "foo".to_owned(),
                arguments: vec!["1".to_owned(), "x".to_owned(), "'c'".to_owned()],
            }
        );
        assert_eq!(
            classify("foo();"),
            Statement::MethodCall {
                name: "foo".to_owned(),
                arguments: Vec::new(),
            }
        );
        assert_eq!(classify("voidfoo() {"), Statement::Unrecognized);
        assert_eq!(classify("int foo() {"), Statement::Unrecognized);
    }

    #[test]
    fn test_block_headers() {
        assert_eq!(
            classify("if (a && (b)) {"),
            Statement::If {
                condition: "a && (b)".to_owned(),
            }
        );
        assert_eq!(
            classify("while(true){"),
            Statement::While {
                condition: "true".to_owned(),
            }
        );
        assert_eq!(classify("if (a)"), Statement::Unrecognized);
        assert_eq!(classify("iff (a) {"), Statement::Unrecognized);
    }

    #[test]
    fn test_return_and_close() {
        assert_eq!(classify("return;"), Statement::Return);
        assert_eq!(classify("return   ;"), Statement::Return);
        assert_eq!(classify("return 1;"), Statement::Unrecognized);
        assert_eq!(classify("}"), Statement::BlockClose);
        assert_eq!(classify("} x"), Statement::Unrecognized);
    }

    #[test]
    fn test_describe() {
        assert_eq!(classify("while (x || y) {").describe(), "while block");
        assert_eq!(classify("x;").describe(), "unrecognized statement");
        assert_eq!(BlockKind::If.to_string(), "if");
    }
}
