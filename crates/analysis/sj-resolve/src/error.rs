//! Error types for scope resolution and validation

use sj_parser::ParameterError;
use sj_span::LineNumber;
use sj_syntax::{NameError, VarType};
use std::fmt;
use thiserror::Error;

/// Broad family an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Structure of scopes and statements
    Scope,
    /// Declaring, assigning and reading variables
    Variable,
    /// Declaring and calling methods
    Method,
    /// `if`/`while` conditions
    Condition,
}

impl Category {
    /// Lowercase name, as used in fixture headers
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scope => "scope",
            Self::Variable => "variable",
            Self::Method => "method",
            Self::Condition => "condition",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// What went wrong, without the location
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Line matches no statement form
    #[error("unrecognized statement `{0}`")]
    Unrecognized(String),

    /// No line closes the block opened at `header`
    #[error("block opened on line {header} is never closed")]
    UnterminatedBlock {
        /// Line of the block's opening header
        header: LineNumber,
    },

    /// Method call at file scope
    #[error("method call outside a method body")]
    CallOutsideMethod,

    /// `if`, `while` or `return` at file scope
    #[error("statement only allowed inside a method body")]
    StatementOutsideMethod,

    /// A `}` with no open block
    #[error("unexpected closing brace")]
    UnexpectedClose,

    /// `void` header inside a body
    #[error("method declared inside a method body")]
    NestedMethod,

    /// The line that ends a block holds more than `}`
    #[error("a block must be closed by a line containing only `}}`")]
    MalformedClose,

    /// Declared or parameter name breaks the identifier rules
    #[error("invalid variable name `{name}`: {reason}")]
    InvalidVariableName {
        /// Name as written
        name: String,
        /// Rule the name breaks
        reason: NameError,
    },

    /// Same name twice in one scope
    #[error("variable `{0}` is already declared in this scope")]
    DuplicateVariable(String),

    /// Name visible from no scope on the chain
    #[error("variable `{name}` is not declared{}", did_you_mean(.suggestion.as_deref()))]
    UndeclaredVariable {
        /// Name as written
        name: String,
        /// Closest visible name, if one is near enough
        suggestion: Option<String>,
    },

    /// Read of a variable with no value yet
    #[error("variable `{0}` is used before it is initialized")]
    UninitializedVariable(String),

    /// `final` declarator with no value
    #[error("final variable `{0}` must be initialized at declaration")]
    FinalWithoutValue(String),

    /// Assignment to a final variable
    #[error("final variable `{0}` cannot be assigned again")]
    FinalReassignment(String),

    /// Value is a variable of an incompatible type
    #[error("type mismatch: `{value}` is {found}, expected {expected}")]
    TypeMismatch {
        /// Value text as written
        value: String,
        /// Type of the target
        expected: VarType,
        /// Type of the variable read
        found: VarType,
    },

    /// Value is neither a compatible literal nor a variable
    #[error("`{value}` is not a valid {expected} value")]
    InvalidValue {
        /// Value text as written
        value: String,
        /// Type of the target
        expected: VarType,
    },

    /// Method name breaks the identifier rules
    #[error("invalid method name `{name}`: {reason}")]
    InvalidMethodName {
        /// Name as written
        name: String,
        /// Rule the name breaks
        reason: NameError,
    },

    /// Second method with a registered name, whatever its parameters
    #[error("method `{0}` is already declared")]
    DuplicateMethod(String),

    /// Parameter list does not parse
    #[error("invalid parameter list: {0}")]
    InvalidParameters(ParameterError),

    /// Method body with no statements at all
    #[error("method `{0}` has no statements")]
    EmptyMethod(String),

    /// Last statement of a method body is not `return;`
    #[error("method must end with `return;`")]
    MissingReturn,

    /// Call to a name the registry does not hold
    #[error("method `{name}` is not declared{}", did_you_mean(.suggestion.as_deref()))]
    UnknownMethod {
        /// Name as written
        name: String,
        /// Closest registered method, if one is near enough
        suggestion: Option<String>,
    },

    /// Wrong number of arguments
    #[error("method `{name}` takes {expected} argument(s) but {found} were given")]
    ArgumentCount {
        /// Method called
        name: String,
        /// Declared arity
        expected: usize,
        /// Arguments passed
        found: usize,
    },

    /// `f(1,,2)` and friends
    #[error("empty argument in call to `{0}`")]
    EmptyArgument(String),

    /// Argument not accepted by its parameter type
    #[error("argument {position} of `{name}` must be {expected}, found `{value}`")]
    ArgumentType {
        /// Method called
        name: String,
        /// 1-based argument position
        position: usize,
        /// Parameter type at that position
        expected: VarType,
        /// Argument text as written
        value: String,
    },

    /// Condition starts or ends with `&&` or `||`
    #[error("condition `{0}` starts or ends with a logical operator")]
    MisplacedOperator(String),

    /// Two operators in a row
    #[error("empty operand in condition `{0}`")]
    EmptyOperand(String),

    /// Operand that is neither a numeric or boolean literal nor a name
    #[error("`{0}` is not a valid condition operand")]
    InvalidOperand(String),

    /// Variable operand of type char or String
    #[error("`{name}` has type {ty} and cannot be used in a condition")]
    OperandType {
        /// Variable read
        name: String,
        /// Its declared type
        ty: VarType,
    },
}

fn did_you_mean(suggestion: Option<&str>) -> String {
    suggestion.map_or_else(String::new, |name| format!(" (did you mean `{name}`?)"))
}

impl ErrorKind {
    /// Family this error is reported under
    pub fn category(&self) -> Category {
        match self {
            Self::Unrecognized(_)
            | Self::UnterminatedBlock { .. }
            | Self::CallOutsideMethod
            | Self::StatementOutsideMethod
            | Self::UnexpectedClose
            | Self::NestedMethod
            | Self::MalformedClose => Category::Scope,

            Self::InvalidVariableName { .. }
            | Self::DuplicateVariable(_)
            | Self::UndeclaredVariable { .. }
            | Self::UninitializedVariable(_)
            | Self::FinalWithoutValue(_)
            | Self::FinalReassignment(_)
            | Self::TypeMismatch { .. }
            | Self::InvalidValue { .. } => Category::Variable,

            Self::InvalidMethodName { .. }
            | Self::DuplicateMethod(_)
            | Self::InvalidParameters(_)
            | Self::EmptyMethod(_)
            | Self::MissingReturn
            | Self::UnknownMethod { .. }
            | Self::ArgumentCount { .. }
            | Self::EmptyArgument(_)
            | Self::ArgumentType { .. } => Category::Method,

            Self::MisplacedOperator(_)
            | Self::EmptyOperand(_)
            | Self::InvalidOperand(_)
            | Self::OperandType { .. } => Category::Condition,
        }
    }

    /// Attach the line the error was found on
    pub fn at(self, line: LineNumber) -> CheckError {
        CheckError {
            kind: self,
            line: Some(line),
        }
    }
}

/// First violation found in a source unit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}{kind}", line_prefix(.line.as_ref()))]
pub struct CheckError {
    /// What went wrong
    pub kind: ErrorKind,
    /// `None` for whole-unit failures such as an unterminated block
    pub line: Option<LineNumber>,
}

fn line_prefix(line: Option<&LineNumber>) -> String {
    line.map_or_else(String::new, |number| format!("line {number}: "))
}

impl CheckError {
    /// An error not tied to a single line
    pub fn unlined(kind: ErrorKind) -> Self {
        Self { kind, line: None }
    }

    /// Shorthand for `self.kind.category()`
    pub fn category(&self) -> Category {
        self.kind.category()
    }
}

/// Result of a validation step
pub type CheckResult<T> = Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn test_display_with_and_without_line() {
        let lined = ErrorKind::DuplicateVariable("x".to_owned()).at(LineNumber(2));
        expect!["line 2: variable `x` is already declared in this scope"]
            .assert_eq(&lined.to_string());

        let unlined = CheckError::unlined(ErrorKind::UnterminatedBlock {
            header: LineNumber(7),
        });
        expect!["block opened on line 7 is never closed"].assert_eq(&unlined.to_string());
    }

    #[test]
    fn test_suggestion_rendering() {
        let kind = ErrorKind::UnknownMethod {
            name: "fo".to_owned(),
            suggestion: Some("foo".to_owned()),
        };
        expect!["method `fo` is not declared (did you mean `foo`?)"].assert_eq(&kind.to_string());

        let kind = ErrorKind::UndeclaredVariable {
            name: "zzz".to_owned(),
            suggestion: None,
        };
        expect!["variable `zzz` is not declared"].assert_eq(&kind.to_string());
    }

    #[test]
    fn test_categories() {
        assert_eq!(ErrorKind::NestedMethod.category(), Category::Scope);
        assert_eq!(
            ErrorKind::FinalWithoutValue("x".to_owned()).category(),
            Category::Variable
        );
        assert_eq!(ErrorKind::MissingReturn.category(), Category::Method);
        assert_eq!(
            ErrorKind::EmptyOperand(String::new()).at(LineNumber(1)).category(),
            Category::Condition
        );
        assert_eq!(Category::Method.to_string(), "method");
    }
}
