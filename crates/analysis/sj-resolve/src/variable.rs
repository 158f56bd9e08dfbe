//! Variable descriptors

use sj_parser::Parameter;
use sj_span::LineNumber;
use sj_syntax::VarType;

/// A declared variable or parameter and its initialization state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Variable name
    pub name: String,
    /// Declared type
    pub ty: VarType,
    /// Declared `final`
    pub is_final: bool,
    /// Holds a value, either from its declaration or a later assignment
    pub is_initialized: bool,
    /// Introduced by a method's parameter list
    pub is_parameter: bool,
    /// Line of the declaration, or of the method header for parameters
    pub decl_line: LineNumber,
}

impl Variable {
    /// A variable introduced by a declaration statement
    pub fn declared(
        name: impl Into<String>,
        ty: VarType,
        is_final: bool,
        is_initialized: bool,
        decl_line: LineNumber,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            is_final,
            is_initialized,
            is_parameter: false,
            decl_line,
        }
    }

    /// A method parameter; parameters are always initialized
    pub fn parameter(parameter: &Parameter, decl_line: LineNumber) -> Self {
        Self {
            name: parameter.name.clone(),
            ty: parameter.ty,
            is_final: parameter.is_final,
            is_initialized: true,
            is_parameter: true,
            decl_line,
        }
    }

    /// Whether an assignment to this variable is allowed at all
    pub fn is_assignable(&self) -> bool {
        !(self.is_final && self.is_initialized)
    }
}
