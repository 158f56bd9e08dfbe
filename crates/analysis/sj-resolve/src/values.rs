//! Typing of values and call arguments

use crate::error::ErrorKind;
use crate::scope::{ScopeId, ScopeTree};
use crate::suggest;
use sj_syntax::{VarType, is_reserved, is_variable_name, literal_type};

/// Type of `text` read from `scope`.
///
/// Literals are typed by the literal grammar (int before double before
/// boolean). Identifiers must resolve to an initialized variable. `Ok(None)`
/// means the text is neither.
///
/// # Errors
///
/// `UndeclaredVariable` or `UninitializedVariable` for identifiers that cannot
/// be read.
pub fn value_type(tree: &ScopeTree, scope: ScopeId, text: &str) -> Result<Option<VarType>, ErrorKind> {
    if let Some(ty) = literal_type(text) {
        return Ok(Some(ty));
    }
    if !is_variable_name(text) || is_reserved(text) {
        return Ok(None);
    }
    read_variable(tree, scope, text).map(Some)
}

/// Declared type of an identifier that is visible and initialized
pub(crate) fn read_variable(tree: &ScopeTree, scope: ScopeId, name: &str) -> Result<VarType, ErrorKind> {
    let Some(variable) = tree.resolve(scope, name) else {
        return Err(ErrorKind::UndeclaredVariable {
            name: name.to_owned(),
            suggestion: suggest::closest(name, tree.visible_names(scope)),
        });
    };
    if !variable.is_initialized {
        return Err(ErrorKind::UninitializedVariable(name.to_owned()));
    }
    Ok(variable.ty)
}

/// Check that `text` may be stored into a slot of type `expected`
///
/// # Errors
///
/// `TypeMismatch` when the value has an incompatible type, `InvalidValue` when
/// it is neither a literal nor an identifier, and the identifier errors of
/// [`value_type`].
pub fn check_value(tree: &ScopeTree, scope: ScopeId, expected: VarType, text: &str) -> Result<(), ErrorKind> {
    match value_type(tree, scope, text)? {
        Some(found) if expected.accepts(found) => Ok(()),
        Some(found) => Err(ErrorKind::TypeMismatch {
            value: text.to_owned(),
            expected,
            found,
        }),
        None => Err(ErrorKind::InvalidValue {
            value: text.to_owned(),
            expected,
        }),
    }
}
