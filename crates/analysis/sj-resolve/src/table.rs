//! Per-scope variable tables

use crate::error::ErrorKind;
use crate::variable::Variable;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// Local declarations of one scope, in declaration order
///
/// Lookups here never walk to enclosing scopes; that is the scope tree's job.
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    variables: IndexMap<String, Variable, FxBuildHasher>,
}

impl VariableTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::DuplicateVariable` if the name is already declared
    /// in this table, whatever its type or finality.
    pub fn declare(&mut self, variable: Variable) -> Result<(), ErrorKind> {
        if self.variables.contains_key(&variable.name) {
            return Err(ErrorKind::DuplicateVariable(variable.name));
        }
        self.variables.insert(variable.name.clone(), variable);
        Ok(())
    }

    /// Variable declared under `name` in this table only
    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Mutable [`lookup`](Self::lookup)
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.get_mut(name)
    }

    /// Whether `name` is declared here
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Variables in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    /// Number of declared variables
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether nothing is declared here
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
