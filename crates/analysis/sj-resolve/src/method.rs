//! Method signatures and the file-wide registry

use crate::error::ErrorKind;
use crate::scope::ScopeId;
use crate::variable::Variable;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use sj_span::LineNumber;
use std::ops::Range;

/// A registered method
#[derive(Debug, Clone)]
pub struct Method {
    /// Method name
    pub name: String,
    /// Parameters in declaration order
    pub parameters: Vec<Variable>,
    /// Line of the `void` header
    pub decl_line: LineNumber,
    /// Body lines, excluding the header and the closing brace
    pub body_range: Range<usize>,
    /// Set once the body has been validated
    pub body: Option<ScopeId>,
}

impl Method {
    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// Every method of a source unit, filled before any body is checked
///
/// Methods live in their own namespace, so a method and a variable may share
/// a name.
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    methods: IndexMap<String, Method, FxBuildHasher>,
}

impl MethodRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::DuplicateMethod` if the name is taken. Parameter
    /// lists are not compared; there is no overloading.
    pub fn register(&mut self, method: Method) -> Result<(), ErrorKind> {
        if self.methods.contains_key(&method.name) {
            return Err(ErrorKind::DuplicateMethod(method.name));
        }
        self.methods.insert(method.name.clone(), method);
        Ok(())
    }

    /// Method registered under `name`
    pub fn resolve(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    pub(crate) fn get_index(&self, position: usize) -> Option<&Method> {
        self.methods.get_index(position).map(|(_, method)| method)
    }

    pub(crate) fn attach_body(&mut self, name: &str, body: ScopeId) {
        if let Some(method) = self.methods.get_mut(name) {
            method.body = Some(body);
        }
    }

    /// Methods in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Method> {
        self.methods.values()
    }

    /// Registered names, in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Number of registered methods
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether no method is registered
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
