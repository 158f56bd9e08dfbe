//! Validation of a whole source unit
//!
//! Validation runs in two passes over the normalized lines:
//! 1. The file pass walks top-level lines only. It registers every method
//!    (skipping over its body) and processes global declarations and
//!    assignments, so globals declared after a method are still globals.
//! 2. The method pass validates each body in declaration order, recursing
//!    into `if`/`while` blocks as their headers are reached.
//!
//! The first violation aborts validation.

use crate::condition::check_condition;
use crate::error::{CheckError, CheckResult, ErrorKind};
use crate::method::{Method, MethodRegistry};
use crate::scope::{ScopeId, ScopeKind, ScopeTree};
use crate::suggest;
use crate::values::{check_value, value_type};
use crate::variable::Variable;
use log::{debug, trace};
use sj_parser::{
    Binding, BlockKind, BraceScan, Declarator, Statement, classify, find_block_end,
    parse_parameters,
};
use sj_span::{LineNumber, SourceLine};
use sj_syntax::{VarType, check_method_name, check_variable_name};
use std::ops::Range;

/// Knobs that change how a source unit is read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// How block ends are located
    pub brace_scan: BraceScan,
}

/// A source unit that passed validation
#[derive(Debug, Clone)]
pub struct Program {
    /// Every scope created while validating
    pub tree: ScopeTree,
    /// Every method, with its body scope attached
    pub registry: MethodRegistry,
}

impl Program {
    /// Body scope of the method called `name`
    pub fn method_scope(&self, name: &str) -> Option<ScopeId> {
        self.registry.resolve(name)?.body
    }

    /// Look `name` up from `scope` through the scope chain
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<&Variable> {
        self.tree.resolve(scope, name)
    }

    /// A global as it stands after the file pass and every method body
    pub fn global(&self, name: &str) -> Option<&Variable> {
        self.tree.scope(self.tree.root()).variables.lookup(name)
    }
}

/// Validate normalized source lines.
///
/// # Errors
///
/// Returns the first violation found, in line order with nested blocks
/// checked before the lines that follow them.
pub fn validate(lines: &[SourceLine], options: &CheckOptions) -> CheckResult<Program> {
    let mut validator = Validator {
        lines,
        options,
        tree: ScopeTree::new(0..lines.len()),
        registry: MethodRegistry::new(),
    };

    debug!("file pass over {} lines", lines.len());
    validator.check_file()?;
    debug!("registered {} methods", validator.registry.len());

    for position in 0..validator.registry.len() {
        validator.check_method(position)?;
    }

    Ok(Program {
        tree: validator.tree,
        registry: validator.registry,
    })
}

/// Most recent statement seen in a method body, by line order
#[derive(Debug, Clone, Copy)]
struct LastStatement {
    line: LineNumber,
    is_return: bool,
}

struct Validator<'src> {
    lines: &'src [SourceLine],
    options: &'src CheckOptions,
    tree: ScopeTree,
    registry: MethodRegistry,
}

impl Validator<'_> {
    fn check_file(&mut self) -> CheckResult<()> {
        let lines = self.lines;
        let root = self.tree.root();
        let mut idx = 0;

        while idx < lines.len() {
            let line = &lines[idx];
            let statement = classify(&line.text);
            trace!("line {}: {}", line.number, statement.describe());

            match statement {
                Statement::MethodDeclaration { name, parameters } => {
                    idx = self.register_method(idx, name, &parameters)?;
                }
                Statement::VariableDeclaration {
                    ty,
                    is_final,
                    declarators,
                } => self.declare(root, line.number, ty, is_final, &declarators)?,
                Statement::Assignment { bindings } => self.assign(root, line.number, &bindings)?,
                Statement::MethodCall { .. } => {
                    return Err(ErrorKind::CallOutsideMethod.at(line.number));
                }
                Statement::If { .. } | Statement::While { .. } | Statement::Return => {
                    return Err(ErrorKind::StatementOutsideMethod.at(line.number));
                }
                Statement::BlockClose => return Err(ErrorKind::UnexpectedClose.at(line.number)),
                Statement::Unrecognized => {
                    return Err(ErrorKind::Unrecognized(line.text.clone()).at(line.number));
                }
            }
            idx += 1;
        }
        Ok(())
    }

    /// Register the method declared at `header` and return the index of its
    /// closing line
    fn register_method(&mut self, header: usize, name: String, parameters: &str) -> CheckResult<usize> {
        let line = self.lines[header].number;

        check_method_name(&name).map_err(|reason| {
            ErrorKind::InvalidMethodName {
                name: name.clone(),
                reason,
            }
            .at(line)
        })?;

        let parsed = parse_parameters(parameters)
            .map_err(|err| ErrorKind::InvalidParameters(err).at(line))?;
        for parameter in &parsed {
            check_variable_name(&parameter.name).map_err(|reason| {
                ErrorKind::InvalidVariableName {
                    name: parameter.name.clone(),
                    reason,
                }
                .at(line)
            })?;
        }

        let end = self.block_end(header)?;
        self.check_close(end)?;
        debug!("method `{name}` at line {line} spans lines {header}..={end}");

        self.registry
            .register(Method {
                name,
                parameters: parsed
                    .iter()
                    .map(|parameter| Variable::parameter(parameter, line))
                    .collect(),
                decl_line: line,
                body_range: header + 1..end,
                body: None,
            })
            .map_err(|kind| kind.at(line))?;

        Ok(end)
    }

    fn check_method(&mut self, position: usize) -> CheckResult<()> {
        let Some(method) = self.registry.get_index(position) else {
            return Ok(());
        };
        let name = method.name.clone();
        let line = method.decl_line;
        let range = method.body_range.clone();
        let parameters = method.parameters.clone();

        let root = self.tree.root();
        let scope = self.tree.alloc_child(
            root,
            ScopeKind::Method { name: name.clone() },
            range.clone(),
        );
        self.registry.attach_body(&name, scope);

        for parameter in parameters {
            self.tree
                .scope_mut(scope)
                .variables
                .declare(parameter)
                .map_err(|kind| kind.at(line))?;
        }
        self.shadow_globals(scope, line)?;

        let mut last = None;
        self.check_body(scope, range, &mut last)?;

        match last {
            None => Err(ErrorKind::EmptyMethod(name).at(line)),
            Some(LastStatement {
                line: last_line,
                is_return: false,
            }) => Err(ErrorKind::MissingReturn.at(last_line)),
            Some(_) => Ok(()),
        }
    }

    /// Give the method scope its own copy of every global that is still
    /// uninitialized and not hidden by a parameter
    fn shadow_globals(&mut self, scope: ScopeId, line: LineNumber) -> CheckResult<()> {
        let root = self.tree.root();
        let copies: Vec<Variable> = self
            .tree
            .scope(root)
            .variables
            .iter()
            .filter(|global| !global.is_initialized)
            .filter(|global| !self.tree.scope(scope).variables.contains(&global.name))
            .cloned()
            .collect();

        if let Some(shadow) = self.tree.scope_mut(scope).shadow.as_mut() {
            for copy in copies {
                shadow.declare(copy).map_err(|kind| kind.at(line))?;
            }
        }
        Ok(())
    }

    /// Validate the statements of `range` inside `scope`
    fn check_body(
        &mut self,
        scope: ScopeId,
        range: Range<usize>,
        last: &mut Option<LastStatement>,
    ) -> CheckResult<()> {
        let lines = self.lines;
        let mut idx = range.start;

        while idx < range.end {
            let line = &lines[idx];
            let number = line.number;
            let statement = classify(&line.text);
            trace!("line {number}: {}", statement.describe());

            *last = Some(LastStatement {
                line: number,
                is_return: matches!(statement, Statement::Return),
            });

            match statement {
                Statement::VariableDeclaration {
                    ty,
                    is_final,
                    declarators,
                } => self.declare(scope, number, ty, is_final, &declarators)?,
                Statement::Assignment { bindings } => self.assign(scope, number, &bindings)?,
                Statement::MethodCall { name, arguments } => {
                    self.call(scope, &name, &arguments).map_err(|kind| kind.at(number))?;
                }
                Statement::If { condition } => {
                    idx = self.check_block(scope, idx, BlockKind::If, condition, last)?;
                }
                Statement::While { condition } => {
                    idx = self.check_block(scope, idx, BlockKind::While, condition, last)?;
                }
                Statement::Return => {}
                Statement::MethodDeclaration { .. } => {
                    return Err(ErrorKind::NestedMethod.at(number));
                }
                Statement::BlockClose => return Err(ErrorKind::UnexpectedClose.at(number)),
                Statement::Unrecognized => {
                    return Err(ErrorKind::Unrecognized(line.text.clone()).at(number));
                }
            }
            idx += 1;
        }
        Ok(())
    }

    /// Validate the block opened at `header` and return the index of its
    /// closing line
    fn check_block(
        &mut self,
        parent: ScopeId,
        header: usize,
        kind: BlockKind,
        condition: String,
        last: &mut Option<LastStatement>,
    ) -> CheckResult<usize> {
        check_condition(&self.tree, parent, &condition)
            .map_err(|err| err.at(self.lines[header].number))?;

        let end = self.block_end(header)?;
        let range = header + 1..end;

        let block = self
            .tree
            .alloc_child(parent, ScopeKind::Block { kind, condition }, range.clone());
        debug!(
            "{kind} block at line {} (depth {})",
            self.lines[header].number,
            self.tree.depth(block)
        );

        self.check_body(block, range, last)?;
        self.check_close(end)?;
        Ok(end)
    }

    fn block_end(&self, header: usize) -> CheckResult<usize> {
        find_block_end(self.lines, header, self.options.brace_scan).ok_or_else(|| {
            CheckError::unlined(ErrorKind::UnterminatedBlock {
                header: self.lines[header].number,
            })
        })
    }

    /// The line at `end` must be a bare `}`
    fn check_close(&self, end: usize) -> CheckResult<()> {
        let line = &self.lines[end];
        if classify(&line.text) == Statement::BlockClose {
            Ok(())
        } else {
            Err(ErrorKind::MalformedClose.at(line.number))
        }
    }

    fn declare(
        &mut self,
        scope: ScopeId,
        line: LineNumber,
        ty: VarType,
        is_final: bool,
        declarators: &[Declarator],
    ) -> CheckResult<()> {
        for declarator in declarators {
            let name = &declarator.name;
            check_variable_name(name).map_err(|reason| {
                ErrorKind::InvalidVariableName {
                    name: name.clone(),
                    reason,
                }
                .at(line)
            })?;

            if self.tree.scope(scope).variables.contains(name) {
                return Err(ErrorKind::DuplicateVariable(name.clone()).at(line));
            }

            let is_initialized = match &declarator.value {
                Some(value) => {
                    check_value(&self.tree, scope, ty, value).map_err(|kind| kind.at(line))?;
                    true
                }
                None if is_final => {
                    return Err(ErrorKind::FinalWithoutValue(name.clone()).at(line));
                }
                None => false,
            };

            self.tree
                .scope_mut(scope)
                .variables
                .declare(Variable::declared(name.clone(), ty, is_final, is_initialized, line))
                .map_err(|kind| kind.at(line))?;
        }
        Ok(())
    }

    fn assign(&mut self, scope: ScopeId, line: LineNumber, bindings: &[Binding]) -> CheckResult<()> {
        for binding in bindings {
            let name = &binding.name;
            let Some(target) = self.tree.resolve(scope, name) else {
                return Err(ErrorKind::UndeclaredVariable {
                    name: name.clone(),
                    suggestion: suggest::closest(name, self.tree.visible_names(scope)),
                }
                .at(line));
            };
            if !target.is_assignable() {
                return Err(ErrorKind::FinalReassignment(name.clone()).at(line));
            }

            let ty = target.ty;
            check_value(&self.tree, scope, ty, &binding.value).map_err(|kind| kind.at(line))?;

            if let Some(target) = self.tree.resolve_mut(scope, name) {
                target.is_initialized = true;
            }
        }
        Ok(())
    }

    fn call(&self, scope: ScopeId, name: &str, arguments: &[String]) -> Result<(), ErrorKind> {
        let Some(method) = self.registry.resolve(name) else {
            return Err(ErrorKind::UnknownMethod {
                name: name.to_owned(),
                suggestion: suggest::closest(name, self.registry.names()),
            });
        };

        if arguments.iter().any(String::is_empty) {
            return Err(ErrorKind::EmptyArgument(name.to_owned()));
        }
        if arguments.len() != method.arity() {
            return Err(ErrorKind::ArgumentCount {
                name: name.to_owned(),
                expected: method.arity(),
                found: arguments.len(),
            });
        }

        for (position, (argument, parameter)) in arguments.iter().zip(&method.parameters).enumerate() {
            let accepted = value_type(&self.tree, scope, argument)?
                .is_some_and(|found| parameter.ty.accepts(found));
            if !accepted {
                return Err(ErrorKind::ArgumentType {
                    name: name.to_owned(),
                    position: position + 1,
                    expected: parameter.ty,
                    value: argument.clone(),
                });
            }
        }
        Ok(())
    }
}
