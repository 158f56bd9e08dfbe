//! Scope resolution and semantic validation for s-Java
//!
//! This crate turns normalized source lines into a validated scope tree or
//! the first violation found.
//!
//! # Architecture
//!
//! - **Variable tables**: local declarations of one scope, duplicates rejected
//! - **Method registry**: every method of the file, registered before any body
//!   is checked so calls may refer forward
//! - **Scope tree**: file, method and block scopes in an arena, with lookups
//!   walking parent links
//! - **Validator**: the two-pass driver that processes statements, checks
//!   values, calls and conditions, and enforces the trailing `return;`
//!
//! # Usage
//!
//! ```rust,ignore
//! use sj_resolve::{CheckOptions, validate};
//!
//! let lines = sj_parser::preprocess(source);
//! let program = validate(&lines, &CheckOptions::default())?;
//! ```

pub mod condition;
pub mod error;
pub mod method;
pub mod scope;
mod suggest;
pub mod table;
pub mod validator;
pub mod values;
pub mod variable;

pub use condition::check_condition;
pub use error::{Category, CheckError, CheckResult, ErrorKind};
pub use method::{Method, MethodRegistry};
pub use scope::{Scope, ScopeId, ScopeKind, ScopeTree};
pub use table::VariableTable;
pub use validator::{CheckOptions, Program, validate};
pub use values::{check_value, value_type};
pub use variable::Variable;
