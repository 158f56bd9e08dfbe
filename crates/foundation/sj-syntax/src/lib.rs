//! Lexical building blocks of the s-Java subset
//!
//! This crate holds the pieces every later stage agrees on:
//! - **Types**: the five primitive [`VarType`]s and the assignment compatibility table
//! - **Literals**: recognizers for int, double, boolean, char and string literals
//! - **Names**: variable and method identifier grammar, plus reserved words

pub mod literals;
pub mod names;
pub mod types;

pub use literals::{
    is_boolean_literal, is_char_literal, is_double_literal, is_int_literal, is_string_literal,
    literal_matches, literal_type,
};
pub use names::{
    NameError, RESERVED_WORDS, check_method_name, check_variable_name, is_method_name,
    is_reserved, is_variable_name,
};
pub use types::VarType;
