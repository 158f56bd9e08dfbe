//! Line-level front end for the s-Java verifier
//!
//! The verifier never builds an expression tree. Instead every source line is
//! normalized once and then classified into exactly one [`Statement`]:
//!
//! - **Preprocessing**: [`preprocess`] drops blank lines and `//` comments and
//!   keeps the original line numbers
//! - **Classification**: [`classify`] recognizes declarations, assignments,
//!   calls, block headers, `return` and `}`
//! - **Lists**: [`parse_parameters`] and [`split_arguments`] break up the text
//!   between parentheses
//! - **Blocks**: [`find_block_end`] locates the line closing a block header

pub mod braces;
pub mod params;
pub mod preprocess;
pub mod statement;
mod util;

pub use braces::{BraceScan, find_block_end};
pub use params::{Parameter, ParameterError, parse_parameters, split_arguments};
pub use preprocess::preprocess;
pub use statement::{Binding, BlockKind, Declarator, Statement, classify};
