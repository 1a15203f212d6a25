//! Shared types for the Surplus preprocessor.
//!
//! This crate defines the template AST node types and source spans handed
//! from the parser to the shim pass and on to the code generator.

mod span;
pub mod ast;

pub use span::Span;
