//! Front end turning Go source text into the [`crate::ast`] model.

pub mod lexer;
pub mod parser;

pub use parser::parse_file;
