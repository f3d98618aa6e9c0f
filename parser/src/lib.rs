//! Sculptor Parser
//!
//! This crate provides the syntax engine for PHP class files:
//! - Lexing of PHP source (tags, comments, strings, heredocs, operators)
//! - Parsing into a structural tree (namespaces, imports, classes, members)
//! - Opaque statement splitting for routine bodies
//! - Printing back to source text with the original layout where untouched
//! - Error handling with location information

mod ast;
mod error;
mod lexer;
mod parser;
mod printer;

pub use ast::*;
pub use error::*;
pub use parser::{parse_expr, parse_file, parse_fragment, Parser};
pub use printer::{dominant_line_ending, print_expr, print_file, PrintConfig};
