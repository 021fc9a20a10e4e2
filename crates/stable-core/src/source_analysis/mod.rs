// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical and syntactic analysis for Stable source code.
//!
//! This module contains the position registry, the token catalog, the
//! lexer, and the parser.
//!
//! # Positions
//!
//! A [`FileSet`] assigns every byte of every registered source file a
//! unique integer [`Pos`] and maps positions back to human-readable
//! [`Position`] records (file, line, column) in logarithmic time.
//! Positions are what every token and AST node carries.
//!
//! # Lexical analysis
//!
//! The [`Lexer`] converts source bytes into `(position, token, literal)`
//! triples, inserting the automatic semicolons that terminate statements
//! at newlines. It recovers from every lexical error: problems are
//! reported through an error callback and scanning continues.
//!
//! ```
//! use stable_core::source_analysis::{FileSet, Lexer, Token};
//!
//! let src = b"x + 1";
//! let mut fset = FileSet::new();
//! let file = fset.add_file("demo.stb", None, src.len() as u32);
//! let mut lexer = Lexer::new(file, src, None);
//!
//! let (_, tok, lit) = lexer.scan();
//! assert_eq!((tok, lit.as_str()), (Token::Ident, "x"));
//! ```
//!
//! # Parsing
//!
//! [`parse_file`] drives the lexer and builds an
//! [`ast::File`](crate::ast::File), collecting all source errors into an
//! [`ErrorList`] instead of stopping at the first problem.

mod error;
mod lexer;
mod parser;
mod position;
pub mod token;

#[cfg(test)]
mod lexer_property_tests;

pub use error::{ErrorList, SourceError, SyntaxError};
pub use lexer::{ErrorHandler, Lexer};
pub use parser::{SourceInput, parse_file};
pub use position::{File, FileSet, Pos, Position};
pub use token::Token;
