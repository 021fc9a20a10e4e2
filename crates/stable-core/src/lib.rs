// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Stable compiler front-end.
//!
//! This crate contains the front-end of the Stable compiler:
//! - Position registry (mapping byte positions to file/line/column)
//! - Lexical analysis (tokenization with automatic semicolon insertion)
//! - Parsing (AST construction with error recovery)
//!
//! Later compilation stages (semantic analysis, code generation) live
//! outside this crate and consume the [`ast`] it produces.

#![doc = include_str!("../../../README.md")]

pub mod ast;
pub mod source_analysis;

/// Re-export of commonly used types.
pub mod prelude {
    pub use crate::ast::{self, Decl, Expr, Node, Stmt};
    pub use crate::source_analysis::{
        ErrorList, FileSet, Lexer, Pos, Position, Token, parse_file,
    };
}
