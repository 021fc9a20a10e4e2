// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Statement parsing.

use super::Parser;
use crate::ast::{BlockStmt, Stmt};
use crate::source_analysis::Token;

impl Parser<'_> {
    pub(super) fn parse_block_stmt(&mut self) -> BlockStmt {
        let left_brace = self.expect(Token::LeftBrace);
        let list = self.parse_stmt_list();
        let right_brace = self.expect(Token::RightBrace);

        BlockStmt {
            left_brace,
            list,
            right_brace,
        }
    }

    // TODO: statement grammar; block bodies parse as empty lists for now.
    fn parse_stmt_list(&mut self) -> Vec<Stmt> {
        Vec::new()
    }
}
