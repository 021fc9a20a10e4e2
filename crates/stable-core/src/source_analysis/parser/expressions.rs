// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Identifier and type parsing.

use ecow::EcoString;

use super::{Parser, expr_end};
use crate::ast::{BadExpr, Expr, Ident, SelectorExpr};
use crate::source_analysis::Token;

impl Parser<'_> {
    pub(super) fn parse_ident(&mut self) -> Ident {
        let pos = self.pos;
        let mut name = EcoString::from("_");
        if self.tok == Token::Ident {
            name = self.lit.clone();
            self.next();
        } else {
            self.expect(Token::Ident);
        }

        Ident {
            name_pos: pos,
            name,
        }
    }

    pub(super) fn parse_type(&mut self) -> Expr {
        if let Some(typ) = self.try_ident_or_type() {
            return typ;
        }

        let pos = self.pos;
        self.error_expected(pos, "type");
        self.advance(expr_end);
        Expr::Bad(BadExpr {
            from: pos,
            to: self.pos,
        })
    }

    pub(super) fn try_ident_or_type(&mut self) -> Option<Expr> {
        match self.tok {
            Token::Any | Token::Bool | Token::Void => {
                self.next();
                Some(Expr::Ident(Ident {
                    name_pos: self.pos,
                    name: self.tok.as_str().into(),
                }))
            }
            Token::Ident => Some(self.parse_type_name(None)),
            _ => None, // no type found
        }
    }

    fn parse_type_name(&mut self, ident: Option<Ident>) -> Expr {
        let ident = match ident {
            Some(ident) => ident,
            None => self.parse_ident(),
        };

        if self.tok == Token::Period {
            // The identifier is a package name.
            self.next();
            let sel = self.parse_ident();
            return Expr::Selector(SelectorExpr {
                x: Box::new(Expr::Ident(ident)),
                sel,
            });
        }
        Expr::Ident(ident)
    }
}
