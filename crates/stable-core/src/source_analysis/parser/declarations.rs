// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Declaration parsing.
//!
//! A source file is `package <ident> ;` followed by imports followed by
//! other declarations; each declaration form is dispatched on its
//! leading keyword (`const`, `func`, `import`, `struct`, `typedef`,
//! `var`).

use ecow::EcoString;

use super::{Parser, expr_end};
use crate::ast::{
    BadDecl, BadExpr, BasicLit, CommentRef, ConstDecl, Decl, Expr, Field, FieldList,
    FuncDecl, FuncType, Ident, ImportDecl, StructDecl, TypedefDecl, VarDecl,
};
use crate::source_analysis::{Pos, Token};

impl Parser<'_> {
    pub(super) fn parse_package_decl(&mut self) -> (Option<CommentRef>, Pos, Ident) {
        let doc = self.lead_comment;
        let pos = self.expect(Token::Package);

        let ident = self.parse_ident();
        match ident.name.as_str() {
            "_" => self.error(self.pos, "invalid package name _"),
            "builtin" | "init" | "internal" | "vendor" => {
                let msg = format!("package name '{}' is reserved", ident.name);
                self.error(self.pos, &msg);
            }
            _ => {}
        }
        self.expect_semi();

        (doc, pos, ident)
    }

    pub(super) fn parse_decl(&mut self, sync: fn(Token) -> bool) -> Decl {
        match self.tok {
            Token::Const => Decl::Const(self.parse_const_decl()),
            Token::Func => Decl::Func(self.parse_func_decl()),
            Token::Import => Decl::Import(self.parse_import_decl()),
            Token::Struct => Decl::Struct(self.parse_struct_decl()),
            Token::Typedef => Decl::Typedef(self.parse_typedef_decl()),
            Token::Var => Decl::Var(self.parse_var_decl()),
            _ => {
                let pos = self.pos;
                self.error_expected(pos, "declaration");
                self.advance(sync);
                Decl::Bad(BadDecl { from: pos, to: self.pos })
            }
        }
    }

    fn parse_const_decl(&mut self) -> ConstDecl {
        let doc = self.lead_comment;
        self.expect(Token::Const);

        let name = self.parse_ident();
        let typ = self.try_ident_or_type();
        self.expect(Token::Assign);
        // TODO: accept a full expression here once expression parsing lands.
        let value = Expr::Ident(self.parse_ident());

        let comment = self.expect_semi();

        ConstDecl {
            doc,
            name,
            typ,
            value,
            comment,
        }
    }

    fn parse_func_decl(&mut self) -> FuncDecl {
        let doc = self.lead_comment;
        let pos = self.expect(Token::Func);

        let mut recv = None;
        if self.tok == Token::LeftParen {
            self.next();
            recv = Some(self.parse_ident());
            self.expect(Token::RightParen);
        }

        let name = self.parse_ident();
        let params = self.parse_parameters();
        let results = self.parse_result();

        let mut body = None;
        if self.tok == Token::Semicolon {
            self.next();
            if self.tok == Token::LeftBrace {
                // The opening brace must be on the signature's line.
                self.error(self.pos, "unexpected semicolon or newline before {");
                body = Some(self.parse_block_stmt());
                self.expect_semi();
            } else {
                self.expect(Token::LeftBrace);
            }
        } else {
            body = Some(self.parse_block_stmt());
            self.expect_semi();
        }

        FuncDecl {
            doc,
            recv,
            name,
            typ: FuncType {
                func: pos,
                params,
                results,
            },
            body,
        }
    }

    pub(super) fn parse_import_decl(&mut self) -> ImportDecl {
        let doc = self.lead_comment;
        let pos = self.expect(Token::Import);

        let mut name = None;
        match self.tok {
            Token::Ident => name = Some(self.parse_ident()),
            Token::Period => {
                name = Some(Ident {
                    name_pos: self.pos,
                    name: ".".into(),
                });
                self.next();
            }
            _ => {}
        }

        let mut path = EcoString::new();
        if self.tok == Token::String {
            path = self.lit.clone();
            self.next();
        } else if self.tok.is_literal() {
            self.error(pos, "import path must be a string");
            self.next();
        } else {
            self.error(pos, "missing import path");
            self.advance(expr_end);
        }
        let comment = self.expect_semi();

        ImportDecl {
            doc,
            name,
            path: BasicLit {
                value_pos: pos,
                kind: Token::String,
                value: path,
            },
            comment,
            end_pos: Pos::NONE,
        }
    }

    fn parse_struct_decl(&mut self) -> StructDecl {
        let doc = self.lead_comment;
        self.expect(Token::Struct);
        let name = self.parse_ident();

        let left_brace = self.expect(Token::LeftBrace);
        let mut list = Vec::new();
        while self.tok == Token::Ident {
            list.push(self.parse_field_decl());
        }
        let right_brace = self.expect(Token::RightBrace);

        let comment = self.expect_semi();

        StructDecl {
            doc,
            name,
            fields: FieldList {
                opening: left_brace,
                list,
                closing: right_brace,
            },
            comment,
        }
    }

    fn parse_typedef_decl(&mut self) -> TypedefDecl {
        let doc = self.lead_comment;
        self.expect(Token::Typedef);

        let name = self.parse_ident();

        let mut assign = Pos::NONE;
        if self.tok == Token::Assign {
            // type alias
            assign = self.pos;
            self.next();
        }
        let typ = self.parse_type();

        let comment = self.expect_semi();

        TypedefDecl {
            doc,
            name,
            assign,
            typ,
            comment,
        }
    }

    fn parse_var_decl(&mut self) -> VarDecl {
        let doc = self.lead_comment;
        self.expect(Token::Var);

        let name = self.parse_ident();
        let typ = self.try_ident_or_type();
        self.expect(Token::Assign);
        // TODO: accept a full expression here once expression parsing lands.
        let value = Expr::Ident(self.parse_ident());

        let comment = self.expect_semi();

        VarDecl {
            doc,
            name,
            typ,
            value,
            comment,
        }
    }

    fn parse_field_decl(&mut self) -> Field {
        let doc = self.lead_comment;

        let mut names = Vec::new();
        let typ;

        if self.tok == Token::Ident {
            names.push(self.parse_ident());
            while self.tok == Token::Comma {
                self.next();
                names.push(self.parse_ident());
            }
            typ = self.parse_type();
        } else {
            let pos = self.pos;
            self.error_expected(pos, "field name");
            self.advance(expr_end);
            typ = Expr::Bad(BadExpr { from: pos, to: self.pos });
        }

        let comment = self.expect_semi();

        Field {
            doc,
            names,
            typ: Some(typ),
            comment,
        }
    }

    fn parse_parameters(&mut self) -> FieldList {
        let left_paren = self.expect(Token::LeftParen);

        let mut fields = Vec::new();
        if self.tok != Token::RightParen {
            fields = self.parse_parameter_list();
        }

        let right_paren = self.expect(Token::RightParen);

        FieldList {
            opening: left_paren,
            list: fields,
            closing: right_paren,
        }
    }

    fn parse_parameter_list(&mut self) -> Vec<Field> {
        // TODO: parameter declarations; the list is skipped for now.
        while self.tok != Token::RightParen && self.tok != Token::Eof {
            self.next();
        }
        Vec::new()
    }

    fn parse_result(&mut self) -> Option<FieldList> {
        if self.tok == Token::LeftParen {
            return Some(self.parse_parameters());
        }

        if let Some(typ) = self.try_ident_or_type() {
            return Some(FieldList {
                opening: Pos::NONE,
                list: vec![Field {
                    doc: None,
                    names: Vec::new(),
                    typ: Some(typ),
                    comment: None,
                }],
                closing: Pos::NONE,
            });
        }
        None
    }
}
