// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Declaration nodes.

use super::{BasicLit, BlockStmt, CommentRef, Expr, FieldList, FuncType, Ident, Node};
use crate::source_analysis::Pos;

/// A declaration node.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Bad(BadDecl),
    Const(ConstDecl),
    Func(FuncDecl),
    Import(ImportDecl),
    Struct(StructDecl),
    Typedef(TypedefDecl),
    Var(VarDecl),
}

/// A placeholder for a declaration containing syntax errors for which a
/// correct declaration node cannot be created.
#[derive(Debug, Clone, PartialEq)]
pub struct BadDecl {
    /// Position range of the bad declaration.
    pub from: Pos,
    pub to: Pos,
}

/// A constant declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    /// Associated documentation, if any.
    pub doc: Option<CommentRef>,
    /// Constant name.
    pub name: Ident,
    /// Constant type, if any.
    pub typ: Option<Expr>,
    /// Initial value.
    pub value: Expr,
    /// Line comments, if any.
    pub comment: Option<CommentRef>,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    /// Associated documentation, if any.
    pub doc: Option<CommentRef>,
    /// Receiver (for methods), or `None` (for functions).
    pub recv: Option<Ident>,
    /// Function/method name.
    pub name: Ident,
    /// Function signature: parameters, results, and the position of the
    /// `func` keyword.
    pub typ: FuncType,
    /// Function body, or `None` for an external (non-Stable) function.
    pub body: Option<BlockStmt>,
}

/// A single package import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    /// Associated documentation, if any.
    pub doc: Option<CommentRef>,
    /// Local package name (including `.`), if any.
    pub name: Option<Ident>,
    /// Import path.
    pub path: BasicLit,
    /// Line comments, if any.
    pub comment: Option<CommentRef>,
    /// End of the declaration (overrides the path end if valid).
    pub end_pos: Pos,
}

/// A structure declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    /// Associated documentation, if any.
    pub doc: Option<CommentRef>,
    /// Struct name.
    pub name: Ident,
    /// The field declarations.
    pub fields: FieldList,
    /// Line comments, if any.
    pub comment: Option<CommentRef>,
}

/// A type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedefDecl {
    /// Associated documentation, if any.
    pub doc: Option<CommentRef>,
    /// Type name.
    pub name: Ident,
    /// Position of `=`, if any (alias form).
    pub assign: Pos,
    /// The aliased or defined type.
    pub typ: Expr,
    /// Line comments, if any.
    pub comment: Option<CommentRef>,
}

/// A variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    /// Associated documentation, if any.
    pub doc: Option<CommentRef>,
    /// Variable name.
    pub name: Ident,
    /// Variable type, if any.
    pub typ: Option<Expr>,
    /// Initial value.
    pub value: Expr,
    /// Line comments, if any.
    pub comment: Option<CommentRef>,
}

impl Node for BadDecl {
    fn pos(&self) -> Pos {
        self.from
    }
    fn end(&self) -> Pos {
        self.to
    }
}

impl Node for ConstDecl {
    fn pos(&self) -> Pos {
        self.name.pos()
    }
    fn end(&self) -> Pos {
        self.value.end()
    }
}

impl Node for FuncDecl {
    fn pos(&self) -> Pos {
        self.typ.pos()
    }
    fn end(&self) -> Pos {
        match &self.body {
            Some(body) => body.end(),
            None => self.typ.end(),
        }
    }
}

impl Node for ImportDecl {
    fn pos(&self) -> Pos {
        match &self.name {
            Some(name) => name.pos(),
            None => self.path.pos(),
        }
    }
    fn end(&self) -> Pos {
        if self.end_pos.is_valid() {
            return self.end_pos;
        }
        self.path.end()
    }
}

impl Node for StructDecl {
    fn pos(&self) -> Pos {
        self.name.pos()
    }
    fn end(&self) -> Pos {
        self.fields.end()
    }
}

impl Node for TypedefDecl {
    fn pos(&self) -> Pos {
        self.name.pos()
    }
    fn end(&self) -> Pos {
        self.typ.end()
    }
}

impl Node for VarDecl {
    fn pos(&self) -> Pos {
        self.name.pos()
    }
    fn end(&self) -> Pos {
        self.value.end()
    }
}

impl Node for Decl {
    fn pos(&self) -> Pos {
        match self {
            Decl::Bad(d) => d.pos(),
            Decl::Const(d) => d.pos(),
            Decl::Func(d) => d.pos(),
            Decl::Import(d) => d.pos(),
            Decl::Struct(d) => d.pos(),
            Decl::Typedef(d) => d.pos(),
            Decl::Var(d) => d.pos(),
        }
    }

    fn end(&self) -> Pos {
        match self {
            Decl::Bad(d) => d.end(),
            Decl::Const(d) => d.end(),
            Decl::Func(d) => d.end(),
            Decl::Import(d) => d.end(),
            Decl::Struct(d) => d.end(),
            Decl::Typedef(d) => d.end(),
            Decl::Var(d) => d.end(),
        }
    }
}
