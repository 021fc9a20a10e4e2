// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Syntax tree types for Stable source code.
//!
//! The tree is built from three sum types ([`Decl`], [`Stmt`], and
//! [`Expr`]) whose variants each carry their own position fields, so
//! [`Node::pos`] and [`Node::end`] are constant-time. A parsed [`File`]
//! owns every node, including the flat list of comment groups; nodes
//! refer to their documentation through [`CommentRef`] indices into that
//! list rather than owning the groups themselves.

mod decl;
mod expr;
mod stmt;

pub use decl::{
    BadDecl, ConstDecl, Decl, FuncDecl, ImportDecl, StructDecl, TypedefDecl, VarDecl,
};
pub use expr::{
    ArrayType, BadExpr, BasicLit, BinaryExpr, CallExpr, CompositeLit, Ellipsis, Expr,
    FuncLit, FuncType, Ident, IndexExpr, IndexListExpr, KeyValueExpr, MapType, ParenExpr,
    SelectorExpr, SliceExpr, SliceType, StarExpr, StructType, UnaryExpr,
};
pub use stmt::{
    AssignStmt, BadStmt, BlockStmt, BranchStmt, CaseStmt, DeclStmt, DeferStmt, EmptyStmt,
    ExprStmt, ForStmt, IfStmt, LabeledStmt, ReturnStmt, Stmt, SwitchStmt,
};

use ecow::EcoString;

use crate::source_analysis::{Pos, token};

/// Implemented by every node in the syntax tree.
pub trait Node {
    /// Position of the first character belonging to the node.
    fn pos(&self) -> Pos;
    /// Position of the first character immediately after the node.
    fn end(&self) -> Pos;
}

/// Reports whether `name` starts with an upper-case letter.
#[must_use]
pub fn is_exported(name: &str) -> bool {
    token::is_exported(name)
}

/// Returns the expression with any enclosing parentheses removed.
#[must_use]
pub fn unparen(e: &Expr) -> &Expr {
    let mut e = e;
    while let Expr::Paren(paren) = e {
        e = &paren.x;
    }
    e
}

/// A Stable source file.
///
/// The `comments` list contains all comments in the source file in order
/// of appearance, including the groups that are pointed to from other
/// nodes via `doc` and `comment` slots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct File {
    /// Start of the entire file; always valid after parsing.
    pub file_start: Pos,
    /// End of the entire file; always valid after parsing.
    pub file_end: Pos,

    /// Associated documentation, if any.
    pub doc: Option<CommentRef>,
    /// Position of the `package` keyword.
    pub package: Pos,
    /// Package name.
    pub pkg_name: Ident,

    /// Imports in this file.
    pub imports: Vec<ImportDecl>,
    /// Top-level declarations.
    pub decls: Vec<Decl>,
    /// All comments in the source file.
    pub comments: Vec<CommentGroup>,
}

impl File {
    /// Resolves a comment reference into its group.
    #[must_use]
    pub fn comment_group(&self, r: CommentRef) -> &CommentGroup {
        &self.comments[r.0]
    }
}

impl Node for File {
    /// The position of the package declaration. It may be invalid, for
    /// example in an empty file; `file_start` is always valid.
    fn pos(&self) -> Pos {
        self.package
    }

    /// The end of the last declaration in the file. It may be invalid,
    /// for example in an empty file; `file_end` is always valid.
    fn end(&self) -> Pos {
        match self.decls.last() {
            Some(decl) => decl.end(),
            None => self.pkg_name.end(),
        }
    }
}

/// A non-owning reference to a comment group in [`File::comments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentRef(pub(crate) usize);

/// A single `//`-style or `/*`-style comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// Position of the `/` starting the comment.
    pub slash: Pos,
    /// Comment text, excluding the `'\n'` of a `//`-style comment.
    pub text: EcoString,
}

impl Node for Comment {
    fn pos(&self) -> Pos {
        self.slash
    }

    fn end(&self) -> Pos {
        self.slash + self.text.len()
    }
}

/// A sequence of comments with no other tokens and no empty lines
/// between; `list` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl Node for CommentGroup {
    fn pos(&self) -> Pos {
        self.list[0].pos()
    }

    fn end(&self) -> Pos {
        self.list[self.list.len() - 1].end()
    }
}

impl CommentGroup {
    /// Returns the text of the comment group.
    ///
    /// Comment markers (`//`, `/*`, and `*/`), the first space of a line
    /// comment, and leading and trailing empty lines are removed.
    /// Multiple empty lines are reduced to one, and trailing space on
    /// lines is trimmed. Unless the result is empty, it is
    /// newline-terminated.
    #[must_use]
    pub fn text(&self) -> String {
        let mut lines: Vec<&str> = Vec::with_capacity(10);

        for comment in &self.list {
            let mut c = comment.text.as_str();
            match c.as_bytes()[1] {
                b'/' => {
                    // //-style comment (no newline at the end)
                    c = &c[2..];
                    // strip the first space
                    c = c.strip_prefix(' ').unwrap_or(c);
                }
                _ => {
                    // /*-style comment
                    c = &c[2..c.len() - 2];
                }
            }

            for line in c.split('\n') {
                lines.push(strip_trailing_whitespace(line));
            }
        }

        // Remove leading blank lines; convert runs of interior blank
        // lines to a single blank line.
        let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
        for line in lines {
            if !line.is_empty() || kept.last().is_some_and(|last| !last.is_empty()) {
                kept.push(line);
            }
        }

        // A final "" entry yields the trailing newline from join.
        if kept.last().is_some_and(|last| !last.is_empty()) {
            kept.push("");
        }
        kept.join("\n")
    }
}

fn strip_trailing_whitespace(s: &str) -> &str {
    s.trim_end_matches([' ', '\t', '\n', '\r'])
}

/// A field declaration in a struct type, or a parameter/result
/// declaration in a function signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Associated documentation, if any.
    pub doc: Option<CommentRef>,
    /// Field/parameter names; empty for anonymous fields.
    pub names: Vec<Ident>,
    /// Field/parameter type, if any.
    pub typ: Option<Expr>,
    /// Line comments, if any.
    pub comment: Option<CommentRef>,
}

impl Node for Field {
    fn pos(&self) -> Pos {
        match (self.names.first(), &self.typ) {
            (Some(name), _) => name.pos(),
            (None, Some(typ)) => typ.pos(),
            (None, None) => Pos::NONE,
        }
    }

    fn end(&self) -> Pos {
        match (&self.typ, self.names.last()) {
            (Some(typ), _) => typ.end(),
            (None, Some(name)) => name.end(),
            (None, None) => Pos::NONE,
        }
    }
}

/// A list of [`Field`]s, enclosed by parentheses, curly braces, or
/// square brackets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldList {
    /// Position of the opening parenthesis/brace/bracket, if any.
    pub opening: Pos,
    /// The fields.
    pub list: Vec<Field>,
    /// Position of the closing parenthesis/brace/bracket, if any.
    pub closing: Pos,
}

impl Node for FieldList {
    fn pos(&self) -> Pos {
        if self.opening.is_valid() {
            return self.opening;
        }
        // The list should not be empty in this case; be conservative and
        // guard against bad trees.
        match self.list.first() {
            Some(field) => field.pos(),
            None => Pos::NONE,
        }
    }

    fn end(&self) -> Pos {
        if self.closing.is_valid() {
            return self.closing + 1;
        }
        match self.list.last() {
            Some(field) => field.end(),
            None => Pos::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment_text(texts: &[&str]) -> String {
        let group = CommentGroup {
            list: texts
                .iter()
                .map(|text| Comment {
                    slash: Pos::NONE,
                    text: (*text).into(),
                })
                .collect(),
        };
        group.text()
    }

    #[test]
    fn comment_group_text() {
        let cases: &[(&[&str], &str)] = &[
            (&["//"], ""),
            (&["//   "], ""),
            (&["//", "//", "//   "], ""),
            (&["// foo   "], "foo\n"),
            (&["//", "//", "// foo"], "foo\n"),
            (&["// foo  bar  "], "foo  bar\n"),
            (&["// foo", "// bar"], "foo\nbar\n"),
            (&["// foo", "//", "//", "//", "// bar"], "foo\n\nbar\n"),
            (&["// foo", "/* bar */"], "foo\n bar\n"),
            (&["//", "//", "//", "// foo", "//", "//", "//"], "foo\n"),
            (&["/**/"], ""),
            (&["/*   */"], ""),
            (&["/**/", "/**/", "/*   */"], ""),
            (&["/* Foo   */"], " Foo\n"),
            (&["/* Foo  Bar  */"], " Foo  Bar\n"),
            (&["/* Foo*/", "/* Bar*/"], " Foo\n Bar\n"),
            (&["/* Foo*/", "/**/", "/**/", "/**/", "// Bar"], " Foo\n\nBar\n"),
            (&["/* Foo*/", "/*\n*/", "//", "/*\n*/", "// Bar"], " Foo\n\nBar\n"),
            (&["/* Foo*/", "// Bar"], " Foo\nBar\n"),
            (&["/* Foo\n Bar*/"], " Foo\n Bar\n"),
        ];

        for (i, (list, want)) in cases.iter().enumerate() {
            assert_eq!(comment_text(list), *want, "case {i}");
        }
    }

    #[test]
    fn ident_positions() {
        let ident = Ident {
            name_pos: Pos::new(5),
            name: "foobar".into(),
        };
        assert_eq!(ident.pos(), Pos::new(5));
        assert_eq!(ident.end(), Pos::new(11));
        assert_eq!(ident.to_string(), "foobar");
        assert!(!ident.is_exported());
        assert!(Ident {
            name_pos: Pos::NONE,
            name: "Foobar".into(),
        }
        .is_exported());
    }

    #[test]
    fn field_position_fallbacks() {
        let empty = Field {
            doc: None,
            names: Vec::new(),
            typ: None,
            comment: None,
        };
        assert_eq!(empty.pos(), Pos::NONE);
        assert_eq!(empty.end(), Pos::NONE);

        let named = Field {
            doc: None,
            names: vec![Ident {
                name_pos: Pos::new(3),
                name: "x".into(),
            }],
            typ: Some(Expr::Ident(Ident {
                name_pos: Pos::new(5),
                name: "int".into(),
            })),
            comment: None,
        };
        assert_eq!(named.pos(), Pos::new(3));
        assert_eq!(named.end(), Pos::new(8));
    }

    #[test]
    fn field_list_positions() {
        let list = FieldList {
            opening: Pos::new(10),
            list: Vec::new(),
            closing: Pos::new(11),
        };
        assert_eq!(list.pos(), Pos::new(10));
        assert_eq!(list.end(), Pos::new(12));

        assert_eq!(FieldList::default().pos(), Pos::NONE);
        assert_eq!(FieldList::default().end(), Pos::NONE);
    }

    #[test]
    fn unparen_strips_nesting() {
        let inner = Expr::Ident(Ident {
            name_pos: Pos::new(3),
            name: "x".into(),
        });
        let wrapped = Expr::Paren(ParenExpr {
            left_paren: Pos::new(1),
            x: Box::new(Expr::Paren(ParenExpr {
                left_paren: Pos::new(2),
                x: Box::new(inner.clone()),
                right_paren: Pos::new(4),
            })),
            right_paren: Pos::new(5),
        });
        assert_eq!(unparen(&wrapped), &inner);
        assert_eq!(unparen(&inner), &inner);
    }
}
