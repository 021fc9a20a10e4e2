// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for Stable source files.
//!
//! The parser consumes the token stream produced by the [`Lexer`] and
//! builds an [`ast::File`]. It is designed around error recovery:
//!
//! - **Parsing always produces a file** - even for garbage input the
//!   caller gets a placeholder [`ast::File`] plus the error list
//! - **Multiple errors** - errors are collected, not returned at first
//!   failure
//! - **Synchronization points** - after an error the parser skips ahead
//!   to the next declaration or statement boundary
//!
//! Comments are routed into the file's flat comment list as they are
//! read; a comment group immediately preceding a declaration becomes its
//! documentation, and a group trailing a declaration on the same line
//! becomes its line comment.
//!
//! # Example
//!
//! ```
//! use stable_core::source_analysis::{FileSet, parse_file};
//!
//! let mut fset = FileSet::new();
//! let (file, errors) = parse_file(&mut fset, "demo.stb", "package demo\n")
//!     .expect("in-memory source is always readable");
//!
//! assert!(errors.is_empty());
//! assert_eq!(file.pkg_name.name, "demo");
//! ```

use std::cell::RefCell;
use std::io::Read;
use std::rc::Rc;

use camino::Utf8Path;
use ecow::EcoString;

use crate::ast::{self, Comment, CommentGroup, CommentRef, Decl};
use crate::source_analysis::{
    ErrorList, File, FileSet, Lexer, Pos, SourceError, Token,
};

mod declarations;
mod expressions;
mod statements;

/// The source for [`parse_file`], as a tagged variant: in-memory text or
/// bytes, an arbitrary reader, or the named file on the host filesystem.
pub enum SourceInput {
    /// Source text.
    Text(String),
    /// Raw source bytes.
    Bytes(Vec<u8>),
    /// A reader yielding the source bytes.
    Reader(Box<dyn Read>),
    /// Read the file named in the `parse_file` call.
    Path,
}

impl SourceInput {
    fn read(self, filename: &str) -> Result<Vec<u8>, SourceError> {
        match self {
            Self::Text(text) => Ok(text.into_bytes()),
            Self::Bytes(bytes) => Ok(bytes),
            Self::Reader(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf)?;
                Ok(buf)
            }
            Self::Path => {
                let path = Utf8Path::new(filename);
                std::fs::read(path).map_err(|source| SourceError::Read {
                    path: path.to_owned(),
                    source,
                })
            }
        }
    }
}

impl From<&str> for SourceInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for SourceInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&[u8]> for SourceInput {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for SourceInput {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Parses a single Stable source file and returns the corresponding
/// [`ast::File`] together with the (sorted) list of source errors.
///
/// The file is registered in `fset`, which must outlive position
/// decoding. A file node is always returned: if parsing fails before the
/// package clause it carries a placeholder package name, and
/// `file_start`/`file_end` are always set from the file descriptor.
///
/// # Errors
///
/// Returns [`SourceError`] only when the source itself cannot be
/// obtained (unreadable file or reader). Source-level problems are
/// reported through the returned [`ErrorList`], never as `Err`.
pub fn parse_file(
    fset: &mut FileSet,
    filename: &str,
    src: impl Into<SourceInput>,
) -> Result<(ast::File, ErrorList), SourceError> {
    let text = src.into().read(filename)?;

    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    let file = fset.add_file(filename, None, text.len() as u32);

    let errors = Rc::new(RefCell::new(ErrorList::new()));
    let mut parser = Parser::new(file.clone(), &text, Rc::clone(&errors));
    let mut parsed = parser.parse_file().unwrap_or_default();
    drop(parser);

    // Start and end are consistent whether parsing succeeded or not.
    parsed.file_start = Pos::new(file.base());
    parsed.file_end = Pos::new(file.base() + file.size());

    let mut errors = std::mem::take(&mut *errors.borrow_mut());
    errors.sort();
    Ok((parsed, errors))
}

pub(crate) struct Parser<'src> {
    file: File,
    errors: Rc<RefCell<ErrorList>>,
    scanner: Lexer<'src>,

    /// All comment groups, in source order; moved into the file node
    /// when parsing completes.
    comments: Vec<CommentGroup>,
    /// Last lead comment.
    lead_comment: Option<CommentRef>,
    /// Last line comment.
    line_comment: Option<CommentRef>,

    /// Token position.
    pos: Pos,
    /// One token look-ahead.
    tok: Token,
    /// Token literal.
    lit: EcoString,

    /// Last synchronization position.
    sync_pos: Pos,
    /// Number of `advance` calls without progress.
    sync_count: usize,
}

impl<'src> Parser<'src> {
    fn new(file: File, src: &'src [u8], errors: Rc<RefCell<ErrorList>>) -> Self {
        let sink = Rc::clone(&errors);
        let scanner = Lexer::new(
            file.clone(),
            src,
            Some(Box::new(move |pos, msg| sink.borrow_mut().add(pos, msg))),
        );

        let mut parser = Self {
            file,
            errors,
            scanner,
            comments: Vec::new(),
            lead_comment: None,
            line_comment: None,
            pos: Pos::NONE,
            tok: Token::Illegal,
            lit: EcoString::new(),
            sync_pos: Pos::NONE,
            sync_count: 0,
        };
        parser.next();
        parser
    }

    fn parse_file(&mut self) -> Option<ast::File> {
        // Likely not a Stable source file at all.
        if !self.errors.borrow().is_empty() {
            return None;
        }

        let (doc, package, pkg_name) = self.parse_package_decl();
        if !self.errors.borrow().is_empty() {
            return None;
        }

        let mut decls = Vec::new();
        while self.tok == Token::Import {
            decls.push(Decl::Import(self.parse_import_decl()));
        }

        let mut prev = Token::Import;
        while self.tok != Token::Eof {
            // Accept late imports but complain.
            if self.tok == Token::Import && prev != Token::Import {
                self.error(self.pos, "imports must appear before other declarations");
            }
            prev = self.tok;
            decls.push(self.parse_decl(decl_start));
        }

        let imports = decls
            .iter()
            .filter_map(|decl| match decl {
                Decl::Import(import) => Some(import.clone()),
                _ => None,
            })
            .collect();

        Some(ast::File {
            // file_start and file_end are set by parse_file's caller.
            file_start: Pos::NONE,
            file_end: Pos::NONE,
            doc,
            package,
            pkg_name,
            imports,
            decls,
            comments: std::mem::take(&mut self.comments),
        })
    }

    // ========================================================================
    // Token management and comment attachment
    // ========================================================================

    /// Advances to the next token.
    fn next0(&mut self) {
        (self.pos, self.tok, self.lit) = self.scanner.scan();
    }

    /// Advances to the next non-comment token. In the process, collects
    /// any comment groups encountered and remembers the last lead and
    /// line comments.
    ///
    /// A lead comment is a comment group that starts and ends in a line
    /// without any other tokens and that is followed by a non-comment
    /// token on the line immediately after the comment group.
    ///
    /// A line comment is a comment group that follows a non-comment
    /// token on the same line, and that has no tokens after it on the
    /// line where it ends.
    fn next(&mut self) {
        self.lead_comment = None;
        self.line_comment = None;
        let prev = self.pos;

        self.next0();
        if self.tok != Token::Comment {
            return;
        }

        if self.file.line(self.pos) == self.file.line(prev) {
            // The comment is on the same line as the previous token; it
            // cannot be a lead comment but may be a line comment.
            let (group, endline) = self.consume_comment_group(0);
            if self.file.line(self.pos) != endline
                || self.tok == Token::Semicolon
                || self.tok == Token::Eof
            {
                // The next token is on a different line, thus the last
                // comment group is a line comment.
                self.line_comment = Some(group);
            }
        }

        // Consume successor comments, if any.
        let mut last: Option<(CommentRef, usize)> = None;
        while self.tok == Token::Comment {
            last = Some(self.consume_comment_group(1));
        }

        if let Some((group, endline)) = last {
            if endline + 1 == self.file.line(self.pos) {
                // The next token follows on the line immediately after
                // the comment group, thus the last comment group is a
                // lead comment.
                self.lead_comment = Some(group);
            }
        }
    }

    /// Consumes a group of adjacent comments and adds it to the comment
    /// list, returning the group and the line at which its last comment
    /// ends. A non-comment token or `n` empty lines terminate a group.
    fn consume_comment_group(&mut self, n: usize) -> (CommentRef, usize) {
        let mut list = Vec::new();
        let mut endline = self.file.line(self.pos);
        while self.tok == Token::Comment && self.file.line(self.pos) <= endline + n {
            let (comment, comment_endline) = self.consume_comment();
            endline = comment_endline;
            list.push(comment);
        }

        self.comments.push(CommentGroup { list });
        (CommentRef(self.comments.len() - 1), endline)
    }

    /// Consumes a comment, returning it and the line on which it ends.
    fn consume_comment(&mut self) -> (Comment, usize) {
        // A /*-style comment may end on a different line than it starts
        // on; count the newlines to find the end line.
        let mut endline = self.file.line(self.pos);
        if self.lit.as_bytes().get(1) == Some(&b'*') {
            endline += self.lit.bytes().filter(|&b| b == b'\n').count();
        }

        let comment = Comment {
            slash: self.pos,
            text: self.lit.clone(),
        };
        self.next0();

        (comment, endline)
    }

    /// Consumes a semicolon and returns the applicable line comment.
    fn expect_semi(&mut self) -> Option<CommentRef> {
        // A semicolon is optional before a closing ')' or '}'.
        if self.tok == Token::RightParen || self.tok == Token::RightBrace {
            return None;
        }

        match self.tok {
            Token::Comma | Token::Semicolon => {
                if self.tok == Token::Comma {
                    // Permit a ',' instead of a ';' but complain.
                    self.error_expected(self.pos, "';'");
                }
                if self.lit == ";" {
                    // Explicit semicolon: use the following comments.
                    self.next();
                    self.line_comment
                } else {
                    // Artificial semicolon: use the preceding comments.
                    let comment = self.line_comment;
                    self.next();
                    comment
                }
            }
            _ => {
                self.error_expected(self.pos, "';'");
                self.advance(stmt_start);
                None
            }
        }
    }

    /// Consumes tokens until the current token is in the `to` set or
    /// EOF, for error recovery.
    fn advance(&mut self, to: fn(Token) -> bool) {
        while self.tok != Token::Eof {
            if to(self.tok) {
                // Return only if the parser made some progress since the
                // last sync, or if it has not reached 10 advance calls
                // without progress. Otherwise consume at least one token
                // to avoid an endless parser loop.
                if self.pos == self.sync_pos && self.sync_count < 10 {
                    self.sync_count += 1;
                    return;
                }
                if self.pos > self.sync_pos {
                    self.sync_pos = self.pos;
                    self.sync_count = 0;
                    return;
                }
                // Reaching here indicates a parser bug, likely an
                // incorrect token set in a caller, but it only leads to
                // skipping of possibly correct code when a previous
                // error is present, and is preferred over a
                // non-terminating parse.
            }
            self.next();
        }
    }

    fn error_expected(&mut self, pos: Pos, what: &str) {
        let mut msg = format!("expected {what}");
        if pos == self.pos {
            // The error happened at the current position; make the
            // message more specific.
            if self.tok == Token::Semicolon && self.lit == "\n" {
                msg.push_str(", found newline");
            } else if self.tok.is_literal() {
                // Print 123 rather than 'INT', etc.
                msg.push_str(", found ");
                msg.push_str(&self.lit);
            } else {
                msg.push_str(&format!(", found '{}'", self.tok));
            }
        }
        self.error(pos, &msg);
    }

    fn error(&mut self, pos: Pos, msg: &str) {
        let epos = self.file.position(pos);
        self.errors.borrow_mut().add(epos, msg);
    }

    fn expect(&mut self, tok: Token) -> Pos {
        let pos = self.pos;
        if self.tok != tok {
            self.error_expected(pos, &format!("'{tok}'"));
        }
        self.next(); // make progress
        pos
    }
}

/// Tokens that may start a declaration.
fn decl_start(tok: Token) -> bool {
    matches!(
        tok,
        Token::Const
            | Token::Func
            | Token::Import
            | Token::Struct
            | Token::Typedef
            | Token::Var
    )
}

/// Tokens that may start a statement.
fn stmt_start(tok: Token) -> bool {
    matches!(
        tok,
        Token::Break
            | Token::Const
            | Token::Continue
            | Token::Defer
            | Token::Fallthrough
            | Token::For
            | Token::Goto
            | Token::If
            | Token::Return
            | Token::Switch
            | Token::Typedef
            | Token::Var
    )
}

/// Tokens that may follow an expression.
fn expr_end(tok: Token) -> bool {
    matches!(
        tok,
        Token::Comma
            | Token::Colon
            | Token::Semicolon
            | Token::RightParen
            | Token::RightBrack
            | Token::RightBrace
    )
}
