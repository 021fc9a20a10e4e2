// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source positions and the file registry.
//!
//! Every byte of every registered source file gets a unique integer
//! position ([`Pos`]). A [`FileSet`] hands out contiguous position ranges
//! as files are added and maps any position back to a human-readable
//! [`Position`] (file name, line, column) with two binary searches: one
//! over file base offsets, one over line offsets.
//!
//! Positions are plain integers so they are cheap to store in every AST
//! node and cheap to compare; `Pos::NONE` (zero) is the "no position"
//! sentinel.

use std::cell::RefCell;
use std::fmt;
use std::ops;
use std::rc::Rc;

use ecow::EcoString;

/// A compact position in a [`FileSet`].
///
/// `Pos` values are ordered: within one file, comparing positions is the
/// same as comparing byte offsets.
///
/// # Examples
///
/// ```
/// use stable_core::source_analysis::{FileSet, Pos};
///
/// let mut fset = FileSet::new();
/// let file = fset.add_file("main.stb", None, 10);
/// assert_eq!(file.pos(0), Pos::new(1));
/// assert!(!Pos::NONE.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos(u32);

impl Pos {
    /// The invalid position.
    pub const NONE: Pos = Pos(0);

    /// Creates a position from its raw value.
    #[must_use]
    pub const fn new(offset: u32) -> Self {
        Self(offset)
    }

    /// Reports whether the position is valid.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Returns the raw position value.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

impl ops::Add<usize> for Pos {
    type Output = Pos;

    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    fn add(self, rhs: usize) -> Pos {
        Pos(self.0 + rhs as u32)
    }
}

/// A position decoded into file name, byte offset, line, and column.
///
/// `line` is 1-based; `column` is a 1-based byte count (not a character
/// count); `offset` is 0-based. A position is valid iff `line > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Position {
    /// File name, if any.
    pub filename: EcoString,
    /// Byte offset within the file, starting at 0.
    pub offset: usize,
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1 (byte count).
    pub column: usize,
}

impl Position {
    /// Reports whether the position is valid.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.line > 0
    }
}

/// Renders one of several forms:
///
/// ```text
/// file:line:column    valid position with file name
/// file:line           valid position with file name but no column
/// line:column         valid position without file name
/// line                valid position without file name and no column
/// file                invalid position with file name
/// -                   invalid position without file name
/// ```
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = self.filename.to_string();
        if self.is_valid() {
            if !s.is_empty() {
                s.push(':');
            }
            s.push_str(&self.line.to_string());
            if self.column != 0 {
                s.push(':');
                s.push_str(&self.column.to_string());
            }
        }
        if s.is_empty() {
            s.push('-');
        }
        f.write_str(&s)
    }
}

#[derive(Debug)]
struct FileData {
    name: EcoString,
    base: u32,
    size: u32,
    /// Byte offset of the first character of each line; `lines[0]` is
    /// always 0. Grows as the scanner discovers newlines.
    lines: RefCell<Vec<u32>>,
}

/// A source file registered in a [`FileSet`].
///
/// `File` is a cheap-clone handle: the registry, the scanner, and the
/// parser all hold the same underlying descriptor, and line offsets added
/// by the scanner are visible through every handle. The front-end is
/// single-threaded, so the line table sits behind a `RefCell` rather than
/// a lock.
#[derive(Debug, Clone)]
pub struct File {
    data: Rc<FileData>,
}

impl File {
    /// Returns the file name as registered with [`FileSet::add_file`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Returns the base position offset of the file.
    #[must_use]
    pub fn base(&self) -> u32 {
        self.data.base
    }

    /// Returns the file size as registered with [`FileSet::add_file`].
    #[must_use]
    pub fn size(&self) -> u32 {
        self.data.size
    }

    /// Returns the number of lines recorded so far.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.data.lines.borrow().len()
    }

    /// Records `offset` as the start of a new line.
    ///
    /// The offset must be larger than the offset of the previous line and
    /// smaller than the file size; otherwise it is silently ignored.
    pub fn add_line(&self, offset: usize) {
        let mut lines = self.data.lines.borrow_mut();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "source files over 4GB are not supported"
        )]
        let offset = offset as u32;
        if lines.last().is_none_or(|&last| last < offset) && offset < self.data.size {
            lines.push(offset);
        }
    }

    /// Returns the position of the first character of the given 1-based
    /// line.
    ///
    /// # Panics
    ///
    /// Panics if `line < 1` or `line > self.line_count()`.
    #[must_use]
    pub fn line_start(&self, line: usize) -> Pos {
        let lines = self.data.lines.borrow();
        assert!(line >= 1, "invalid line number {line} (should be >= 1)");
        assert!(
            line <= lines.len(),
            "invalid line number {line} (should be < {})",
            lines.len()
        );
        Pos(self.data.base + lines[line - 1])
    }

    /// Returns the position for the given byte offset.
    ///
    /// Out-of-range offsets are clamped to `[0, size]`; the extra position
    /// past the last byte belongs to EOF.
    #[must_use]
    pub fn pos(&self, offset: usize) -> Pos {
        Pos(self.data.base + self.clamp_offset(offset as i64))
    }

    /// Returns the byte offset for the given position, the inverse of
    /// [`File::pos`] under the same clamping.
    #[must_use]
    pub fn offset(&self, p: Pos) -> usize {
        self.clamp_offset(i64::from(p.0) - i64::from(self.data.base)) as usize
    }

    /// Returns the 1-based line number for the given position.
    #[must_use]
    pub fn line(&self, p: Pos) -> usize {
        self.position(p).line
    }

    /// Decodes a position into a full [`Position`] record.
    ///
    /// The invalid position decodes to the default (invalid) record;
    /// anything else is clamped like [`File::offset`].
    #[must_use]
    pub fn position(&self, p: Pos) -> Position {
        if !p.is_valid() {
            return Position::default();
        }
        self.resolve(p)
    }

    fn resolve(&self, p: Pos) -> Position {
        let offset = self.offset(p);
        let lines = self.data.lines.borrow();
        // Largest line offset <= offset; lines[0] == 0 guarantees a hit.
        let line = lines.partition_point(|&start| start as usize <= offset);
        let column = offset - lines[line - 1] as usize + 1;
        Position {
            filename: self.data.name.clone(),
            offset,
            line,
            column,
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to [0, size], which fits in u32"
    )]
    fn clamp_offset(&self, offset: i64) -> u32 {
        offset.clamp(0, i64::from(self.data.size)) as u32
    }

    fn contains(&self, p: Pos) -> bool {
        self.data.base <= p.0 && p.0 <= self.data.base + self.data.size
    }
}

/// A registry of source files sharing one position space.
///
/// Files are allocated consecutive position ranges starting at base 1
/// (0 is reserved for [`Pos::NONE`]). A one-entry cache accelerates the
/// common case of repeated lookups within the same file.
#[derive(Debug)]
pub struct FileSet {
    base: u32,
    files: Vec<File>,
    /// Cache of the last file looked up.
    last: RefCell<Option<File>>,
}

impl FileSet {
    /// Creates an empty file set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: 1, // 0 == Pos::NONE
            files: Vec::new(),
            last: RefCell::new(None),
        }
    }

    /// Returns the minimum base that must be provided to
    /// [`FileSet::add_file`] when adding the next file.
    #[must_use]
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Adds a new file to the set, reserving `size + 1` positions
    /// (the extra one belongs to EOF). With `base: None` the registry
    /// picks the next free base.
    ///
    /// # Panics
    ///
    /// Panics if an explicit `base` is smaller than [`FileSet::base`], or
    /// if the position space would overflow 2G.
    pub fn add_file(&mut self, filename: &str, base: Option<u32>, size: u32) -> File {
        let base = base.unwrap_or(self.base);
        assert!(
            base >= self.base,
            "invalid base {base} (should be >= {})",
            self.base
        );

        let file = File {
            data: Rc::new(FileData {
                name: EcoString::from(filename),
                base,
                size,
                lines: RefCell::new(vec![0]),
            }),
        };

        let next = i64::from(base) + i64::from(size) + 1;
        assert!(
            next <= i64::from(i32::MAX),
            "position offset overflow (> 2G of source code in file set)"
        );

        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "checked above")]
        {
            self.base = next as u32;
        }
        self.files.push(file.clone());
        *self.last.borrow_mut() = Some(file.clone());
        file
    }

    /// Returns the file containing the position, or `None` when the
    /// position is invalid or belongs to no registered file.
    #[must_use]
    pub fn file(&self, p: Pos) -> Option<File> {
        if !p.is_valid() {
            return None;
        }
        self.lookup(p)
    }

    /// Decodes a position into a full [`Position`] record; invalid or
    /// unregistered positions decode to the default record.
    #[must_use]
    pub fn position(&self, p: Pos) -> Position {
        if !p.is_valid() {
            return Position::default();
        }
        self.lookup(p).map_or_else(Position::default, |f| f.resolve(p))
    }

    fn lookup(&self, p: Pos) -> Option<File> {
        // Common case: p is in the file looked up last.
        if let Some(f) = self.last.borrow().as_ref() {
            if f.contains(p) {
                return Some(f.clone());
            }
        }

        // Largest base <= p, then verify p is within that file.
        let i = self.files.partition_point(|f| f.base() <= p.0);
        if i > 0 {
            let f = &self.files[i - 1];
            if f.contains(p) {
                *self.last.borrow_mut() = Some(f.clone());
                return Some(f.clone());
            }
        }
        None
    }
}

impl Default for FileSet {
    fn default() -> Self {
        Self::new()
    }
}
