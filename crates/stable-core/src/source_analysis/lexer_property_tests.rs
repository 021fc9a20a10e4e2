// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the Stable lexer.
//!
//! These tests use `proptest` to verify lexer invariants over generated
//! inputs:
//!
//! 1. **Lexer never panics**: arbitrary bytes always produce tokens
//! 2. **Scanning terminates**: EOF is reached and then persists
//! 3. **Positions stay in range**: every token position lies within the
//!    file's reserved position interval
//! 4. **Positions are non-decreasing**: tokens are reported in source
//!    order
//! 5. **Lexer is deterministic**: same input, same tokens
//! 6. **Classification is a partition**: every non-special token is in
//!    exactly one band
//! 7. **Valid fragments scan cleanly**: known-good inputs report no
//!    errors

use proptest::prelude::*;

use super::lexer::Lexer;
use super::position::FileSet;
use super::token::Token;

/// Scans all of `src` (with no error handler), returning positions and
/// tokens up to and including EOF.
fn scan_all(src: &[u8]) -> (Vec<(u32, Token)>, usize) {
    let mut fset = FileSet::new();
    #[expect(clippy::cast_possible_truncation, reason = "test inputs are small")]
    let file = fset.add_file("input", None, src.len() as u32);
    let mut lexer = Lexer::new(file, src, None);

    let mut tokens = Vec::new();
    loop {
        let (pos, tok, _) = lexer.scan();
        tokens.push((pos.to_u32(), tok));
        if tok == Token::Eof {
            break;
        }
        assert!(
            tokens.len() <= 2 * src.len() + 8,
            "scanner failed to terminate on {src:?}"
        );
    }
    (tokens, lexer.error_count())
}

/// Known-valid fragments that must scan without errors.
const VALID_FRAGMENTS: &[&str] = &[
    "x",
    "_bar42",
    "42",
    "0b1010",
    "0o777",
    "0xcafe",
    "1_000_000",
    "3.14",
    "'a'",
    "'\\n'",
    "'\\u00e9'",
    "\"hello\"",
    "`raw string`",
    "// comment",
    "/* comment */",
    "+ - * / %",
    "&^= <<= >>= ++=",
    "a.b.c",
    "f(x, y)",
    "s[1:2]",
    "x := y",
    "...",
    "package main",
    "import \"fmt\"",
    "var x bool = true",
    "func f() { }",
    "struct point { }",
    "typedef id = int",
    "if a == b { } else { }",
    "for i := 0; i < 10; i += 1 { }",
    "return nil",
];

fn valid_fragment() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_FRAGMENTS).prop_map(str::to_string)
}

/// Default is 256 cases; override via `PROPTEST_CASES` for longer runs.
fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property 1+2: scanning arbitrary bytes never panics and reaches
    /// EOF within a bounded number of tokens.
    #[test]
    fn scanner_never_panics_on_bytes(src in prop::collection::vec(any::<u8>(), 0..300)) {
        let _ = scan_all(&src);
    }

    /// Property 1+2 over printable text, which exercises the tokenizer
    /// paths more than raw bytes do.
    #[test]
    fn scanner_never_panics_on_text(src in "\\PC{0,300}") {
        let _ = scan_all(src.as_bytes());
    }

    /// Property 2: once EOF is returned it persists.
    #[test]
    fn eof_persists(src in "\\PC{0,100}") {
        let mut fset = FileSet::new();
        #[expect(clippy::cast_possible_truncation, reason = "test inputs are small")]
        let file = fset.add_file("input", None, src.len() as u32);
        let mut lexer = Lexer::new(file, src.as_bytes(), None);

        let mut scans = 0;
        loop {
            let (_, tok, _) = lexer.scan();
            scans += 1;
            prop_assert!(scans <= 2 * src.len() + 8, "no EOF for {src:?}");
            if tok == Token::Eof {
                break;
            }
        }
        for _ in 0..3 {
            let (_, tok, lit) = lexer.scan();
            prop_assert_eq!(tok, Token::Eof);
            prop_assert_eq!(lit.as_str(), "");
        }
    }

    /// Property 3: every reported position lies within the file's
    /// reserved interval `[base, base + size]`.
    #[test]
    fn positions_stay_in_range(src in prop::collection::vec(any::<u8>(), 0..300)) {
        let (tokens, _) = scan_all(&src);
        let base = 1u32; // first file in a fresh set
        let end = base + src.len() as u32;
        for &(pos, tok) in &tokens {
            prop_assert!(
                base <= pos && pos <= end,
                "token {tok:?} at {pos} outside [{base}, {end}] for {src:?}"
            );
        }
    }

    /// Property 4: token positions are non-decreasing.
    #[test]
    fn positions_are_ordered(src in "\\PC{0,300}") {
        let (tokens, _) = scan_all(src.as_bytes());
        for window in tokens.windows(2) {
            prop_assert!(
                window[0].0 <= window[1].0,
                "positions went backwards: {window:?} for {src:?}"
            );
        }
    }

    /// Property 5: scanning is deterministic.
    #[test]
    fn scanner_is_deterministic(src in prop::collection::vec(any::<u8>(), 0..200)) {
        let (first, first_errors) = scan_all(&src);
        let (second, second_errors) = scan_all(&src);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first_errors, second_errors);
    }

    /// Property 6: every scanned non-special token is in exactly one of
    /// the literal/operator/keyword bands.
    #[test]
    fn classification_is_a_partition(src in "\\PC{0,300}") {
        let (tokens, _) = scan_all(src.as_bytes());
        for &(_, tok) in &tokens {
            let bands = [tok.is_literal(), tok.is_operator(), tok.is_keyword()];
            let count = bands.into_iter().filter(|&b| b).count();
            match tok {
                Token::Illegal | Token::Eof | Token::Comment => {
                    prop_assert_eq!(count, 0, "special token {:?} classified", tok);
                }
                _ => prop_assert_eq!(count, 1, "token {:?} in {} bands", tok, count),
            }
        }
    }

    /// Property 7: known-valid fragments scan without errors.
    #[test]
    fn valid_fragments_scan_cleanly(src in valid_fragment()) {
        let (tokens, errors) = scan_all(src.as_bytes());
        prop_assert_eq!(errors, 0, "fragment {:?} reported errors", &src);
        for &(_, tok) in &tokens {
            prop_assert!(tok != Token::Illegal, "fragment {:?} produced ILLEGAL", &src);
        }
    }
}
