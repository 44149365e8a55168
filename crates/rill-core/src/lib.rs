// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Front-end core for the Rill language.
//!
//! This crate contains the scanner → lexer → Pratt parser pipeline that
//! turns source bytes into located tokens and expression trees:
//!
//! - **Scanning**: encoding decode, line-ending normalization, per-rune
//!   classification, and running source locations, with arbitrary
//!   character pushback ([`scan`]).
//! - **Lexing**: indentation tracking, bracket pairing, and per-kind
//!   recognizers for comments, numbers, identifiers, strings, and
//!   longest-match operators ([`lex`]).
//! - **Parsing**: top-down operator precedence driven by a
//!   runtime-mutable parse table ([`parse`]).
//!
//! The whole pipeline is parameterized by a [`Profile`]: identifier rune
//! sets, string flags and escapes, keywords, the operator trie, and the
//! parse table are data, not code, so one front-end serves multiple
//! language versions.
//!
//! The pipeline is strictly pull-based. Each stage exposes `next()` and
//! `push()` and consumes lazily from the stage below:
//!
//! ```
//! use rill_core::{Options, TokenValue};
//!
//! let mut lexer = Options::new(Box::new(std::io::Cursor::new(b"0b10".to_vec())))
//!     .filename("demo.rl")
//!     .lex()
//!     .expect("utf-8 is always known");
//!
//! let tok = lexer.next().expect("one literal");
//! assert_eq!(tok.sym.name, "<Int>");
//! assert_eq!(tok.loc.to_string(), "demo.rl:1:1-5");
//! ```

pub mod ast;
pub mod error;
pub mod lex;
pub mod location;
pub mod optrie;
pub mod options;
pub mod parse;
pub mod profile;
pub mod scan;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::error::ErrorKind;
pub use crate::lex::Lexer;
pub use crate::location::{FilePos, Location};
pub use crate::optrie::OpTrie;
pub use crate::options::{Config, Options};
pub use crate::parse::{ParseEntry, ParseTable, Parser};
pub use crate::profile::Profile;
pub use crate::scan::{AugChar, ScanChar, Scanner};
pub use crate::token::{Symbol, Token, TokenValue};

/// Builds a [`Scanner`] from an options bundle.
pub fn scan(opts: Options) -> Result<Scanner, ErrorKind> {
    opts.scan()
}

/// Builds a [`Lexer`] (and its scanner) from an options bundle. Use
/// [`Lexer::new`] to wrap a scanner built separately.
pub fn lex(opts: Options) -> Result<Lexer, ErrorKind> {
    opts.lex()
}

/// Builds a [`Parser`] (and its lexer and scanner) from an options
/// bundle. Use [`Parser::new`] to wrap a lexer built separately.
pub fn parse(opts: Options) -> Result<Parser, ErrorKind> {
    opts.parse()
}
