// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the Rill front-end.
//!
//! All failures in the scanner, lexer, and parser are values of one
//! [`ErrorKind`] enum. Lexical errors do not unwind: they are attached to a
//! single `<Error>` token as its semantic value, after which the token
//! stream ends. Parser errors unwind the current `expression()` call with
//! the offending token pushed back, so the caller sees the original stream
//! position.
//!
//! The kinds integrate with [`miette`] for diagnostic rendering at the API
//! boundary.

use miette::Diagnostic;
use thiserror::Error;

use crate::location::Location;

/// Everything that can go wrong between raw bytes and an expression tree.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[diagnostic()]
pub enum ErrorKind {
    /// Two locations were joined across different files.
    #[error("entity split across files")]
    SplitEntity,

    /// The decoded character stream contained an invalid byte sequence.
    #[error("illegal character encoding")]
    BadRune,

    /// Indentation matched no stacked level after popping.
    #[error("inconsistent indentation")]
    BadIndent,

    /// Tabs and spaces mixed within one leading-whitespace run.
    #[error("mixed whitespace types in indent")]
    MixedIndent,

    /// A line-continuation backslash not followed by a newline.
    #[error("dangling backslash")]
    DanglingBackslash,

    /// A number literal terminated by a character that is neither
    /// whitespace nor an operator.
    #[error("bad character for number literal")]
    BadNumber,

    /// An unknown escape character, or a truncated hex escape.
    #[error("bad escape sequence")]
    BadEscape,

    /// A code point out of range for the string or bytes buffer.
    #[error("invalid character for string")]
    BadStrChar,

    /// End of file or newline inside a non-multi-line string.
    #[error("unclosed string literal")]
    UnclosedStr,

    /// An illegal continuation character inside an identifier.
    #[error("bad identifier character")]
    BadIdent,

    /// No registered operator prefix terminated at this character.
    #[error("bad operator character")]
    BadOp,

    /// End of file with an open pair still on the pairing stack. Carries
    /// the close operator the outermost opener was waiting for.
    #[error("unexpected EOF; expected \"{close}\"")]
    DanglingOpen {
        /// Name of the expected close operator.
        close: ecow::EcoString,
    },

    /// A close operator with no matching open operator.
    #[error("unexpected close operator \"{close}\"")]
    NoOpen {
        /// Name of the offending close operator.
        close: ecow::EcoString,
    },

    /// A close operator that does not match the innermost open operator.
    #[error("close operator \"{close}\" does not match open operator \"{open}\" at {opened_at}")]
    OpMismatch {
        /// Name of the innermost open operator.
        open: ecow::EcoString,
        /// Name of the close operator that was found.
        close: ecow::EcoString,
        /// Where the open operator appeared.
        opened_at: Location,
    },

    /// The parse table has no denotation for a token.
    #[error("unexpected token")]
    Unexpected,

    /// The requested character encoding is not recognized.
    #[error("unknown encoding \"{0}\"")]
    UnknownEncoding(ecow::EcoString),

    /// A deferred read error from the underlying source.
    #[error("{0}")]
    Io(ecow::EcoString),
}

impl ErrorKind {
    /// Wraps an I/O error for deferred delivery through the scanner.
    #[must_use]
    pub fn io(err: &std::io::Error) -> Self {
        Self::Io(ecow::eco_format!("{err}"))
    }
}
