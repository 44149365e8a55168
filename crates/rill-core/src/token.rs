// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token and symbol types for Rill lexical analysis.
//!
//! A [`Symbol`] is a token *type*: something with a fixed spelling like an
//! operator or keyword, or a class of values like `<Int>`. Symbols are
//! shared — the standard symbols below are process-wide, and a profile's
//! keywords and operators hand out [`Arc`] clones — so tokens stay cheap to
//! copy and symbol identity is simply name equality.
//!
//! A [`Token`] bundles a symbol with the source range it covers and its
//! semantic value. Values are a closed sum ([`TokenValue`]) rather than a
//! dynamic type: arbitrary-precision integers and decimals for numeric
//! literals, text for identifiers and doc comments, raw bytes for bytes
//! literals, and an error value on the `<Error>` token.

use std::fmt;
use std::sync::{Arc, LazyLock};

use bigdecimal::BigDecimal;
use ecow::EcoString;
use num_bigint::BigInt;

use crate::error::ErrorKind;
use crate::location::Location;

/// A defined symbol, or token type.
///
/// Paired operators name their partner: an open symbol carries the name of
/// its matching close in `close` (e.g. `(` names `)`), and a close symbol
/// carries the name of its open in `open`. The lexer uses these links to
/// validate bracket pairing as operators are emitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    /// The name of the symbol, for display and table lookup.
    pub name: EcoString,
    /// For a close symbol, the name of the operator that opens the pair.
    pub open: Option<EcoString>,
    /// For an open symbol, the name of the operator that closes the pair.
    pub close: Option<EcoString>,
}

impl Symbol {
    /// Creates a plain symbol with no pairing.
    #[must_use]
    pub fn new(name: impl Into<EcoString>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            open: None,
            close: None,
        })
    }

    /// Creates an open-pair symbol naming its matching close operator.
    #[must_use]
    pub fn opener(name: impl Into<EcoString>, close: impl Into<EcoString>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            open: None,
            close: Some(close.into()),
        })
    }

    /// Creates a close-pair symbol naming its matching open operator.
    #[must_use]
    pub fn closer(name: impl Into<EcoString>, open: impl Into<EcoString>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            open: Some(open.into()),
            close: None,
        })
    }

    /// Returns `true` if this symbol opens a pair.
    #[must_use]
    pub fn is_opener(&self) -> bool {
        self.close.is_some()
    }

    /// Returns `true` if this symbol closes a pair.
    #[must_use]
    pub fn is_closer(&self) -> bool {
        self.open.is_some()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

macro_rules! standard_symbols {
    ($($(#[$doc:meta])* $ident:ident => $name:literal;)*) => {
        $(
            $(#[$doc])*
            pub static $ident: LazyLock<Arc<Symbol>> =
                LazyLock::new(|| Symbol::new($name));
        )*
    };
}

standard_symbols! {
    /// The error token; its value carries the [`ErrorKind`].
    TOK_ERROR => "<Error>";
    /// End of file.
    TOK_EOF => "<EOF>";
    /// An unpaired newline ending a logical line.
    TOK_NEWLINE => "<Newline>";
    /// An increase in indentation level.
    TOK_INDENT => "<Indent>";
    /// A decrease in indentation level.
    TOK_DEDENT => "<Dedent>";
    /// An identifier; its value is the normalized text.
    TOK_IDENT => "<Ident>";
    /// An integer literal; its value is a [`BigInt`].
    TOK_INT => "<Int>";
    /// A float literal; its value is a [`BigDecimal`].
    TOK_FLOAT => "<Float>";
    /// A string literal; its value is the decoded text.
    TOK_STRING => "<String>";
    /// A bytes literal; its value is the decoded byte sequence.
    TOK_BYTES => "<Bytes>";
    /// A doc comment; its value is the comment text.
    TOK_DOC_COMMENT => "<DocComment>";
}

/// The semantic value of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// No semantic value (operators, keywords, structural tokens).
    Empty,
    /// An arbitrary-precision integer.
    Int(BigInt),
    /// An arbitrary-precision decimal float.
    Float(BigDecimal),
    /// Text: identifiers, keywords, strings, doc comments.
    Str(EcoString),
    /// A byte sequence from a bytes literal.
    Bytes(Vec<u8>),
    /// The error carried by an `<Error>` token.
    Err(ErrorKind),
}

impl TokenValue {
    /// Returns the text content, if this value carries any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the error, if this value carries one.
    #[must_use]
    pub fn as_err(&self) -> Option<&ErrorKind> {
        match self {
            Self::Err(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
            Self::Bytes(v) => write!(f, "{v:?}"),
            Self::Err(v) => write!(f, "{v}"),
        }
    }
}

/// A single token emitted by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token type.
    pub sym: Arc<Symbol>,
    /// The location range of the token.
    pub loc: Location,
    /// The semantic value of the token.
    pub value: TokenValue,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(sym: Arc<Symbol>, loc: Location, value: TokenValue) -> Self {
        Self { sym, loc, value }
    }

    /// Returns `true` if this is the end-of-file token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.sym.name == TOK_EOF.name
    }

    /// Returns `true` if this is an error token.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.sym.name == TOK_ERROR.name
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: <{}> token", self.loc, self.sym)?;
        if !matches!(self.value, TokenValue::Empty) {
            write!(f, ": {}", self.value)?;
        }
        Ok(())
    }
}
