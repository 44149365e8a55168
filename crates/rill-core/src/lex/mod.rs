// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for the Rill front-end.
//!
//! The lexer pulls augmented characters from a [`Scanner`] and organizes
//! them into [`Token`]s: a symbol, the source range it covers, and its
//! semantic value. Beyond plain tokenization it tracks three pieces of
//! stream-level state:
//!
//! - **Indentation.** A stack of indent columns, bottom pinned at column 1
//!   and strictly increasing. The first token of each logical line emits
//!   `<Indent>`/`<Dedent>` tokens as its column moves the stack.
//! - **Pairing.** Open bracket operators stack until their close arrives;
//!   inside an open pair, newlines are ordinary whitespace and indentation
//!   is not tracked.
//! - **Pushback.** Consumers may push tokens back; recognizers push unused
//!   characters back onto the scanner.
//!
//! Per-token-kind recognition lives in the submodules (`comments`,
//! `numbers`, `idents`, `strings`, `operators`), each dispatched on the
//! class of a token's first character. All recognition is parameterized by
//! the profile, so string flags, escapes, quotes, keywords, and operators
//! can differ between language versions without touching this module.
//!
//! Errors end the stream: the lexer emits a single `<Error>` token whose
//! value carries the [`ErrorKind`], and every later `next()` returns
//! `None`.

mod comments;
mod idents;
mod numbers;
mod operators;
mod spaces;
mod strings;


use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::ErrorKind;
use crate::location::Location;
use crate::options::Config;
use crate::scan::{
    CHAR_COMMENT, CHAR_DEC_DIGIT, CHAR_ID_START, CHAR_NL, CHAR_QUOTE, CHAR_WS, ScanChar, Scanner,
};
use crate::token::{
    Symbol, TOK_DEDENT, TOK_EOF, TOK_ERROR, TOK_INDENT, TOK_NEWLINE, Token, TokenValue,
};

/// Joins two same-file locations from `start.begin` to `end.begin`.
///
/// The lexer only ever joins locations produced by its own scanner, so the
/// cross-file failure of [`Location::thru`] cannot occur here.
pub(crate) fn span_thru(start: &Location, end: &Location) -> Location {
    start.thru(end).unwrap_or_else(|_| start.clone())
}

/// Joins two same-file locations from `start.begin` to `end.end`.
pub(crate) fn span_thru_end(start: &Location, end: &Location) -> Location {
    start.thru_end(end).unwrap_or_else(|_| start.clone())
}

/// A lexer for a single source file.
#[derive(Debug)]
pub struct Lexer {
    /// The scanner for the source.
    scanner: Scanner,
    /// The shared parse configuration.
    cfg: Rc<Config>,
    /// The indent stack; bottom is always column 1.
    indent: Vec<u32>,
    /// Open-pair tokens awaiting their closers, in order of opening.
    pairs: Vec<Token>,
    /// Pending tokens not yet handed to the consumer.
    tokens: VecDeque<Token>,
    /// The last token handed to the consumer.
    prev: Option<Token>,
    /// Set when the stream has ended with `<EOF>` or an error token.
    done: bool,
}

impl Lexer {
    /// Creates a lexer over a prepared scanner.
    #[must_use]
    pub fn new(scanner: Scanner) -> Self {
        let cfg = Rc::clone(scanner.config());
        Self {
            scanner,
            cfg,
            indent: vec![1],
            pairs: Vec::new(),
            tokens: VecDeque::new(),
            prev: None,
            done: false,
        }
    }

    /// Returns the shared parse configuration.
    #[must_use]
    pub fn config(&self) -> &Rc<Config> {
        &self.cfg
    }

    /// Retrieves the next token. Returns `None` once the stream has ended
    /// with an `<EOF>` or `<Error>` token and the queue has drained.
    pub fn next(&mut self) -> Option<Token> {
        while !self.done && self.tokens.is_empty() {
            self.pump();
        }

        let tok = self.tokens.pop_front()?;
        self.prev = Some(tok.clone());
        Some(tok)
    }

    /// Pushes a single token back onto the lexer. Any number of tokens may
    /// be pushed back.
    pub fn push(&mut self, tok: Token) {
        self.tokens.push_front(tok);
    }

    /// Consumes input until at least one token is pending or the stream
    /// ends.
    fn pump(&mut self) {
        let ch = self.scanner.next();

        match ch.ch {
            ScanChar::Err => {
                let err = ch.err().unwrap_or(ErrorKind::BadRune);
                self.push_err(ch.loc, err);
                return;
            }
            ScanChar::Eof => {
                if let Some(opener) = self.pairs.first() {
                    let close = opener.sym.close.clone().unwrap_or_default();
                    let loc = opener.loc.clone();
                    self.push_err(loc, ErrorKind::DanglingOpen { close });
                } else {
                    self.push_tok(TOK_EOF.clone(), ch.loc, TokenValue::Empty);
                    self.done = true;
                }
                return;
            }
            ScanChar::Char(_) => {}
        }

        // Newlines end logical lines only outside open pairs.
        if ch.class & CHAR_NL != 0 && self.pairs.is_empty() {
            self.push_tok(TOK_NEWLINE.clone(), ch.loc, TokenValue::Empty);
            return;
        }

        if ch.class & CHAR_WS != 0 {
            let mut err_mixed = false;
            let mut skip = 0;
            if self.pairs.is_empty() {
                let line_start = self
                    .last_tok()
                    .is_none_or(|tok| tok.sym.name == TOK_NEWLINE.name);
                if line_start {
                    skip = spaces::SKIP_LEAD_FF;
                    err_mixed = true;
                }
            } else {
                skip = spaces::SKIP_NL;
            }

            let run_start = ch.loc.clone();
            let mixed = self.skip_spaces(ch, skip);
            if err_mixed && mixed {
                self.push_err(run_start, ErrorKind::MixedIndent);
            }
            return;
        }

        // A backslash must splice the following newline onto this line.
        if ch.ch.is('\\') {
            let next = self.scanner.next();
            if next.ch == ScanChar::Err {
                let err = next.err().unwrap_or(ErrorKind::BadRune);
                self.push_err(next.loc, err);
            } else if !next.ch.is('\n') {
                self.push_err(next.loc, ErrorKind::DanglingBackslash);
            }
            return;
        }

        // ".5" is a float literal, not an operator.
        if ch.ch.is('.') {
            let next = self.scanner.next();
            self.scanner.push(next.clone());
            if next.class & CHAR_DEC_DIGIT != 0 {
                self.recognize_number(ch);
                return;
            }
        }

        if ch.class & CHAR_COMMENT != 0 {
            self.recognize_comment(ch);
        } else if ch.class & CHAR_DEC_DIGIT != 0 {
            self.recognize_number(ch);
        } else if ch.class & CHAR_ID_START != 0 {
            self.recognize_identifier(ch);
        } else if ch.class & CHAR_QUOTE != 0 {
            self.recognize_string(ch);
        } else if ch.class == 0 {
            self.recognize_operator(ch);
        } else {
            self.push_err(ch.loc, ErrorKind::BadOp);
        }
    }

    /// Returns the most recently queued or returned token.
    fn last_tok(&self) -> Option<&Token> {
        self.tokens.back().or(self.prev.as_ref())
    }

    /// Queues a token, applying the stream-level filters: duplicate and
    /// initial `<Newline>` tokens are dropped, `<EOF>` drains the indent
    /// stack, and any other token adjusts indentation against its column
    /// while no pair is open. Returns the queued token.
    fn push_tok(
        &mut self,
        sym: Arc<Symbol>,
        loc: Location,
        value: TokenValue,
    ) -> Option<Token> {
        if sym.name == TOK_NEWLINE.name {
            let duplicate = self
                .last_tok()
                .is_none_or(|tok| tok.sym.name == TOK_NEWLINE.name);
            if duplicate {
                return None;
            }
        } else if sym.name == TOK_EOF.name {
            while self.indent.len() > 1 {
                self.indent.pop();
                self.tokens.push_back(Token::new(
                    TOK_DEDENT.clone(),
                    loc.clone(),
                    TokenValue::Empty,
                ));
            }
        } else if self.pairs.is_empty() {
            let col = loc.begin.col;
            let top = self.indent.last().copied().unwrap_or(1);
            if col > top {
                self.tokens.push_back(Token::new(
                    TOK_INDENT.clone(),
                    loc.clone(),
                    TokenValue::Empty,
                ));
                self.indent.push(col);
            } else if col < top {
                while self.indent.last().copied().unwrap_or(1) > col {
                    self.indent.pop();
                    self.tokens.push_back(Token::new(
                        TOK_DEDENT.clone(),
                        loc.clone(),
                        TokenValue::Empty,
                    ));
                }
                if self.indent.last().copied().unwrap_or(1) != col {
                    self.push_err(loc, ErrorKind::BadIndent);
                    return None;
                }
            }
        }

        let tok = Token::new(sym, loc, value);
        self.tokens.push_back(tok.clone());
        Some(tok)
    }

    /// Queues an error token and terminates the stream.
    fn push_err(&mut self, loc: Location, err: ErrorKind) {
        tracing::trace!(%loc, %err, "lexical error");
        self.tokens
            .push_back(Token::new(TOK_ERROR.clone(), loc, TokenValue::Err(err)));
        self.done = true;
    }
}
