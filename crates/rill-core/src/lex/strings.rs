// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! String and bytes literal recognition.
//!
//! Strings are groups of characters enclosed in a quote rune; which runes
//! quote, which flags exist, and how escapes decode are all profile
//! driven. A quote whose profile entry allows tripling may open a
//! triple-quoted literal, which is multi-line and only terminated by three
//! consecutive quotes; embedded quote runs shorter than three are content.
//!
//! Flags accumulated by the identifier recognizer arrive through
//! [`Lexer::recognize_string_with`]: `raw` disables escape decoding and
//! `bytes` switches the buffer to raw bytes, where every rune must fit in
//! eight bits.

use super::{Lexer, span_thru_end};
use crate::error::ErrorKind;
use crate::location::Location;
use crate::profile::{STR_BYTES, STR_MULTI, STR_RAW, STR_TRIPLE};
use crate::scan::{AugChar, ScanChar};
use crate::token::{TOK_BYTES, TOK_STRING, TokenValue};

/// The accumulation buffer: Unicode text, or raw bytes for `b"..."`.
enum StrBuf {
    Text(String),
    Bytes(Vec<u8>),
}

impl StrBuf {
    fn new(bytes: bool) -> Self {
        if bytes {
            Self::Bytes(Vec::new())
        } else {
            Self::Text(String::new())
        }
    }

    /// Appends one rune. For a bytes buffer the rune must fit in `0..=255`.
    fn push(&mut self, c: char) -> Result<(), ErrorKind> {
        match self {
            Self::Text(s) => {
                s.push(c);
                Ok(())
            }
            Self::Bytes(v) => {
                let code = c as u32;
                if code > 0xff {
                    return Err(ErrorKind::BadStrChar);
                }
                #[expect(clippy::cast_possible_truncation, reason = "checked above")]
                v.push(code as u8);
                Ok(())
            }
        }
    }

    fn into_value(self) -> TokenValue {
        match self {
            Self::Text(s) => TokenValue::Str(s.into()),
            Self::Bytes(v) => TokenValue::Bytes(v),
        }
    }
}

impl Lexer {
    /// Recognizes a string literal, given its opening quote.
    pub(super) fn recognize_string(&mut self, quote: AugChar) {
        let start = quote.loc.clone();
        self.recognize_string_with(quote, 0, start);
    }

    /// Recognizes a string literal whose flags (and starting location)
    /// were accumulated by the identifier recognizer.
    pub(super) fn recognize_string_with(&mut self, quote: AugChar, flags: u8, start: Location) {
        let Some(q) = quote.ch.char() else {
            return;
        };
        let quote_caps = self.cfg.profile.quotes.get(&q).copied().unwrap_or(0);
        let mut flags = flags;

        // Look for a doubled quote: either an empty literal or the start
        // of a triple.
        let ch1 = self.scanner.next();
        if ch1.ch == ScanChar::Err {
            let err = ch1.err().unwrap_or(ErrorKind::BadRune);
            self.push_err(ch1.loc, err);
            return;
        }
        if ch1.ch.is(q) {
            let ch2 = self.scanner.next();
            if ch2.ch == ScanChar::Err {
                let err = ch2.err().unwrap_or(ErrorKind::BadRune);
                self.push_err(ch2.loc, err);
                return;
            }
            if ch2.ch.is(q) && quote_caps & STR_TRIPLE != 0 {
                flags |= STR_MULTI;
            } else {
                // Just a pair: an empty literal at the pair's location.
                self.scanner.push(ch2);
                let loc = span_thru_end(&start, &ch1.loc);
                let buf = StrBuf::new(flags & STR_BYTES != 0);
                self.push_tok(self.string_sym(flags), loc, buf.into_value());
                return;
            }
        } else {
            self.scanner.push(ch1);
        }

        let mut buf = StrBuf::new(flags & STR_BYTES != 0);
        // Consecutive closing-quote candidates seen in triple mode.
        let mut quote_run = 0;

        loop {
            let ch = self.scanner.next();
            let c = match ch.ch {
                ScanChar::Err => {
                    let err = ch.err().unwrap_or(ErrorKind::BadRune);
                    self.push_err(ch.loc, err);
                    return;
                }
                ScanChar::Eof => {
                    self.push_err(ch.loc, ErrorKind::UnclosedStr);
                    return;
                }
                ScanChar::Char(c) => c,
            };

            if c == q {
                if flags & STR_MULTI == 0 {
                    let loc = span_thru_end(&start, &ch.loc);
                    self.push_tok(self.string_sym(flags), loc, buf.into_value());
                    return;
                }
                quote_run += 1;
                if quote_run == 3 {
                    let loc = span_thru_end(&start, &ch.loc);
                    self.push_tok(self.string_sym(flags), loc, buf.into_value());
                    return;
                }
                continue;
            }

            // Embedded quotes that didn't make a triple are content.
            for _ in 0..quote_run {
                if let Err(err) = buf.push(q) {
                    self.push_err(ch.loc.clone(), err);
                    return;
                }
            }
            quote_run = 0;

            if c == '\n' && flags & STR_MULTI == 0 {
                self.push_err(ch.loc, ErrorKind::UnclosedStr);
                return;
            }

            if c == '\\' {
                if !self.string_escape(flags, &mut buf) {
                    return;
                }
                continue;
            }

            if let Err(err) = buf.push(c) {
                self.push_err(ch.loc, err);
                return;
            }
        }
    }

    /// Handles one backslash escape. Returns `false` when the recognizer
    /// has errored and must stop.
    fn string_escape(&mut self, flags: u8, buf: &mut StrBuf) -> bool {
        let next = self.scanner.next();
        let c = match next.ch {
            ScanChar::Err => {
                let err = next.err().unwrap_or(ErrorKind::BadRune);
                self.push_err(next.loc, err);
                return false;
            }
            ScanChar::Eof => {
                self.push_err(next.loc, ErrorKind::UnclosedStr);
                return false;
            }
            ScanChar::Char(c) => c,
        };

        if flags & STR_RAW != 0 {
            // Raw mode: the backslash and the following rune both land in
            // the buffer, but a newline still needs multi-line mode.
            if c == '\n' && flags & STR_MULTI == 0 {
                self.push_err(next.loc, ErrorKind::UnclosedStr);
                return false;
            }
            if let Err(err) = buf.push('\\').and_then(|()| buf.push(c)) {
                self.push_err(next.loc, err);
                return false;
            }
            return true;
        }

        let Some(escape) = self.cfg.profile.escapes.get(&c).copied() else {
            self.push_err(next.loc, ErrorKind::BadEscape);
            return false;
        };

        match escape.apply(next.clone(), &mut self.scanner) {
            Err((err, loc)) => {
                self.push_err(loc, err);
                false
            }
            Ok(None) => true,
            Ok(Some(decoded)) => {
                if let Err(err) = buf.push(decoded) {
                    self.push_err(next.loc, err);
                    return false;
                }
                true
            }
        }
    }

    /// The token symbol for a finished literal.
    fn string_sym(&self, flags: u8) -> std::sync::Arc<crate::token::Symbol> {
        if flags & STR_BYTES != 0 {
            TOK_BYTES.clone()
        } else {
            TOK_STRING.clone()
        }
    }
}
