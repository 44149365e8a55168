// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Identifier recognition.
//!
//! Accumulates identifier-continue runes from an identifier-start rune,
//! normalizes the result per the profile, and resolves it against the
//! keyword table. While accumulating, the recognizer also tracks whether
//! the run so far could be a set of string flags (`r`, `b`, ...); if a
//! quote rune arrives while that is still true, the accumulated flags and
//! the quote are handed to the string recognizer, so `rb"..."` lexes as a
//! raw bytes literal rather than an identifier.

use super::{Lexer, span_thru};
use crate::error::ErrorKind;
use crate::scan::{AugChar, CHAR_ID_CONT, CHAR_QUOTE, ScanChar};
use crate::token::{TOK_IDENT, TokenValue};

/// Tracks whether an identifier prefix is still a viable string-flag run.
struct FlagState {
    flags: u8,
    viable: bool,
}

impl FlagState {
    fn new() -> Self {
        Self {
            flags: 0,
            viable: true,
        }
    }

    /// Folds one rune into the flag set; a non-flag rune kills viability.
    fn set_flag(&mut self, lexer: &Lexer, c: char) {
        match lexer.cfg.profile.str_flags.get(&c) {
            Some(&bits) if self.viable => self.flags |= bits,
            _ => self.viable = false,
        }
    }
}

impl Lexer {
    /// Recognizes an identifier or keyword, given its first character.
    pub(super) fn recognize_identifier(&mut self, first: AugChar) {
        let start = first.loc.clone();
        let mut text = String::new();
        let mut flag_state = FlagState::new();

        if let Some(c) = first.ch.char() {
            text.push(c);
            flag_state.set_flag(self, c);
        }

        loop {
            let ch = self.scanner.next();

            if ch.ch == ScanChar::Err {
                let err = ch.err().unwrap_or(ErrorKind::BadRune);
                self.push_err(ch.loc, err);
                return;
            }

            // A quote after a pure flag run hands off to the string
            // recognizer; the string token spans from the first flag.
            if ch.class & CHAR_QUOTE != 0 && flag_state.viable {
                self.recognize_string_with(ch, flag_state.flags, start);
                return;
            }

            if ch.class & CHAR_ID_CONT != 0 {
                if let Some(c) = ch.ch.char() {
                    text.push(c);
                    flag_state.set_flag(self, c);
                }
                continue;
            }

            // A quote without flag discipline cannot continue or
            // terminate an identifier.
            if ch.class & CHAR_QUOTE != 0 {
                self.push_err(ch.loc, ErrorKind::BadIdent);
                return;
            }

            let loc = span_thru(&start, &ch.loc);
            self.scanner.push(ch);

            let norm = self.cfg.profile.norm.apply(&text);
            let sym = self
                .cfg
                .profile
                .keywords
                .get(&norm)
                .cloned()
                .unwrap_or_else(|| TOK_IDENT.clone());
            self.push_tok(sym, loc, TokenValue::Str(norm));
            return;
        }
    }
}
