// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Number recognition.
//!
//! Recognizes integer and float literals with arbitrary precision. A
//! literal may be an integer until a `.` or exponent commits it to being a
//! float; a leading `0b`/`0o`/`0x` fixes the base to 2/8/16 and restarts
//! accumulation after the prefix. `_` is a digit separator and ignored.
//!
//! The recognizer runs on the first decimal digit of a literal, or on a
//! `.` the main loop has already confirmed is followed by a decimal digit.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use super::{Lexer, span_thru};
use crate::error::ErrorKind;
use crate::scan::{
    AugChar, CHAR_BIN_DIGIT, CHAR_DEC_DIGIT, CHAR_HEX_DIGIT, CHAR_OCT_DIGIT, CHAR_WS, CharClass,
};
use crate::token::{TOK_FLOAT, TOK_INT, TokenValue};

/// The number may still be an integer.
const NUM_INT: u8 = 1 << 0;
/// The number may still be a float.
const NUM_FLOAT: u8 = 1 << 1;
/// Collecting the whole part.
const NUM_WHOLE: u8 = 1 << 2;
/// Collecting the fraction.
const NUM_FRACT: u8 = 1 << 3;
/// Collecting the exponent.
const NUM_EXP: u8 = 1 << 4;
/// A sign is allowed next.
const NUM_SIGN: u8 = 1 << 5;

/// The collection-state bits.
const NUM_STATE: u8 = NUM_WHOLE | NUM_FRACT | NUM_EXP;

/// The digit class for a number base.
fn base_class(base: u32) -> CharClass {
    match base {
        2 => CHAR_BIN_DIGIT,
        8 => CHAR_OCT_DIGIT,
        16 => CHAR_HEX_DIGIT,
        _ => CHAR_DEC_DIGIT,
    }
}

/// The base selected by a `0?` prefix flag character.
fn base_for_flag(c: char) -> Option<u32> {
    match c {
        'b' | 'B' => Some(2),
        'o' | 'O' => Some(8),
        'x' | 'X' => Some(16),
        _ => None,
    }
}

impl Lexer {
    /// Recognizes a number literal, given its first character.
    pub(super) fn recognize_number(&mut self, first: AugChar) {
        let start = first.loc.clone();
        let mut buf = String::new();
        let mut flags = NUM_INT | NUM_FLOAT | NUM_WHOLE;
        // Base 0 means "not yet determined": a leading 0 may still grow a
        // radix prefix.
        let mut base: u32 = 0;

        if let Some(c) = first.ch.char() {
            buf.push(c);
            if c == '.' {
                flags = NUM_FLOAT | NUM_FRACT;
                base = 10;
            } else if c != '0' {
                base = 10;
            }
        }

        let mut ch = self.scanner.next();
        loop {
            if base == 0 {
                if let Some(b) = ch.ch.char().and_then(base_for_flag) {
                    flags &= NUM_INT | NUM_STATE;
                    base = b;
                    buf.clear();
                    ch = self.scanner.next();
                    continue;
                }
                base = 10;
            }

            // The _ allows grouping digits; ignore it.
            if ch.ch.is('_') {
                ch = self.scanner.next();
                continue;
            }

            if flags & NUM_FLOAT != 0 {
                if flags & NUM_WHOLE != 0 && ch.ch.is('.') {
                    flags = NUM_FLOAT | NUM_FRACT;
                    buf.push('.');
                    ch = self.scanner.next();
                    continue;
                }
                if flags & (NUM_WHOLE | NUM_FRACT) != 0 && (ch.ch.is('e') || ch.ch.is('E')) {
                    flags = NUM_FLOAT | NUM_EXP | NUM_SIGN;
                    buf.push('e');
                    ch = self.scanner.next();
                    continue;
                }
                if flags & NUM_SIGN != 0 {
                    // At most one sign, immediately after the exponent.
                    flags &= !NUM_SIGN;
                    if ch.ch.is('+') || ch.ch.is('-') {
                        if let Some(c) = ch.ch.char() {
                            buf.push(c);
                        }
                        ch = self.scanner.next();
                        continue;
                    }
                }
            }

            if ch.class & base_class(base) == 0 {
                break;
            }
            if let Some(c) = ch.ch.char() {
                buf.push(c);
            }
            ch = self.scanner.next();
        }

        // Only whitespace and operators may terminate a number.
        if ch.class != 0 && ch.class & CHAR_WS == 0 {
            self.push_err(ch.loc, ErrorKind::BadNumber);
            return;
        }

        let loc = span_thru(&start, &ch.loc);
        let stop_loc = ch.loc.clone();
        self.scanner.push(ch);

        if flags & NUM_INT != 0 {
            match BigInt::parse_bytes(buf.as_bytes(), base) {
                Some(value) => {
                    self.push_tok(TOK_INT.clone(), loc, TokenValue::Int(value));
                }
                // A bare radix prefix like "0x".
                None => self.push_err(stop_loc, ErrorKind::BadNumber),
            }
        } else {
            let text = if buf.starts_with('.') {
                format!("0{buf}")
            } else {
                buf
            };
            match BigDecimal::from_str(&text) {
                Ok(value) => {
                    self.push_tok(TOK_FLOAT.clone(), loc, TokenValue::Float(value));
                }
                // A trailing exponent marker like "1e" or "1e-".
                Err(_) => self.push_err(stop_loc, ErrorKind::BadNumber),
            }
        }
    }
}
