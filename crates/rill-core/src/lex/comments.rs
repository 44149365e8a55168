// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Comment recognition.
//!
//! A `#` starts a comment running to the end of the line. A doubled `##`
//! marks a *doc comment*, which survives lexing as a `<DocComment>` token
//! so tooling can attach it to the following definition; plain comments
//! are discarded. The terminating newline is left for the main loop, so
//! logical-line handling is unaffected by comments.

use super::{Lexer, span_thru};
use crate::error::ErrorKind;
use crate::scan::{AugChar, CHAR_NL, ScanChar};
use crate::token::{TOK_DOC_COMMENT, TokenValue};

impl Lexer {
    /// Recognizes a comment, given its leading `#`.
    pub(super) fn recognize_comment(&mut self, first: AugChar) {
        let second = self.scanner.next();
        if second.ch == ScanChar::Err {
            let err = second.err().unwrap_or(ErrorKind::BadRune);
            self.push_err(second.loc, err);
            return;
        }

        if second.ch.is('#') {
            self.recognize_doc_comment(first);
            return;
        }

        // A plain comment is discarded through to the newline.
        let mut ch = second;
        loop {
            match ch.ch {
                ScanChar::Err => {
                    let err = ch.err().unwrap_or(ErrorKind::BadRune);
                    self.push_err(ch.loc, err);
                    return;
                }
                ScanChar::Eof => break,
                ScanChar::Char(_) if ch.class & CHAR_NL != 0 => break,
                ScanChar::Char(_) => ch = self.scanner.next(),
            }
        }
        self.scanner.push(ch);
    }

    /// Accumulates a doc comment's text through to the newline, which is
    /// pushed back for normal handling.
    fn recognize_doc_comment(&mut self, first: AugChar) {
        let mut text = String::new();

        loop {
            let ch = self.scanner.next();
            match ch.ch {
                ScanChar::Err => {
                    let err = ch.err().unwrap_or(ErrorKind::BadRune);
                    self.push_err(ch.loc, err);
                    return;
                }
                ScanChar::Eof => {
                    let loc = span_thru(&first.loc, &ch.loc);
                    self.scanner.push(ch);
                    self.push_tok(TOK_DOC_COMMENT.clone(), loc, TokenValue::Str(text.into()));
                    return;
                }
                ScanChar::Char(c) => {
                    if ch.class & CHAR_NL != 0 {
                        let loc = span_thru(&first.loc, &ch.loc);
                        self.scanner.push(ch);
                        self.push_tok(TOK_DOC_COMMENT.clone(), loc, TokenValue::Str(text.into()));
                        return;
                    }
                    text.push(c);
                }
            }
        }
    }
}
