// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Operator recognition.
//!
//! Operators are matched by the longest registered name that prefixes the
//! input, with unbounded backtracking: characters consumed for a longer
//! match that failed are returned to the scanner to be re-scanned.
//!
//! The recognizer walks the profile's operator trie, stacking a frame per
//! consumed character. Whenever the walk reaches a node carrying a
//! terminal symbol, the stack is cleared and replaced by a single frame
//! spanning from the token's start through that character — the most
//! recently matched terminal becomes the canonical token, and later
//! still-tentative frames pile above it. When the walk stops, the frames
//! above the canonical one are pushed back in reverse order along with the
//! stop character; with no canonical frame at all, the whole consumption
//! is undone and the stop character is a `BadOp`.
//!
//! Pair validation is integrated with emission: openers stack the emitted
//! token, closers pop and check it. The closer token is queued before the
//! pairing stack pops, so indentation stays suppressed through the last
//! bracket of a paired region.

use std::rc::Rc;
use std::sync::Arc;

use super::{Lexer, span_thru_end};
use crate::error::ErrorKind;
use crate::location::Location;
use crate::optrie::NodeId;
use crate::scan::AugChar;
use crate::token::{Symbol, TokenValue};

/// One consumed character of a candidate operator.
struct Frame {
    /// The consumed character.
    ch: AugChar,
    /// The cumulative location from the token start through `ch`.
    loc: Location,
    /// The trie node reached by consuming `ch`.
    node: NodeId,
}

impl Lexer {
    /// Recognizes an operator, given its first (unclassified) character.
    pub(super) fn recognize_operator(&mut self, first: AugChar) {
        let cfg = Rc::clone(&self.cfg);
        let trie = &cfg.profile.operators;

        let start = first.loc.clone();
        let mut frames: Vec<Frame> = Vec::new();
        let mut node = trie.root();
        let mut ch = first;

        loop {
            // Only unclassified runes can extend an operator.
            let Some(c) = ch.ch.char() else { break };
            if ch.class != 0 {
                break;
            }
            let Some(child) = trie.next(node, c) else {
                break;
            };
            node = child;

            let loc = span_thru_end(&start, &ch.loc);
            if trie.symbol(node).is_some() {
                frames.clear();
            }
            frames.push(Frame { ch, loc, node });

            ch = self.scanner.next();
        }

        // The stop character goes back first so the re-scanned frames
        // precede it.
        let stop_loc = ch.loc.clone();
        self.scanner.push(ch);

        let canonical = frames
            .first()
            .and_then(|frame| trie.symbol(frame.node).cloned().map(|sym| (sym, frame.loc.clone())));

        match canonical {
            Some((sym, loc)) => {
                while frames.len() > 1 {
                    if let Some(frame) = frames.pop() {
                        self.scanner.push(frame.ch);
                    }
                }
                self.emit_operator(&sym, loc);
            }
            None => {
                // No prefix terminated; undo the whole consumption.
                while let Some(frame) = frames.pop() {
                    self.scanner.push(frame.ch);
                }
                self.push_err(stop_loc, ErrorKind::BadOp);
            }
        }
    }

    /// Emits an operator token, maintaining the pairing stack.
    fn emit_operator(&mut self, sym: &Arc<Symbol>, loc: Location) {
        if sym.is_opener() {
            if let Some(tok) = self.push_tok(sym.clone(), loc, TokenValue::Empty) {
                self.pairs.push(tok);
            }
            return;
        }

        if sym.is_closer() {
            if self.pairs.is_empty() {
                self.push_err(
                    loc,
                    ErrorKind::NoOpen {
                        close: sym.name.clone(),
                    },
                );
                return;
            }

            // Queue the closer while the pair is still open, so its own
            // column never adjusts indentation.
            self.push_tok(sym.clone(), loc.clone(), TokenValue::Empty);
            if let Some(opener) = self.pairs.pop()
                && opener.sym.close.as_deref() != Some(sym.name.as_str())
            {
                self.push_err(
                    loc,
                    ErrorKind::OpMismatch {
                        open: opener.sym.name.clone(),
                        close: sym.name.clone(),
                        opened_at: opener.loc,
                    },
                );
            }
            return;
        }

        self.push_tok(sym.clone(), loc, TokenValue::Empty);
    }
}
