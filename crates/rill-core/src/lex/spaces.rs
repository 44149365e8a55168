// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Whitespace skipping and mixed-indent detection.

use super::Lexer;
use crate::scan::{AugChar, CHAR_NL, CHAR_WS};

/// Ignore leading form feeds for the mixed-space calculation.
pub(super) const SKIP_LEAD_FF: u8 = 1 << 0;
/// Skip newlines as well (inside open pairs).
pub(super) const SKIP_NL: u8 = 1 << 1;

impl Lexer {
    /// Skips whitespace, returning whether the run mixed distinct
    /// whitespace runes (e.g. spaces and tabs).
    ///
    /// With [`SKIP_LEAD_FF`], leading form feeds are skipped without
    /// entering the mixed calculation; with [`SKIP_NL`], newlines are
    /// consumed like any other whitespace instead of ending the run. The
    /// first non-whitespace character is pushed back.
    pub(super) fn skip_spaces(&mut self, ch: AugChar, flags: u8) -> bool {
        let mut flags = flags;
        let mut last_char = ch.ch;
        let mut mixed = false;
        let mut ch = ch;

        while ch.class & CHAR_WS != 0 {
            if flags & SKIP_LEAD_FF != 0 {
                // Preemptively skip the form feed.
                if ch.ch.is('\u{000C}') {
                    ch = self.scanner.next();
                    continue;
                }

                // Found the last leading FF; restart mixed detection here.
                last_char = ch.ch;
                flags &= !SKIP_LEAD_FF;
            }

            if ch.class & CHAR_NL != 0 && flags & SKIP_NL == 0 {
                break;
            }

            if ch.ch != last_char {
                mixed = true;
            }
            last_char = ch.ch;

            ch = self.scanner.next();
        }

        // This character is not whitespace, so push it back.
        self.scanner.push(ch);

        mixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanChar;
    use crate::test_support::lexer_for;

    /// Pulls the first character and skips from there.
    fn skip(src: &str, flags: u8) -> (bool, ScanChar) {
        let mut lexer = lexer_for(src);
        let first = lexer.scanner.next();
        let mixed = lexer.skip_spaces(first, flags);
        (mixed, lexer.scanner.next().ch)
    }

    #[test]
    fn uniform_spaces_are_not_mixed() {
        let (mixed, next) = skip("    x", 0);
        assert!(!mixed);
        assert_eq!(next, ScanChar::Char('x'));
    }

    #[test]
    fn uniform_tabs_are_not_mixed() {
        let (mixed, next) = skip("\t\tx", 0);
        assert!(!mixed);
        assert_eq!(next, ScanChar::Char('x'));
    }

    #[test]
    fn tab_space_mix_is_detected() {
        let (mixed, _) = skip("\t x", 0);
        assert!(mixed);
        let (mixed, _) = skip(" \tx", 0);
        assert!(mixed);
    }

    #[test]
    fn run_stops_at_newline_without_skip_nl() {
        let (mixed, next) = skip("  \n  x", 0);
        assert!(!mixed);
        assert_eq!(next, ScanChar::Char('\n'));
    }

    #[test]
    fn newlines_skipped_inside_pairs() {
        // The run reads straight through the newline. It reports mixing
        // (a newline differs from a space), but the caller ignores the
        // flag inside pairs.
        let (mixed, next) = skip("  \n  x", SKIP_NL);
        assert!(mixed);
        assert_eq!(next, ScanChar::Char('x'));
    }

    #[test]
    fn leading_form_feeds_are_ignored() {
        let (mixed, next) = skip("\u{000C}\u{000C}  x", SKIP_LEAD_FF);
        assert!(!mixed);
        assert_eq!(next, ScanChar::Char('x'));
    }

    #[test]
    fn form_feed_then_mixed_run_still_detected() {
        let (mixed, _) = skip("\u{000C} \tx", SKIP_LEAD_FF);
        assert!(mixed);
    }

    #[test]
    fn interior_form_feed_counts_as_mixing() {
        let (mixed, _) = skip(" \u{000C} x", SKIP_LEAD_FF);
        assert!(mixed);
    }
}
