// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Scanning for the Rill front-end.
//!
//! The scanner pulls bytes from a reader, applies a named character
//! encoding to produce runes, normalizes line endings to `\n`, and yields
//! [`AugChar`]s carrying per-rune classification and a running source
//! location.
//!
//! Line-ending detection handles files written on Windows (`\r\n`), UNIX
//! (`\n`), or classic Mac (`\r`), as long as the style is consistent; the
//! style is locked in by the first carriage return or newline in the file.
//!
//! The scanner also accepts arbitrary pushback: the lexer may consume any
//! number of characters, then put the ones it doesn't use back to be
//! re-processed for another token. Pushback is last-in-first-out, and a
//! pushed character is returned verbatim without reclassification. This
//! ability vastly simplifies the lexer's operator processing.

mod classify;

use std::collections::VecDeque;
use std::fmt;
use std::io::Read;
use std::rc::Rc;

use encoding_rs::{Decoder, DecoderResult, Encoding};

pub use classify::{
    AugChar, CHAR_BIN_DIGIT, CHAR_COMMENT, CHAR_DEC_DIGIT, CHAR_HEX_DIGIT, CHAR_ID_CONT,
    CHAR_ID_START, CHAR_NL, CHAR_OCT_DIGIT, CHAR_QUOTE, CHAR_STR_FLAG, CHAR_WS, CharClass,
    CharValue, ScanChar, classify,
};

use crate::error::ErrorKind;
use crate::location::{FilePos, Location};
use crate::options::Config;

/// The size of the read buffer.
const SCAN_BUF: usize = 4096;

/// A decoded rune, end of input, or a scan failure.
enum RawRune {
    Char(char),
    Eof,
    Bad(ErrorKind),
}

/// The detected line-ending style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineMode {
    /// Not yet determined; decided by the first `\r` or `\n`.
    Unknown,
    /// Classic Mac: bare `\r` ends a line.
    Carriage,
    /// UNIX: bare `\n` ends a line.
    Newline,
    /// Windows: `\r\n` ends a line.
    Crlf,
}

/// A scanner for a single source file.
///
/// Yields one [`AugChar`] per decoded rune, then an end-of-file sentinel.
/// Decoding problems and read errors surface as a single error sentinel
/// carrying the [`ErrorKind`]; after it, the scanner reports end of file.
pub struct Scanner {
    /// The byte source; dropped at end of input or on error.
    source: Option<Box<dyn Read>>,
    decoder: Decoder,
    cfg: Rc<Config>,
    /// The fixed-size read buffer and its unconsumed window.
    raw: Box<[u8; SCAN_BUF]>,
    raw_start: usize,
    raw_end: usize,
    /// Decoded characters not yet delivered.
    decoded: String,
    decoded_pos: usize,
    /// A deferred error, delivered once the decoded buffer drains.
    pending_err: Option<ErrorKind>,
    /// Set once the decoder has flushed its final input.
    flushed: bool,
    mode: LineMode,
    /// One-rune pushback used by the line-ending state machine.
    le_pushed: Option<char>,
    /// The running location; covers the most recently delivered rune.
    loc: Location,
    /// Pushed-back augmented characters, newest first.
    queue: VecDeque<AugChar>,
}

impl fmt::Debug for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("loc", &self.loc)
            .field("mode", &self.mode)
            .field("queued", &self.queue.len())
            .finish_non_exhaustive()
    }
}

impl Scanner {
    /// Creates a scanner over a byte source using the configuration's
    /// encoding. Fails with [`ErrorKind::UnknownEncoding`] if the encoding
    /// label is not recognized.
    pub fn new(source: Box<dyn Read>, cfg: Rc<Config>) -> Result<Self, ErrorKind> {
        let Some(encoding) = Encoding::for_label(cfg.encoding.as_bytes()) else {
            return Err(ErrorKind::UnknownEncoding(cfg.encoding.clone()));
        };
        tracing::debug!(file = %cfg.filename, encoding = encoding.name(), "scanning source");

        let loc = Location::start_of(cfg.filename.clone());
        Ok(Self {
            source: Some(source),
            decoder: encoding.new_decoder_with_bom_removal(),
            cfg,
            raw: Box::new([0; SCAN_BUF]),
            raw_start: 0,
            raw_end: 0,
            decoded: String::new(),
            decoded_pos: 0,
            pending_err: None,
            flushed: false,
            mode: LineMode::Unknown,
            le_pushed: None,
            loc,
            queue: VecDeque::new(),
        })
    }

    /// Returns the shared parse configuration.
    #[must_use]
    pub fn config(&self) -> &Rc<Config> {
        &self.cfg
    }

    /// Retrieves the next augmented character. An end-of-file sentinel is
    /// returned at end of input, and an error sentinel in the event of an
    /// error.
    pub fn next(&mut self) -> AugChar {
        // Characters pushed back by the lexer come back verbatim.
        if let Some(ch) = self.queue.pop_front() {
            return ch;
        }

        let raw = if let Some(c) = self.le_pushed.take() {
            // No line-ending handling: only the state machine itself
            // pushes characters here, and never a '\r' or '\n'.
            RawRune::Char(c)
        } else {
            match self.next_rune() {
                RawRune::Char(c @ ('\r' | '\n')) => RawRune::Char(self.line_ending(c)),
                other => other,
            }
        };

        match raw {
            RawRune::Char(c) => {
                self.advance_loc(Some(c));
                classify(&self.cfg.profile, ScanChar::Char(c), self.loc.clone(), None)
            }
            RawRune::Eof => {
                self.advance_loc(None);
                classify(&self.cfg.profile, ScanChar::Eof, self.loc.clone(), None)
            }
            RawRune::Bad(err) => {
                self.advance_loc(None);
                classify(
                    &self.cfg.profile,
                    ScanChar::Err,
                    self.loc.clone(),
                    Some(err),
                )
            }
        }
    }

    /// Pushes back a single augmented character. Any number of characters
    /// may be pushed back.
    pub fn push(&mut self, ch: AugChar) {
        self.queue.push_front(ch);
    }

    /// Advances the running location to account for a delivered rune.
    fn advance_loc(&mut self, ch: Option<char>) {
        match ch {
            // Sentinels collapse the range to its end.
            None => self.loc.advance(FilePos::default()),
            Some('\n') => self.loc.advance(FilePos::new(1, 0)),
            Some('\t') => self.loc.advance_tab(self.cfg.tab_stop),
            // Form feeds at the beginning of a line don't count.
            Some('\u{000C}') => {
                if self.loc.end.col > 1 {
                    self.loc.advance(FilePos::new(0, 1));
                } else {
                    self.loc.advance(FilePos::default());
                }
            }
            Some(_) => self.loc.advance(FilePos::new(0, 1)),
        }
    }

    /// Routes a `\r` or `\n` through the line-ending state machine,
    /// returning the character to deliver.
    fn line_ending(&mut self, ch: char) -> char {
        match self.mode {
            LineMode::Unknown => {
                if ch == '\n' {
                    self.mode = LineMode::Newline;
                    return '\n';
                }

                // A '\r': peek at what follows to decide the style.
                match self.next_rune() {
                    RawRune::Eof => {
                        self.mode = LineMode::Carriage;
                        '\n'
                    }
                    RawRune::Bad(err) => {
                        // Defer the error; the '\r' still ends a line.
                        self.mode = LineMode::Carriage;
                        self.pending_err = Some(err);
                        '\n'
                    }
                    RawRune::Char('\n') => {
                        self.mode = LineMode::Crlf;
                        '\n'
                    }
                    RawRune::Char(other) => {
                        self.mode = LineMode::Carriage;
                        self.le_pushed = Some(other);
                        '\n'
                    }
                }
            }
            LineMode::Carriage => {
                if ch == '\r' {
                    '\n'
                } else {
                    // A stray '\n' in carriage-return style.
                    ' '
                }
            }
            LineMode::Newline => ch,
            LineMode::Crlf => {
                if ch == '\r' {
                    match self.next_rune() {
                        RawRune::Eof => '\r',
                        RawRune::Bad(err) => {
                            self.pending_err = Some(err);
                            '\r'
                        }
                        RawRune::Char('\n') => '\n',
                        RawRune::Char(other) => {
                            self.le_pushed = Some(other);
                            '\r'
                        }
                    }
                } else {
                    ch
                }
            }
        }
    }

    /// Produces the next decoded rune, refilling the buffers as needed.
    fn next_rune(&mut self) -> RawRune {
        loop {
            if let Some(c) = self.decoded[self.decoded_pos..].chars().next() {
                self.decoded_pos += c.len_utf8();
                return RawRune::Char(c);
            }

            // The decoded buffer has drained; deliver any deferred error.
            if let Some(err) = self.pending_err.take() {
                self.source = None;
                self.flushed = true;
                self.raw_start = self.raw_end;
                return RawRune::Bad(err);
            }

            if self.flushed {
                return RawRune::Eof;
            }

            self.refill();
        }
    }

    /// Reads and decodes the next chunk of input into the decoded buffer.
    fn refill(&mut self) {
        self.decoded.clear();
        self.decoded_pos = 0;

        // Top up the raw buffer when it has fully drained.
        if self.raw_start == self.raw_end {
            self.raw_start = 0;
            self.raw_end = 0;
            if let Some(source) = self.source.as_mut() {
                match source.read(&mut self.raw[..]) {
                    Ok(0) => self.source = None,
                    Ok(n) => self.raw_end = n,
                    Err(err) => {
                        // Defer the error; drain what was decoded first.
                        self.pending_err = Some(ErrorKind::io(&err));
                        self.source = None;
                    }
                }
            }
        }

        let last = self.source.is_none();
        let src = &self.raw[self.raw_start..self.raw_end];
        let needed = self
            .decoder
            .max_utf8_buffer_length_without_replacement(src.len())
            .unwrap_or(SCAN_BUF);
        self.decoded.reserve(needed.max(4));

        let (result, read) =
            self.decoder
                .decode_to_string_without_replacement(src, &mut self.decoded, last);
        self.raw_start += read;

        match result {
            DecoderResult::InputEmpty => {
                if last {
                    self.flushed = true;
                }
            }
            DecoderResult::OutputFull => {}
            DecoderResult::Malformed(..) => {
                // Invalid input ends the scan once decoded characters
                // have drained.
                if self.pending_err.is_none() {
                    self.pending_err = Some(ErrorKind::BadRune);
                }
                self.source = None;
                self.raw_start = self.raw_end;
                self.flushed = true;
            }
        }
    }
}
