// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parse options and configuration.
//!
//! An [`Options`] bundle names a byte source plus the knobs the pipeline
//! recognizes: a filename for locations, a character encoding, the tab stop
//! width, and the [`Profile`] of lexical and grammatical rules. Unset knobs
//! are defaulted when a pipeline stage is built — in particular the
//! encoding, which is guessed from a BOM or a `coding:` comment in the
//! first two lines of the file, falling back to UTF-8.
//!
//! Resolving an options bundle produces a [`Config`], the immutable view
//! shared by the scanner, lexer, and parser of one parse. The profile is
//! copied on attach, so later mutations of the caller's profile never
//! affect a parse in flight, and vice versa.

use std::io::Read;
use std::rc::Rc;
use std::sync::LazyLock;

use ecow::EcoString;
use regex::bytes::Regex;

use crate::error::ErrorKind;
use crate::lex::Lexer;
use crate::parse::Parser;
use crate::profile::Profile;
use crate::scan::Scanner;

/// The filename used when none is provided.
const DEFAULT_FILENAME: &str = "<input>";

/// The encoding used when none is provided or detected.
const DEFAULT_ENCODING: &str = "utf-8";

/// The default tab stop width.
const DEFAULT_TAB_STOP: u32 = 8;

/// How many leading bytes are inspected for a `coding:` comment.
const DETECT_WINDOW: usize = 1024;

/// Matches a `coding[:=] name` tag inside a comment on one of the first
/// two lines, in either the emacs (`-*- coding: utf-8 -*-`) or vim
/// (`vim:fileencoding=utf-8`) convention.
static CODING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\s*#[^\r\n]*(?:\r?\n|\r))?\s*#[^\r\n]*coding[=:]\s*([-\w.]+)")
        .expect("coding detection pattern is valid")
});

/// Guesses the encoding of a source from its first bytes.
///
/// A UTF-8 BOM forces the default; otherwise a `coding[:=]` comment tag in
/// the inspected window wins; otherwise the default applies.
#[must_use]
pub fn guess_encoding(prefix: &[u8]) -> EcoString {
    if prefix.starts_with("\u{feff}".as_bytes()) {
        return DEFAULT_ENCODING.into();
    }

    let window = &prefix[..prefix.len().min(DETECT_WINDOW)];
    if let Some(captures) = CODING_RE.captures(window)
        && let Some(name) = captures.get(1)
        && let Ok(name) = std::str::from_utf8(name.as_bytes())
    {
        return name.into();
    }

    DEFAULT_ENCODING.into()
}

/// The resolved, immutable configuration shared by the stages of one parse.
#[derive(Debug)]
pub struct Config {
    /// The name of the file being parsed.
    pub filename: EcoString,
    /// The resolved character encoding label.
    pub encoding: EcoString,
    /// The tab stop width.
    pub tab_stop: u32,
    /// This parse's own profile copy.
    pub profile: Profile,
}

/// The options bundle accepted by [`scan`](crate::scan()),
/// [`lex`](crate::lex()), and [`parse`](crate::parse()).
pub struct Options {
    source: Box<dyn Read>,
    filename: Option<EcoString>,
    encoding: Option<EcoString>,
    tab_stop: u32,
    profile: Profile,
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("filename", &self.filename)
            .field("encoding", &self.encoding)
            .field("tab_stop", &self.tab_stop)
            .finish_non_exhaustive()
    }
}

impl Options {
    /// Creates an options bundle over a byte source, with every other
    /// option defaulted.
    #[must_use]
    pub fn new(source: Box<dyn Read>) -> Self {
        Self {
            source,
            filename: None,
            encoding: None,
            tab_stop: DEFAULT_TAB_STOP,
            profile: Profile::default(),
        }
    }

    /// Sets the filename reported in locations. Defaults to `"<input>"`.
    #[must_use]
    pub fn filename(mut self, filename: impl Into<EcoString>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Sets the character encoding. If unset, the encoding is guessed
    /// from the first bytes of the source.
    #[must_use]
    pub fn encoding(mut self, encoding: impl Into<EcoString>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Sets the tab stop width. Defaults to 8.
    #[must_use]
    pub fn tab_stop(mut self, tab_stop: u32) -> Self {
        self.tab_stop = tab_stop;
        self
    }

    /// Attaches a profile. The profile is copied, so the caller's copy
    /// stays independently mutable.
    #[must_use]
    pub fn profile(mut self, profile: &Profile) -> Self {
        self.profile = profile.copy();
        self
    }

    /// Builds a scanner from these options.
    pub fn scan(self) -> Result<Scanner, ErrorKind> {
        let (source, cfg) = self.resolve()?;
        Scanner::new(source, cfg)
    }

    /// Builds a lexer (and its scanner) from these options.
    pub fn lex(self) -> Result<Lexer, ErrorKind> {
        Ok(Lexer::new(self.scan()?))
    }

    /// Builds a parser (and its lexer and scanner) from these options.
    pub fn parse(self) -> Result<Parser, ErrorKind> {
        Ok(Parser::new(self.lex()?))
    }

    /// Resolves defaults, detecting the encoding if necessary.
    fn resolve(self) -> Result<(Box<dyn Read>, Rc<Config>), ErrorKind> {
        let Self {
            mut source,
            filename,
            encoding,
            tab_stop,
            profile,
        } = self;

        let (encoding, source): (EcoString, Box<dyn Read>) = match encoding {
            Some(enc) => (enc, source),
            None => {
                // Pull a detection window off the front of the source and
                // splice it back on afterwards.
                let mut prefix = vec![0_u8; DETECT_WINDOW];
                let mut filled = 0;
                while filled < DETECT_WINDOW {
                    match source.read(&mut prefix[filled..]) {
                        Ok(0) => break,
                        Ok(n) => filled += n,
                        Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {}
                        // Detection works with what it got; the scanner
                        // will meet the error again, or not.
                        Err(_) => break,
                    }
                }
                prefix.truncate(filled);

                let guessed = guess_encoding(&prefix);
                (guessed, Box::new(std::io::Cursor::new(prefix).chain(source)))
            }
        };

        let cfg = Config {
            filename: filename.unwrap_or_else(|| DEFAULT_FILENAME.into()),
            encoding,
            tab_stop,
            profile,
        };

        Ok((source, Rc::new(cfg)))
    }
}
