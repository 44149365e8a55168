// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Runtime-configurable lexical and grammatical rules.
//!
//! A [`Profile`] parameterizes the entire front-end: which runes may start
//! and continue identifiers, which runes are string flags and quotes, how
//! escapes decode, which identifiers are keywords, which operator spellings
//! exist, what Unicode normalization identifiers receive, and the Pratt
//! parse table. One lexer can therefore process different versions of the
//! language without ad-hoc complications — the version differences live in
//! profile data.
//!
//! Profiles are cloned on attach: [`Profile::copy`] deep-copies the keyword
//! map, the operator trie, and the parse table (the mutable parts) while
//! sharing the immutable rune sets and flag/quote/escape tables, so
//! per-parse mutations never leak into the base profile.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

use ecow::EcoString;
use unicode_normalization::UnicodeNormalization;

use crate::error::ErrorKind;
use crate::location::Location;
use crate::optrie::OpTrie;
use crate::parse::ParseTable;
use crate::scan::{AugChar, CHAR_HEX_DIGIT, CHAR_OCT_DIGIT, CharValue, ScanChar, Scanner};
use crate::token::Symbol;

/// Raw string: escape sequences are taken literally.
pub const STR_RAW: u8 = 1 << 0;
/// Bytes literal: the buffer holds bytes, each in `0..=255`.
pub const STR_BYTES: u8 = 1 << 1;
/// Multi-line string: unescaped newlines are content, not errors.
pub const STR_MULTI: u8 = 1 << 2;
/// The quote character supports triple-quoting.
pub const STR_TRIPLE: u8 = 1 << 3;

/// A set of runes, Unicode-range based.
///
/// Cheap to clone; the underlying set is shared.
#[derive(Debug, Clone)]
pub struct RuneSet(Arc<RuneSetKind>);

#[derive(Debug)]
enum RuneSetKind {
    Ranges(Vec<RangeInclusive<char>>),
    XidStart,
    XidContinue,
}

impl RuneSet {
    /// Creates a set from explicit inclusive rune ranges.
    #[must_use]
    pub fn from_ranges(ranges: impl IntoIterator<Item = RangeInclusive<char>>) -> Self {
        Self(Arc::new(RuneSetKind::Ranges(ranges.into_iter().collect())))
    }

    /// The Unicode `XID_Start` runes, plus `_`.
    #[must_use]
    pub fn xid_start() -> Self {
        Self(Arc::new(RuneSetKind::XidStart))
    }

    /// The Unicode `XID_Continue` runes.
    #[must_use]
    pub fn xid_continue() -> Self {
        Self(Arc::new(RuneSetKind::XidContinue))
    }

    /// Returns `true` if the set contains the rune.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        match &*self.0 {
            RuneSetKind::Ranges(ranges) => ranges.iter().any(|r| r.contains(&ch)),
            RuneSetKind::XidStart => ch == '_' || unicode_ident::is_xid_start(ch),
            RuneSetKind::XidContinue => unicode_ident::is_xid_continue(ch),
        }
    }
}

/// The Unicode normalization form applied to identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Norm {
    /// No normalization.
    None,
    /// Canonical composition.
    #[default]
    Nfc,
    /// Compatibility composition.
    Nfkc,
}

impl Norm {
    /// Applies the normalization form to identifier text.
    #[must_use]
    pub fn apply(self, text: &str) -> EcoString {
        match self {
            Self::None => EcoString::from(text),
            Self::Nfc => text.nfc().collect::<String>().into(),
            Self::Nfkc => text.nfkc().collect::<String>().into(),
        }
    }
}

/// A string escape handler.
///
/// Invoked by the string recognizer on the rune following a backslash (in
/// non-raw mode). A handler may consume further runes from the scanner; it
/// returns the rune to append, or `None` to append nothing (the newline
/// escape).
#[derive(Debug, Clone, Copy)]
pub enum Escape {
    /// Map the escape rune to a fixed rune, or to nothing.
    Simple(Option<char>),
    /// Consume exactly `n` hexadecimal digits and decode them as a code
    /// point. A non-hex rune inside the run is a [`ErrorKind::BadEscape`].
    Hex(u8),
    /// Consume up to three octal digits while the value fits eight bits.
    Oct,
}

impl Escape {
    /// Runs the handler. `ch` is the rune that selected it.
    pub fn apply(
        self,
        ch: AugChar,
        s: &mut Scanner,
    ) -> Result<Option<char>, (ErrorKind, Location)> {
        match self {
            Self::Simple(out) => Ok(out),
            Self::Hex(cnt) => Self::hex(cnt, ch, s),
            Self::Oct => Self::oct(ch, s),
        }
    }

    fn hex(cnt: u8, mut ch: AugChar, s: &mut Scanner) -> Result<Option<char>, (ErrorKind, Location)> {
        let mut code: u32 = 0;
        let mut last_loc = ch.loc.clone();

        for shift in (0..cnt).rev() {
            ch = s.next();
            if ch.ch == ScanChar::Err {
                let err = ch.err().unwrap_or(ErrorKind::BadRune);
                return Err((err, ch.loc));
            }
            let CharValue::Digit(val) = ch.value else {
                return Err((ErrorKind::BadEscape, ch.loc));
            };
            if ch.class & CHAR_HEX_DIGIT == 0 {
                return Err((ErrorKind::BadEscape, ch.loc));
            }

            code |= val << (4 * u32::from(shift));
            last_loc = ch.loc.clone();
        }

        match char::from_u32(code) {
            Some(decoded) => Ok(Some(decoded)),
            None => Err((ErrorKind::BadStrChar, last_loc)),
        }
    }

    fn oct(first: AugChar, s: &mut Scanner) -> Result<Option<char>, (ErrorKind, Location)> {
        let CharValue::Digit(val) = first.value else {
            return Err((ErrorKind::BadEscape, first.loc));
        };
        let mut code = val;
        let mut taken = 1;

        // 0x1f << 3 is still eight bits.
        while taken < 3 && code <= 0x1f {
            let ch = s.next();
            if ch.ch == ScanChar::Err {
                let err = ch.err().unwrap_or(ErrorKind::BadRune);
                return Err((err, ch.loc));
            }
            if ch.class & CHAR_OCT_DIGIT != 0 {
                let CharValue::Digit(digit) = ch.value else {
                    return Err((ErrorKind::BadEscape, ch.loc));
                };
                taken += 1;
                code = (code << 3) | digit;
            } else {
                s.push(ch);
                break;
            }
        }

        // Three octal digits top out at 0o777, always a valid char.
        Ok(char::from_u32(code))
    }
}

/// A map of identifier strings to keyword symbols.
#[derive(Debug, Clone, Default)]
pub struct Keywords(HashMap<EcoString, Arc<Symbol>>);

impl Keywords {
    /// Creates an empty keyword map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a keyword. Idempotent: the first registration wins.
    pub fn add(&mut self, sym: Arc<Symbol>) {
        self.0.entry(sym.name.clone()).or_insert(sym);
    }

    /// Removes a keyword. Idempotent.
    pub fn remove(&mut self, sym: &Symbol) {
        self.0.remove(&sym.name);
    }

    /// Looks up a keyword by its normalized identifier text.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Symbol>> {
        self.0.get(name)
    }

    /// Returns the number of registered keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no keywords are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The version-specific rules parameterizing the front-end.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Runes that may start an identifier.
    pub id_start: RuneSet,
    /// Runes that may continue an identifier.
    pub id_cont: RuneSet,
    /// String flag runes and the flag bits they set (e.g. `r` → raw).
    pub str_flags: Arc<HashMap<char, u8>>,
    /// Quote runes and their capability bits (e.g. triple-quoting).
    pub quotes: Arc<HashMap<char, u8>>,
    /// String escape handlers keyed by the rune after the backslash.
    pub escapes: Arc<HashMap<char, Escape>>,
    /// Keyword identifiers.
    pub keywords: Keywords,
    /// The Unicode normalization form applied to identifiers.
    pub norm: Norm,
    /// Registered operator spellings.
    pub operators: OpTrie,
    /// The Pratt parse table.
    pub parse_table: ParseTable,
}

impl Profile {
    /// Generates an independently mutable copy of this profile.
    ///
    /// The keyword map, operator trie, and parse table are deep-copied;
    /// the rune sets and flag/quote/escape tables are shared.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// The standard escape table: C-style single-character escapes, octal
    /// and hex code points, and the line-splicing newline escape.
    #[must_use]
    pub fn standard_escapes() -> HashMap<char, Escape> {
        let mut escapes = HashMap::new();
        escapes.insert('\n', Escape::Simple(None));
        for digit in '0'..='7' {
            escapes.insert(digit, Escape::Oct);
        }
        escapes.insert('\\', Escape::Simple(Some('\\')));
        escapes.insert('\'', Escape::Simple(Some('\'')));
        escapes.insert('"', Escape::Simple(Some('"')));
        escapes.insert('a', Escape::Simple(Some('\x07')));
        escapes.insert('b', Escape::Simple(Some('\x08')));
        escapes.insert('e', Escape::Simple(Some('\x1b')));
        escapes.insert('f', Escape::Simple(Some('\x0c')));
        escapes.insert('n', Escape::Simple(Some('\n')));
        escapes.insert('r', Escape::Simple(Some('\r')));
        escapes.insert('t', Escape::Simple(Some('\t')));
        escapes.insert('v', Escape::Simple(Some('\x0b')));
        escapes.insert('x', Escape::Hex(2));
        escapes.insert('u', Escape::Hex(4));
        escapes.insert('U', Escape::Hex(8));
        escapes
    }
}

impl Default for Profile {
    /// The base profile: Unicode identifiers under NFC, `r`/`b` string
    /// flags, triple-quotable `"` and `'`, the standard escape table, and
    /// no keywords, operators, or parse entries.
    fn default() -> Self {
        let mut str_flags = HashMap::new();
        str_flags.insert('r', STR_RAW);
        str_flags.insert('R', STR_RAW);
        str_flags.insert('b', STR_BYTES);
        str_flags.insert('B', STR_BYTES);

        let mut quotes = HashMap::new();
        quotes.insert('"', STR_TRIPLE);
        quotes.insert('\'', STR_TRIPLE);

        Self {
            id_start: RuneSet::xid_start(),
            id_cont: RuneSet::xid_continue(),
            str_flags: Arc::new(str_flags),
            quotes: Arc::new(quotes),
            escapes: Arc::new(Self::standard_escapes()),
            keywords: Keywords::new(),
            norm: Norm::default(),
            operators: OpTrie::new(),
            parse_table: ParseTable::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rune_set_ranges() {
        let set = RuneSet::from_ranges(['a'..='z', '_'..='_']);
        assert!(set.contains('a'));
        assert!(set.contains('q'));
        assert!(set.contains('_'));
        assert!(!set.contains('A'));
        assert!(!set.contains('0'));
    }

    #[test]
    fn rune_set_xid() {
        let start = RuneSet::xid_start();
        assert!(start.contains('a'));
        assert!(start.contains('_'));
        assert!(start.contains('λ'));
        assert!(!start.contains('0'));

        let cont = RuneSet::xid_continue();
        assert!(cont.contains('a'));
        assert!(cont.contains('0'));
        assert!(!cont.contains('$'));
    }

    #[test]
    fn norm_forms() {
        // U+0065 U+0301 composes to U+00E9 under NFC.
        assert_eq!(Norm::Nfc.apply("e\u{301}"), "\u{e9}");
        assert_eq!(Norm::None.apply("e\u{301}"), "e\u{301}");
        // U+FB01 (fi ligature) decomposes under NFKC only.
        assert_eq!(Norm::Nfkc.apply("\u{fb01}"), "fi");
        assert_eq!(Norm::Nfc.apply("\u{fb01}"), "\u{fb01}");
    }

    #[test]
    fn keywords_add_remove_idempotent() {
        let mut kw = Keywords::new();
        let first = Symbol::new("if");
        kw.add(first.clone());
        kw.add(Symbol::new("if"));

        assert_eq!(kw.len(), 1);
        assert!(Arc::ptr_eq(kw.get("if").unwrap(), &first));

        kw.remove(&Symbol::new("if"));
        kw.remove(&Symbol::new("if"));
        assert!(kw.is_empty());
        assert!(kw.get("if").is_none());
    }

    #[test]
    fn profile_copy_isolates_mutable_parts() {
        let base = Profile::default();
        let mut copy = base.copy();

        copy.keywords.add(Symbol::new("while"));
        copy.operators.add(Symbol::new("+"));

        assert!(base.keywords.is_empty());
        assert!(base.operators.next(base.operators.root(), '+').is_none());
        assert!(copy.keywords.get("while").is_some());
        assert!(copy.operators.next(copy.operators.root(), '+').is_some());
    }

    #[test]
    fn profile_copy_shares_value_tables() {
        let base = Profile::default();
        let copy = base.copy();

        assert!(Arc::ptr_eq(&base.str_flags, &copy.str_flags));
        assert!(Arc::ptr_eq(&base.quotes, &copy.quotes));
        assert!(Arc::ptr_eq(&base.escapes, &copy.escapes));
    }

    #[test]
    fn standard_escape_table_shape() {
        let escapes = Profile::standard_escapes();
        assert!(matches!(escapes.get(&'n'), Some(Escape::Simple(Some('\n')))));
        assert!(matches!(escapes.get(&'\n'), Some(Escape::Simple(None))));
        assert!(matches!(escapes.get(&'x'), Some(Escape::Hex(2))));
        assert!(matches!(escapes.get(&'U'), Some(Escape::Hex(8))));
        assert!(matches!(escapes.get(&'3'), Some(Escape::Oct)));
        assert!(escapes.get(&'q').is_none());
    }
}
