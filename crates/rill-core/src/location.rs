// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source location tracking.
//!
//! Every token and AST node carries a [`Location`] indicating the range of
//! source it covers, expressed as line/column coordinates rather than byte
//! offsets: Rill sources pass through an encoding decoder and line-ending
//! normalization before tokenization, so byte offsets into the raw input
//! would not survive the trip.
//!
//! A [`Location`] is a half-open range: `begin` is the first position of the
//! entity, `end` is one past it. The scanner maintains a single running
//! location and advances it in place for every character it delivers.

use std::fmt;

use ecow::EcoString;

use crate::error::ErrorKind;

/// A position within a file. Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilePos {
    /// The line number of the position.
    pub line: u32,
    /// The column number of the position.
    pub col: u32,
}

impl FilePos {
    /// Creates a new file position.
    #[must_use]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl Default for FilePos {
    fn default() -> Self {
        Self { line: 0, col: 0 }
    }
}

/// The exact range of source locations occupied by some entity.
///
/// The range runs from `begin` (inclusive) to `end` (exclusive). Two
/// locations can only be joined when they name the same file; joining
/// across files fails with [`ErrorKind::SplitEntity`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// The name of the file.
    pub file: EcoString,
    /// The beginning of the range.
    pub begin: FilePos,
    /// The end of the range, exclusive.
    pub end: FilePos,
}

impl Location {
    /// Creates a location collapsed to the start of the named file.
    #[must_use]
    pub fn start_of(file: impl Into<EcoString>) -> Self {
        Self {
            file: file.into(),
            begin: FilePos::new(1, 1),
            end: FilePos::new(1, 1),
        }
    }

    /// Advances the location in place. The current range end becomes the
    /// range beginning, and the end is extended by the given offset. When
    /// the line advances, the column resets to 1 before the column offset
    /// is applied.
    pub fn advance(&mut self, offset: FilePos) {
        self.begin = self.end;

        if offset.line > 0 {
            self.end.line += offset.line;
            self.end.col = 1;
        }
        self.end.col += offset.col;
    }

    /// Advances the location in place as if by a tab character: the end
    /// column jumps to the next multiple of `tab_stop` plus 1.
    pub fn advance_tab(&mut self, tab_stop: u32) {
        self.advance(FilePos::new(0, 1 + tab_stop - self.end.col % tab_stop));
    }

    /// Creates a new location ranging from the beginning of this location
    /// to the beginning of `other`.
    pub fn thru(&self, other: &Location) -> Result<Location, ErrorKind> {
        if self.file != other.file {
            return Err(ErrorKind::SplitEntity);
        }

        Ok(Location {
            file: self.file.clone(),
            begin: self.begin,
            end: other.begin,
        })
    }

    /// Creates a new location ranging from the beginning of this location
    /// to the end of `other`.
    pub fn thru_end(&self, other: &Location) -> Result<Location, ErrorKind> {
        if self.file != other.file {
            return Err(ErrorKind::SplitEntity);
        }

        Ok(Location {
            file: self.file.clone(),
            begin: self.begin,
            end: other.end,
        })
    }
}

impl fmt::Display for Location {
    /// Formats as `file:L:C` for a single point, `file:L:C1-C2` for a
    /// single-line range wider than one column, and `file:L1:C1-L2:C2`
    /// for a range spanning lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.begin.line, self.begin.col)?;

        if self.begin.line != self.end.line {
            write!(f, "-{}:{}", self.end.line, self.end.col)?;
        } else if self.end.col - self.begin.col > 1 {
            write!(f, "-{}", self.end.col)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(bl: u32, bc: u32, el: u32, ec: u32) -> Location {
        Location {
            file: "file".into(),
            begin: FilePos::new(bl, bc),
            end: FilePos::new(el, ec),
        }
    }

    #[test]
    fn advance_column() {
        let mut l = loc(3, 2, 3, 3);
        l.advance(FilePos::new(0, 1));
        assert_eq!(l, loc(3, 3, 3, 4));
    }

    #[test]
    fn advance_line_resets_column() {
        let mut l = loc(3, 2, 3, 5);
        l.advance(FilePos::new(1, 0));
        assert_eq!(l, loc(3, 5, 4, 1));
    }

    #[test]
    fn advance_zero_collapses() {
        let mut l = loc(3, 2, 3, 5);
        l.advance(FilePos::default());
        assert_eq!(l, loc(3, 5, 3, 5));
    }

    #[test]
    fn advance_tab_jumps_to_tab_stop() {
        // From column 1, a tab with tab stop 8 lands on column 9.
        let mut l = loc(1, 1, 1, 1);
        l.advance_tab(8);
        assert_eq!(l.end, FilePos::new(1, 9));

        // From column 5, the next stop is still column 9.
        let mut l = loc(1, 4, 1, 5);
        l.advance_tab(8);
        assert_eq!(l.end, FilePos::new(1, 9));

        // From a tab stop boundary plus one, jump a full stop.
        let mut l = loc(1, 8, 1, 9);
        l.advance_tab(8);
        assert_eq!(l.end, FilePos::new(1, 17));
    }

    #[test]
    fn thru_takes_begin_of_other() {
        let a = loc(1, 1, 1, 2);
        let b = loc(1, 5, 1, 6);
        let joined = a.thru(&b).unwrap();
        assert_eq!(joined, loc(1, 1, 1, 5));
    }

    #[test]
    fn thru_end_takes_end_of_other() {
        let a = loc(1, 1, 1, 2);
        let b = loc(2, 5, 2, 6);
        let joined = a.thru_end(&b).unwrap();
        assert_eq!(joined, loc(1, 1, 2, 6));
    }

    #[test]
    fn thru_rejects_split_files() {
        let a = loc(1, 1, 1, 2);
        let mut b = loc(1, 5, 1, 6);
        b.file = "other".into();

        assert_eq!(a.thru(&b), Err(ErrorKind::SplitEntity));
        assert_eq!(a.thru_end(&b), Err(ErrorKind::SplitEntity));
    }

    #[test]
    fn display_point() {
        assert_eq!(loc(3, 2, 3, 3).to_string(), "file:3:2");
    }

    #[test]
    fn display_zero_width_as_point() {
        assert_eq!(loc(3, 2, 3, 2).to_string(), "file:3:2");
    }

    #[test]
    fn display_single_line_range() {
        assert_eq!(loc(3, 2, 3, 9).to_string(), "file:3:2-9");
    }

    #[test]
    fn display_multi_line_range() {
        assert_eq!(loc(3, 2, 5, 1).to_string(), "file:3:2-5:1");
    }
}
