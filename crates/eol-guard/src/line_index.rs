//! Logical line index.
//!
//! A read-only, rope-backed view of a document's lines, used to map view positions (caret,
//! breakpoints) onto a rewritten text. Lines are split at `"\r\n"`, `'\n'` and `'\r'`.

use crate::Position;
use ropey::{Rope, RopeSlice};

/// Logical line index - implemented using Rope data structure
///
/// Rope provides O(log N) line access, so clamping positions stays cheap for large documents.
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build line index from text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get total line count
    ///
    /// A trailing line break opens one more (empty) line, matching editor semantics.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Length of a line in characters, excluding its line break.
    pub fn line_len(&self, line: usize) -> Option<usize> {
        if line >= self.rope.len_lines() {
            return None;
        }
        Some(content_len(self.rope.line(line)))
    }

    /// Clamp a position to the nearest position that exists in this document.
    ///
    /// A line past the end maps to the last line; a column past the end of its line maps to the
    /// end of that line.
    pub fn clamp_position(&self, position: Position) -> Position {
        let last_line = self.line_count().saturating_sub(1);
        let line = position.line.min(last_line);
        let line_len = self.line_len(line).unwrap_or(0);
        Position::new(line, position.column.min(line_len))
    }
}

fn content_len(line: RopeSlice<'_>) -> usize {
    let mut len = line.len_chars();
    if len > 0 && line.char(len - 1) == '\n' {
        len -= 1;
    }
    if len > 0 && line.char(len - 1) == '\r' {
        len -= 1;
    }
    len
}
