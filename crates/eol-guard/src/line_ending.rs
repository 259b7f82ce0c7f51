//! Line ending helpers.
//!
//! A document may use any of the three newline sequences `"\r\n"`, `'\n'` and `'\r'`, and may
//! mix them. `eol-guard` never guesses a "dominant" style by counting: the canonical line ending
//! of a document is whichever sequence occurs **first**.

/// A newline sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
    /// Unix-style LF (`'\n'`).
    Lf,
    /// Classic Mac-style CR (`'\r'`).
    Cr,
}

impl LineEnding {
    /// The literal sequence for this line ending.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
            Self::Cr => "\r",
        }
    }

    /// Short human readable name (`CRLF`, `LF`, `CR`).
    pub fn name(self) -> &'static str {
        match self {
            Self::Crlf => "CRLF",
            Self::Lf => "LF",
            Self::Cr => "CR",
        }
    }

    /// Detect the canonical line ending of a text.
    ///
    /// Policy: returns the first newline sequence found, with `"\r\n"` matched as one unit so
    /// that a CRLF is never split into a lone CR. Returns `None` if the text has no line break.
    pub fn detect_in_text(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        let pos = bytes.iter().position(|&b| b == b'\r' || b == b'\n')?;
        Some(match bytes[pos] {
            b'\n' => Self::Lf,
            _ if bytes.get(pos + 1) == Some(&b'\n') => Self::Crlf,
            _ => Self::Cr,
        })
    }
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-style newline counts of a text.
///
/// `"\r\n"` is counted once as CRLF and never as a lone CR or a lone LF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineEndingStats {
    /// Number of `"\r\n"` sequences.
    pub crlf: usize,
    /// Number of `'\n'` not preceded by `'\r'`.
    pub lf: usize,
    /// Number of `'\r'` not followed by `'\n'`.
    pub cr: usize,
}

impl LineEndingStats {
    /// Count the line endings in `text`.
    pub fn scan(text: &str) -> Self {
        let mut stats = Self::default();
        let mut bytes = text.bytes().peekable();
        while let Some(b) = bytes.next() {
            match b {
                b'\r' if bytes.peek() == Some(&b'\n') => {
                    bytes.next();
                    stats.crlf += 1;
                }
                b'\r' => stats.cr += 1,
                b'\n' => stats.lf += 1,
                _ => {}
            }
        }
        stats
    }

    /// Total number of line breaks.
    pub fn total(&self) -> usize {
        self.crlf + self.lf + self.cr
    }

    /// Whether more than one newline style is present.
    pub fn is_mixed(&self) -> bool {
        [self.crlf, self.lf, self.cr]
            .iter()
            .filter(|&&count| count > 0)
            .count()
            > 1
    }
}
