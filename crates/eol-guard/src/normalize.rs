//! End-of-line normalization.
//!
//! [`Normalizer`] rewrites every line ending of a text to the document's canonical line ending
//! (the first one found, see [`LineEnding::detect_in_text`]). It is a pure function over text:
//! there is no error condition, and a text without any line break is left alone.
//!
//! # Example
//!
//! ```rust
//! use eol_guard::{LineEnding, NormalizeOutcome, Normalizer};
//!
//! let normalizer = Normalizer::default();
//! let outcome = normalizer.normalize("a\r\nb\nc");
//! assert_eq!(
//!     outcome,
//!     NormalizeOutcome::Changed {
//!         text: "a\r\nb\r\nc".to_string(),
//!         line_ending: LineEnding::Crlf,
//!     }
//! );
//! ```

use crate::LineEnding;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// Alternation is leftmost-first, so `\r\n` wins over a lone `\r` at the same position.
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|\n|\r").expect("line break pattern is valid")
});

static TRAILING_BLANKS_AND_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]*(?:\r\n|\n|\r)").expect("trailing blanks pattern is valid")
});

/// Normalization options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Strip spaces and tabs at the end of every line, and make sure the text ends with the
    /// canonical line ending.
    pub trim_trailing_whitespace: bool,
}

/// The result of a normalization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// The text contains no line break; nothing to normalize.
    NoLineEnding,
    /// The text already uses `line_ending` everywhere (and is trimmed, if requested).
    Unchanged {
        /// Canonical line ending of the text.
        line_ending: LineEnding,
    },
    /// The text was rewritten.
    Changed {
        /// Normalized text.
        text: String,
        /// Canonical line ending the text was rewritten to.
        line_ending: LineEnding,
    },
}

impl NormalizeOutcome {
    /// Returns `true` if the text was rewritten.
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    /// Canonical line ending, if the text had any line break.
    pub fn line_ending(&self) -> Option<LineEnding> {
        match self {
            Self::NoLineEnding => None,
            Self::Unchanged { line_ending } | Self::Changed { line_ending, .. } => {
                Some(*line_ending)
            }
        }
    }

    /// Take the rewritten text, if any.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Changed { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Rewrites mixed line endings to a single style.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Options this normalizer was built with.
    pub fn options(&self) -> NormalizeOptions {
        self.options
    }

    /// Normalize `text`.
    pub fn normalize(&self, text: &str) -> NormalizeOutcome {
        let Some(line_ending) = LineEnding::detect_in_text(text) else {
            return NormalizeOutcome::NoLineEnding;
        };
        let eol = line_ending.as_str();

        let normalized = if self.options.trim_trailing_whitespace {
            let replaced = TRAILING_BLANKS_AND_LINE_BREAK.replace_all(text, NoExpand(eol));
            let mut out = replaced.trim_end_matches([' ', '\t']).to_string();
            if !out.ends_with(eol) {
                out.push_str(eol);
            }
            out
        } else {
            LINE_BREAK.replace_all(text, NoExpand(eol)).into_owned()
        };

        if normalized == text {
            NormalizeOutcome::Unchanged { line_ending }
        } else {
            NormalizeOutcome::Changed {
                text: normalized,
                line_ending,
            }
        }
    }
}

/// Convenience wrapper around [`Normalizer::normalize`].
pub fn normalize_line_endings(text: &str, options: NormalizeOptions) -> NormalizeOutcome {
    Normalizer::new(options).normalize(text)
}
