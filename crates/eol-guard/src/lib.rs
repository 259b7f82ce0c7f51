#![warn(missing_docs)]
//! eol-guard - Line Ending Normalization on Save
//!
//! # Overview
//!
//! `eol-guard` rewrites mixed line endings of a document right before it is persisted, while
//! keeping the editor state of that document (caret, scroll offsets, breakpoints) where it was.
//!
//! The canonical line ending of a document is the **first** newline sequence it contains
//! (`"\r\n"`, `'\n'` or `'\r'`); every other line ending is rewritten to match. There is no
//! majority vote.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Host (IDE, editor, DocumentTable)          │  ← Owns documents and views
//! ├─────────────────────────────────────────────┤
//! │  SaveInterceptor                            │  ← "Before save" hook
//! ├─────────────────────────────────────────────┤
//! │  ViewState + LineIndex                      │  ← Caret/scroll/breakpoints
//! ├─────────────────────────────────────────────┤
//! │  Normalizer + LineEnding                    │  ← Pure text transformation
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Normalizing text
//!
//! ```rust
//! use eol_guard::{LineEnding, NormalizeOptions, Normalizer};
//!
//! let normalizer = Normalizer::new(NormalizeOptions::default());
//! let outcome = normalizer.normalize("x\ny\r\nz");
//! assert_eq!(outcome.line_ending(), Some(LineEnding::Lf));
//! assert_eq!(outcome.into_text().as_deref(), Some("x\ny\nz"));
//! ```
//!
//! ## Hooking saves
//!
//! ```rust
//! use eol_guard::{DocumentTable, NormalizeOptions, Position, SaveInterceptor};
//!
//! let mut table = DocumentTable::new();
//! table.advise(SaveInterceptor::new(NormalizeOptions::default()));
//!
//! let doc = table.open(None, "fn main() {\r\n}\n").unwrap();
//! table.set_caret(doc, Position::new(1, 1)).unwrap();
//!
//! assert_eq!(table.save(doc).unwrap(), "fn main() {\r\n}\r\n");
//! assert_eq!(table.caret(doc).unwrap(), Some(Position::new(1, 1)));
//! ```
//!
//! # Module Description
//!
//! - [`line_ending`] - Line ending detection and statistics
//! - [`normalize`] - The normalizer
//! - [`line_index`] - Rope based line index
//! - [`view_state`] - Caret, scroll and breakpoint values
//! - [`host`] - Host capability and lifecycle traits
//! - [`interceptor`] - The save interceptor
//! - [`table`] - In-memory document host
//! - [`config`] - JSON configuration

pub mod config;
mod error;
pub mod host;
pub mod interceptor;
pub mod line_ending;
pub mod line_index;
pub mod normalize;
pub mod table;
pub mod view_state;

pub use config::GuardConfig;
pub use error::{ConfigError, HostError, TableError};
pub use host::{AttributeChanges, DocumentHost, DocumentLifecycleEvents, EventStatus};
pub use interceptor::SaveInterceptor;
pub use line_ending::{LineEnding, LineEndingStats};
pub use line_index::LineIndex;
pub use normalize::{NormalizeOptions, NormalizeOutcome, Normalizer, normalize_line_endings};
pub use table::{AdviseCookie, DocumentCookie, DocumentTable, TableSubscriber};
pub use view_state::{
    Breakpoint, BreakpointConditionKind, HitCountKind, Position, ScrollInfo, ScrollState,
    ViewState,
};
