//! View state preserved across a document rewrite.
//!
//! Hosts tend to reset the caret, scroll offsets and breakpoints of a document whose content is
//! replaced wholesale. [`ViewState`] is a plain value captured before the rewrite and handed back
//! to the host afterwards; it is never mutated in between.

use crate::LineIndex;
use serde::{Deserialize, Serialize};

/// Logical position in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Scroll information for one axis of a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollInfo {
    /// Minimum scroll unit.
    pub min_unit: i32,
    /// Maximum scroll unit.
    pub max_unit: i32,
    /// Number of units visible at once.
    pub visible_units: i32,
    /// First visible unit (the scroll position).
    pub first_visible: i32,
}

/// Scroll offsets of a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollState {
    /// Horizontal axis (columns).
    pub horizontal: ScrollInfo,
    /// Vertical axis (lines).
    pub vertical: ScrollInfo,
}

/// When a conditional breakpoint fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakpointConditionKind {
    /// Break when the condition evaluates to true.
    #[default]
    WhenTrue,
    /// Break when the value of the condition changes.
    WhenChanged,
}

/// How the hit count of a breakpoint is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitCountKind {
    /// Always break.
    #[default]
    None,
    /// Break when the hit count equals the target.
    Equal,
    /// Break when the hit count is greater than or equal to the target.
    GreaterOrEqual,
    /// Break when the hit count is a multiple of the target.
    Multiple,
}

/// A source breakpoint attached to a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Function name, if the breakpoint was set on a function.
    pub function_name: String,
    /// Zero-based file line.
    pub line: usize,
    /// Zero-based file column.
    pub column: usize,
    /// Condition expression (empty when unconditional).
    pub condition: String,
    /// How `condition` is evaluated.
    pub condition_kind: BreakpointConditionKind,
    /// Language of the condition expression.
    pub language: String,
    /// Hit count target.
    pub hit_count: u32,
    /// How `hit_count` is interpreted.
    pub hit_count_kind: HitCountKind,
}

impl Breakpoint {
    /// Create an unconditional breakpoint at a position.
    pub fn at(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            ..Self::default()
        }
    }

    /// Position of this breakpoint.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// Caret, scroll and breakpoint state of a document view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// Caret position.
    pub caret: Position,
    /// Scroll offsets.
    pub scroll: ScrollState,
    /// Breakpoints set in the document.
    pub breakpoints: Vec<Breakpoint>,
}

impl ViewState {
    /// Return a copy of this state whose positions all exist in `index`.
    ///
    /// Line ending rewrites keep the line structure intact, so in practice only an emptied or
    /// truncated document moves anything.
    pub fn clamped_to(&self, index: &LineIndex) -> Self {
        let breakpoints = self
            .breakpoints
            .iter()
            .map(|bp| {
                let position = index.clamp_position(bp.position());
                Breakpoint {
                    line: position.line,
                    column: position.column,
                    ..bp.clone()
                }
            })
            .collect();

        Self {
            caret: index.clamp_position(self.caret),
            scroll: self.scroll,
            breakpoints,
        }
    }
}
