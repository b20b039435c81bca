//! Core editor types: tabs, surfaces, conversion direction and source selection.
//!
//! These types are framework-agnostic and shared by the coordinator, the
//! session driver and the host UI bindings.

use serde::{Deserialize, Serialize};

/// The two editing tabs. Both show the same document in different encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Rich text area producing HTML.
    #[default]
    Wysiwyg,
    /// Plain text area holding source syntax.
    Source,
}

impl Tab {
    /// Tab index as used by tab panels (WYSIWYG first).
    pub fn index(self) -> usize {
        match self {
            Tab::Wysiwyg => 0,
            Tab::Source => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Tab::Wysiwyg),
            1 => Some(Tab::Source),
            _ => None,
        }
    }

    /// The tab holding the other encoding.
    pub fn other(self) -> Self {
        match self {
            Tab::Wysiwyg => Tab::Source,
            Tab::Source => Tab::Wysiwyg,
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tab::Wysiwyg => f.write_str("wysiwyg"),
            Tab::Source => f.write_str("source"),
        }
    }
}

/// Which editing surface an event originates from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    Rich,
    Plain,
}

/// Direction of a conversion request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Source text → HTML (entering the WYSIWYG tab).
    ToHtml,
    /// HTML → source text (entering the source tab).
    ToSource,
}

impl Direction {
    /// The tab whose content is produced by a conversion in this direction.
    pub fn target_tab(self) -> Tab {
        match self {
            Direction::ToHtml => Tab::Wysiwyg,
            Direction::ToSource => Tab::Source,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::ToHtml => f.write_str("html"),
            Direction::ToSource => f.write_str("source"),
        }
    }
}

/// Caret/selection on the source text area, as (start offset, length).
///
/// Offsets are in characters. A zero length means a collapsed caret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SourceRange {
    pub start: usize,
    pub length: usize,
}

impl SourceRange {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Caret at the start of the text.
    pub fn start_of_text() -> Self {
        Self::default()
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn is_collapsed(&self) -> bool {
        self.length == 0
    }
}

/// Result of the pre-selection gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeforeSelection {
    /// The requested tab is already active; the caller must not switch.
    Cancel,
    /// The outgoing surface was flushed/snapshotted; the switch may happen.
    Proceed,
}
