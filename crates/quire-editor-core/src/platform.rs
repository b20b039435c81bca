//! Platform abstraction traits for the editing surfaces.
//!
//! These traits define the interface between the tab-switch logic and the
//! platform-specific text areas (browser DOM, native widgets, test doubles).
//! The coordinator only ever talks to the surfaces through them.

use crate::command::CommandManager;
use crate::types::SourceRange;

/// State and content accessors shared by both editing surfaces.
pub trait EditingSurface {
    /// Whether the surface is waiting for content (a conversion or reload).
    fn is_loading(&self) -> bool;

    fn set_loading(&mut self, loading: bool);

    /// Current text content.
    fn text(&self) -> String;

    fn set_text(&mut self, text: &str);

    /// Enable or disable editing (disabled surfaces are not submitted).
    fn set_enabled(&mut self, enabled: bool);

    /// Try to give or take focus. Best effort: returns false when the
    /// platform refused (e.g. the containing window is not focused).
    fn set_focus(&mut self, focused: bool) -> bool;
}

/// The rich text (WYSIWYG) surface.
pub trait RichSurface: EditingSurface {
    type Commands: CommandManager;

    fn commands(&self) -> &Self::Commands;

    fn commands_mut(&mut self) -> &mut Self::Commands;

    /// Replace the whole document with the given HTML.
    fn set_html(&mut self, html: &str);

    /// Load the editing features (toolbar, plug-ins). The coordinator calls
    /// this exactly once, the first time the WYSIWYG tab is enabled.
    fn initialize(&mut self);
}

/// The plain text (source) surface.
pub trait PlainSurface: EditingSurface {
    /// Caret position, in characters.
    fn cursor_pos(&self) -> usize;

    /// Length of the selected text, in characters.
    fn selection_length(&self) -> usize;

    fn set_selection_range(&mut self, range: SourceRange);

    /// Store the current value as the submit value, so a form submitted
    /// before the text area gains focus still carries the right content.
    fn submit(&mut self);

    /// Current selection as a [`SourceRange`].
    fn selection_range(&self) -> SourceRange {
        SourceRange::new(self.cursor_pos(), self.selection_length())
    }
}

/// Saves and restores the DOM selection of a rich surface across hide/show.
///
/// When nothing was saved, `restore` must place the caret at the start of
/// the document (browsers default to the end).
pub trait SelectionPreserver<R: ?Sized> {
    fn save(&mut self, surface: &R);

    fn clear(&mut self);

    fn has_selection(&self) -> bool;

    fn restore(&mut self, surface: &mut R);
}
