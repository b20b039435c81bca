//! Switching to the source tab: HTML → source conversion and source
//! selection restore.

use crate::actions::ActionName;
use crate::command::{Command, CommandManager};
use crate::error::ConversionError;
use crate::platform::{EditingSurface, PlainSurface, RichSurface, SelectionPreserver};
use crate::request::{ConversionRequest, PendingRequest};
use crate::types::{Direction, SourceRange, Surface, Tab};

use super::TabSwitchCoordinator;

impl<R, P, S> TabSwitchCoordinator<R, P, S>
where
    R: RichSurface,
    P: PlainSurface,
    S: SelectionPreserver<R>,
{
    pub(super) fn switch_to_source(&mut self) {
        // No HTML to convert while the rich text area is still loading.
        if self.rich.is_loading() {
            // The plain text area lost its selection while hidden.
            self.restore_source_selection();
            return;
        }

        // Flushed by the pre-selection gate.
        let html = self.submitted_html();
        if !self.cache.html_matches(&html) {
            self.convert_from_html(&html);
        } else if !self.plain.is_loading() {
            tracing::trace!("HTML unchanged since last conversion");
            self.enable_source_tab();
        }
    }

    /// Convert `html` to source and load the result into the plain text area.
    ///
    /// An outstanding HTML → source request is superseded, not awaited.
    pub fn convert_from_html(&mut self, html: &str) {
        // Prevents duplicate requests while this one is in flight.
        self.cache.set_html(html);
        // New source text: the saved caret position means nothing anymore.
        self.source_range = SourceRange::start_of_text();

        let (ticket, superseded) = self.to_source.begin();
        if superseded {
            tracing::debug!(generation = ticket.generation, "superseding HTML to source conversion");
            self.pending
                .retain(|request| request.ticket().direction != Direction::ToSource);
        } else {
            self.plain.set_loading(true);
        }

        self.pending.push(PendingRequest::Convert(ConversionRequest {
            ticket,
            input: html.to_string(),
            syntax: self.config.syntax.clone(),
        }));
    }

    pub(super) fn on_switch_to_source_failure(&mut self, err: ConversionError) {
        tracing::error!(error = %err, "{}", err.message());
        // Retry on the next switch.
        self.cache.invalidate_html();
        // The rich text area still holds the valid content.
        self.select_tab(Tab::Wysiwyg);
    }

    pub(super) fn on_switch_to_source_success(&mut self, source: String) {
        // Spares a source → HTML conversion when we already have the HTML.
        self.cache.set_source(source.as_str());
        self.plain.set_text(&source);
        self.plain.set_loading(false);
        if self.active_tab == Tab::Source {
            self.enable_source_tab();
        }
    }

    pub(super) fn enable_source_tab(&mut self) {
        // A disabled rich text area is not submitted.
        self.rich.commands_mut().execute_flag(&Command::ENABLE, false);

        if self.config.enabled {
            self.plain.set_enabled(true);
        }
        self.plain.submit();
        self.config.set_input_converted(false);
        self.restore_source_selection();
    }

    /// Restore the saved source selection, or put the caret at start.
    pub(super) fn restore_source_selection(&mut self) {
        if !self.plain.set_focus(true) {
            tracing::trace!("plain text area did not take the focus");
        }
        self.plain.set_selection_range(self.source_range);
        // Fired both on reload and on plain redisplay.
        self.listeners.fire(ActionName::shown(Tab::Source), Surface::Rich);
    }
}
