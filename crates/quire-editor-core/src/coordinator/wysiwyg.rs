//! Switching to the WYSIWYG tab: source → HTML conversion (directly or by
//! reloading the template) and DOM selection restore.

use std::collections::BTreeMap;

use crate::actions::ActionName;
use crate::command::{Command, CommandManager};
use crate::deferred::Deferred;
use crate::error::ConversionError;
use crate::platform::{EditingSurface, PlainSurface, RichSurface, SelectionPreserver};
use crate::request::{ConversionRequest, PendingRequest, ReloadRequest, Ticket};
use crate::types::{Direction, Surface, Tab};

use super::TabSwitchCoordinator;

impl<R, P, S> TabSwitchCoordinator<R, P, S>
where
    R: RichSurface,
    P: PlainSurface,
    S: SelectionPreserver<R>,
{
    pub(super) fn switch_to_wysiwyg(&mut self) {
        // No source text to convert while the plain text area is loading.
        if self.plain.is_loading() {
            // The rich text area re-creates its selection object only after
            // it is shown, so restoring has to wait for the next turn.
            self.deferred
                .schedule(self.epoch, Deferred::RestoreDomSelection);
            return;
        }

        let source = self.plain.text();
        if !self.cache.source_matches(&source) {
            self.convert_to_html(&source);
        } else if !self.rich.is_loading() {
            tracing::trace!("source unchanged since last conversion");
            self.deferred.schedule(self.epoch, Deferred::EnableWysiwygTab);
        }
    }

    /// Convert `source` to HTML and load the result into the rich text area.
    ///
    /// Uses the template reload when a template URL is configured, the
    /// converter otherwise. An outstanding source → HTML request is
    /// superseded, not awaited.
    pub fn convert_to_html(&mut self, source: &str) {
        // Prevents duplicate requests while this one is in flight.
        self.cache.set_source(source);
        // The document is rebuilt; the saved selection points nowhere.
        self.dom_selection.clear();
        self.rich.set_loading(true);

        let (ticket, superseded) = self.to_html.begin();
        if superseded {
            tracing::debug!(generation = ticket.generation, "superseding source to HTML conversion");
            self.pending
                .retain(|request| request.ticket().direction != Direction::ToHtml);
        }

        let request = match self.config.template_url.clone() {
            Some(template_url) => reload_request(ticket, template_url, source),
            None => PendingRequest::Convert(ConversionRequest {
                ticket,
                input: source.to_string(),
                syntax: self.config.syntax.clone(),
            }),
        };
        self.pending.push(request);
    }

    pub(super) fn on_switch_to_wysiwyg_failure(&mut self, err: ConversionError) {
        tracing::error!(error = %err, "{}", err.message());
        // Retry on the next switch.
        self.cache.invalidate_source();
        // The plain text area still holds the valid content.
        self.select_tab(Tab::Source);
    }

    pub(super) fn on_switch_to_wysiwyg_success(&mut self) {
        // Drop interim state (history, pending styles) of the old document.
        self.rich.commands_mut().execute(&Command::RESET, None);
        if self.active_tab == Tab::Wysiwyg {
            self.enable_wysiwyg_tab();
        }
        self.rich.set_loading(false);
    }

    pub(super) fn enable_wysiwyg_tab(&mut self) {
        // A disabled plain text area is not submitted.
        self.plain.set_enabled(false);

        // Some editing features load only once the area is enabled, so this
        // has to precede initialization.
        if self.config.enabled {
            self.rich.commands_mut().execute_flag(&Command::ENABLE, true);
        }
        if !self.rich_initialized {
            tracing::debug!("initializing rich text editor");
            self.rich.initialize();
            self.rich_initialized = true;
        }
        self.restore_dom_selection();

        self.rich.commands_mut().execute_flag(&Command::SUBMIT, true);
        // Spares an HTML → source conversion when we already know the source.
        let html = self.submitted_html();
        self.cache.set_html(html);
        self.config.set_input_converted(true);
    }

    /// Restore the saved DOM selection, or put the caret at start.
    pub(super) fn restore_dom_selection(&mut self) {
        // Focusing without a saved selection would steal the focus.
        if self.dom_selection.has_selection() {
            self.rich.set_focus(true);
        }
        self.dom_selection.restore(&mut self.rich);
        // Fired both on reload and on rich redisplay.
        self.listeners.fire(ActionName::shown(Tab::Wysiwyg), Surface::Rich);
    }
}

fn reload_request(ticket: Ticket, template_url: String, source: &str) -> PendingRequest {
    let mut params = BTreeMap::new();
    params.insert("source".to_string(), source.to_string());
    PendingRequest::Reload(ReloadRequest {
        ticket,
        template_url,
        params,
    })
}
