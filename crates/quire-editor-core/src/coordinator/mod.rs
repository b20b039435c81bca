//! Tab-switch coordinator.
//!
//! Keeps the rich text area and the source text area in sync while the user
//! moves between the WYSIWYG and source tabs:
//!
//! 1. `before_selection` runs while the outgoing surface is still visible. It
//!    flushes the rich text area or remembers the source selection.
//! 2. `on_selection` runs once the tab changed and starts the conversion the
//!    incoming surface needs, unless its content is unchanged since the last
//!    conversion.
//! 3. The driver executes the queued [`PendingRequest`]s and reports back
//!    through [`TabSwitchCoordinator::complete`]; results of superseded
//!    requests are dropped.
//! 4. The driver calls [`TabSwitchCoordinator::run_deferred`] after each turn
//!    to resume work that needed the rich text area to be visible.
//!
//! Failures are never fatal. The failed direction's cache slot is cleared and
//! the editor moves back to the tab whose content is still valid.

mod source;
mod wysiwyg;


use crate::actions::{ActionEvent, ActionListeners, ActionName, ListenerId};
use crate::cache::ConvertedValueCache;
use crate::command::{Command, CommandManager};
use crate::config::EditorConfig;
use crate::deferred::{Deferred, DeferredQueue, Scheduled};
use crate::platform::{EditingSurface, PlainSurface, RichSurface, SelectionPreserver};
use crate::request::{Completion, PendingRequest, RequestTracker};
use crate::types::{BeforeSelection, Direction, SourceRange, Surface, Tab};

pub struct TabSwitchCoordinator<R, P, S> {
    config: EditorConfig,
    rich: R,
    plain: P,
    dom_selection: S,
    listeners: ActionListeners,
    active_tab: Tab,
    /// Bumped on every committed tab selection; deferred work from an older
    /// epoch is stale.
    epoch: u64,
    cache: ConvertedValueCache,
    /// Source selection saved before the source tab was hidden.
    source_range: SourceRange,
    to_source: RequestTracker,
    to_html: RequestTracker,
    pending: Vec<PendingRequest>,
    deferred: DeferredQueue,
    rich_initialized: bool,
}

impl<R, P, S> TabSwitchCoordinator<R, P, S>
where
    R: RichSurface,
    P: PlainSurface,
    S: SelectionPreserver<R>,
{
    /// Create a coordinator for one editor instance. The configured default
    /// editor becomes the active tab.
    pub fn new(config: EditorConfig, rich: R, plain: P, dom_selection: S) -> Self {
        let active_tab = config.default_editor;
        Self {
            config,
            rich,
            plain,
            dom_selection,
            listeners: ActionListeners::new(),
            active_tab,
            epoch: 0,
            cache: ConvertedValueCache::new(),
            source_range: SourceRange::start_of_text(),
            to_source: RequestTracker::new(Direction::ToSource),
            to_html: RequestTracker::new(Direction::ToHtml),
            pending: Vec::new(),
            deferred: DeferredQueue::new(),
            rich_initialized: false,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn rich(&self) -> &R {
        &self.rich
    }

    pub fn rich_mut(&mut self) -> &mut R {
        &mut self.rich
    }

    pub fn plain(&self) -> &P {
        &self.plain
    }

    pub fn plain_mut(&mut self) -> &mut P {
        &mut self.plain
    }

    pub fn dom_selection(&self) -> &S {
        &self.dom_selection
    }

    pub fn cache(&self) -> &ConvertedValueCache {
        &self.cache
    }

    pub fn source_range(&self) -> SourceRange {
        self.source_range
    }

    /// Register a listener for the tab lifecycle actions.
    pub fn add_action_listener(
        &mut self,
        listener: impl FnMut(&ActionEvent) + 'static,
    ) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_action_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Whether a conversion in `direction` is awaiting its result.
    pub fn is_converting(&self, direction: Direction) -> bool {
        match direction {
            Direction::ToHtml => self.to_html.is_outstanding(),
            Direction::ToSource => self.to_source.is_outstanding(),
        }
    }

    /// Drain the requests queued since the last call, oldest first.
    pub fn take_requests(&mut self) -> Vec<PendingRequest> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending_requests(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Forget the last converted values, e.g. after the host replaced the
    /// editor content behind the coordinator's back.
    pub fn reset_cache(&mut self) {
        self.cache.clear();
    }

    /// Put the initial content into the editor.
    ///
    /// `input` is HTML when `config.input_converted` is set, source text
    /// otherwise. It lands in the surface of the default editor, converting
    /// first if its encoding does not match. The surface holding the input's
    /// own encoding gets it too, so a later cache hit never exposes an empty
    /// surface.
    pub fn load_content(&mut self, input: &str) {
        tracing::debug!(tab = %self.active_tab, converted = self.config.input_converted, "loading content");
        match (self.active_tab, self.config.input_converted) {
            (Tab::Wysiwyg, true) => {
                self.rich.set_html(input);
                self.enable_wysiwyg_tab();
                // The source text area holds nothing converted from it yet.
                self.cache.invalidate_html();
            }
            (Tab::Wysiwyg, false) => {
                self.plain.set_text(input);
                self.convert_to_html(input);
            }
            (Tab::Source, true) => {
                self.rich.set_html(input);
                self.convert_from_html(input);
            }
            (Tab::Source, false) => {
                self.plain.set_text(input);
                self.enable_source_tab();
            }
        }
    }

    /// Pre-selection gate: called before the visible tab changes.
    pub fn before_selection(&mut self, tab: Tab) -> BeforeSelection {
        if tab == self.active_tab {
            return BeforeSelection::Cancel;
        }

        match self.active_tab {
            Tab::Wysiwyg => {
                if !self.rich.is_loading() {
                    // Plug-ins adjust the submitted HTML using the computed
                    // style, which is unavailable once the area is hidden.
                    self.rich.commands_mut().execute(&Command::SUBMIT, None);
                    self.dom_selection.save(&self.rich);
                }
            }
            Tab::Source => {
                if !self.plain.is_loading() {
                    self.source_range = self.plain.selection_range();
                }
            }
        }

        self.listeners.fire(ActionName::showing(tab), Surface::Rich);
        BeforeSelection::Proceed
    }

    /// Called once `tab` became the visible tab.
    pub fn on_selection(&mut self, tab: Tab) {
        tracing::debug!(from = %self.active_tab, to = %tab, "tab selected");
        self.active_tab = tab;
        self.epoch += 1;
        match tab {
            Tab::Wysiwyg => self.switch_to_wysiwyg(),
            Tab::Source => self.switch_to_source(),
        }
    }

    /// Run the gate and, unless it cancels, commit the selection.
    pub fn select_tab(&mut self, tab: Tab) -> BeforeSelection {
        let outcome = self.before_selection(tab);
        if outcome == BeforeSelection::Proceed {
            self.on_selection(tab);
        }
        outcome
    }

    /// Feed back the outcome of a request. Returns false if the request was
    /// superseded (or already completed) and the outcome was dropped.
    pub fn complete(&mut self, completion: Completion) -> bool {
        let ticket = completion.ticket();
        let tracker = match ticket.direction {
            Direction::ToSource => &mut self.to_source,
            Direction::ToHtml => &mut self.to_html,
        };
        if !tracker.finish(ticket) {
            tracing::trace!(?ticket, "dropping result of superseded request");
            return false;
        }

        match completion {
            Completion::ToSource { result, .. } => match result {
                Ok(source) => self.on_switch_to_source_success(source),
                Err(err) => self.on_switch_to_source_failure(err),
            },
            Completion::ToHtml { result, .. } => match result {
                Ok(html) => {
                    self.rich.set_html(&html);
                    self.on_switch_to_wysiwyg_success();
                }
                Err(err) => self.on_switch_to_wysiwyg_failure(err),
            },
            Completion::Reloaded { result, .. } => match result {
                Ok(()) => self.on_switch_to_wysiwyg_success(),
                Err(err) => self.on_switch_to_wysiwyg_failure(err),
            },
        }
        true
    }

    /// Resume the continuations deferred before this call. Returns how many
    /// actually ran; stale ones are skipped.
    pub fn run_deferred(&mut self) -> usize {
        let mut ran = 0;
        for scheduled in self.deferred.take_batch() {
            if self.resume(scheduled) {
                ran += 1;
            }
        }
        ran
    }

    fn resume(&mut self, scheduled: Scheduled) -> bool {
        // The user may have switched again while we yielded.
        if scheduled.epoch != self.epoch || self.active_tab != Tab::Wysiwyg {
            tracing::trace!(?scheduled, "skipping stale continuation");
            return false;
        }
        match scheduled.continuation {
            Deferred::RestoreDomSelection => self.restore_dom_selection(),
            Deferred::EnableWysiwygTab => {
                if self.rich.is_loading() {
                    return false;
                }
                self.enable_wysiwyg_tab();
            }
        }
        true
    }

    /// The value the rich text area would submit right now.
    fn submitted_html(&self) -> String {
        self.rich
            .commands()
            .string_value(&Command::SUBMIT)
            .unwrap_or_default()
    }
}

impl<R, P, S> std::fmt::Debug for TabSwitchCoordinator<R, P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabSwitchCoordinator")
            .field("active_tab", &self.active_tab)
            .field("epoch", &self.epoch)
            .field("cache", &self.cache)
            .field("source_range", &self.source_range)
            .field("to_source", &self.to_source)
            .field("to_html", &self.to_html)
            .field("pending", &self.pending.len())
            .field("deferred", &self.deferred.len())
            .finish()
    }
}
