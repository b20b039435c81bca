//! Drives one coordinator: dispatches its requests and feeds back results.

use futures_util::future::{FutureExt, LocalBoxFuture};
use futures_util::stream::{FuturesUnordered, StreamExt};
use quire_common::perf::TimingGuard;
use quire_editor_core::{
    BeforeSelection, Completion, ConversionRequest, Direction, PendingRequest, PlainSurface,
    ReloadRequest, RichSurface, SelectionPreserver, Tab, TabSwitchCoordinator,
};

use crate::gateway::{ConversionGateway, NoReloader, Reloader};

type InFlight = LocalBoxFuture<'static, Completion>;

/// One editor instance: the coordinator plus the services it needs.
///
/// Everything runs on the current thread. Tab selection is synchronous. The
/// host calls [`end_turn`](Self::end_turn) after each event it handled and
/// awaits [`turn`](Self::turn) (or [`settle`](Self::settle)) from its event
/// loop to apply conversion results.
pub struct EditorSession<R, P, S, G, L = NoReloader> {
    coordinator: TabSwitchCoordinator<R, P, S>,
    gateway: G,
    reloader: L,
    in_flight: FuturesUnordered<InFlight>,
}

impl<R, P, S, G> EditorSession<R, P, S, G, NoReloader>
where
    R: RichSurface,
    P: PlainSurface,
    S: SelectionPreserver<R>,
    G: ConversionGateway + Clone + 'static,
{
    pub fn new(coordinator: TabSwitchCoordinator<R, P, S>, gateway: G) -> Self {
        Self::with_reloader(coordinator, gateway, NoReloader)
    }
}

impl<R, P, S, G, L> EditorSession<R, P, S, G, L>
where
    R: RichSurface,
    P: PlainSurface,
    S: SelectionPreserver<R>,
    G: ConversionGateway + Clone + 'static,
    L: Reloader + Clone + 'static,
{
    /// Requests the coordinator queued before the handover are dispatched
    /// right away.
    pub fn with_reloader(
        coordinator: TabSwitchCoordinator<R, P, S>,
        gateway: G,
        reloader: L,
    ) -> Self {
        let mut session = Self {
            coordinator,
            gateway,
            reloader,
            in_flight: FuturesUnordered::new(),
        };
        session.dispatch();
        session
    }

    pub fn coordinator(&self) -> &TabSwitchCoordinator<R, P, S> {
        &self.coordinator
    }

    /// Requests queued through this handle are dispatched on the next turn.
    pub fn coordinator_mut(&mut self) -> &mut TabSwitchCoordinator<R, P, S> {
        &mut self.coordinator
    }

    pub fn load_content(&mut self, input: &str) {
        self.coordinator.load_content(input);
        self.dispatch();
    }

    pub fn select_tab(&mut self, tab: Tab) -> BeforeSelection {
        let outcome = self.coordinator.select_tab(tab);
        self.dispatch();
        outcome
    }

    /// Number of requests awaiting their result, superseded ones included.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// True when no request is running, queued, or deferred.
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
            && !self.coordinator.has_pending_requests()
            && !self.coordinator.has_deferred()
    }

    /// Finish the current event turn: resume the deferred continuations and
    /// dispatch whatever they queued. Hosts call this once their event
    /// handler returns. Returns false if nothing was deferred.
    pub fn end_turn(&mut self) -> bool {
        self.dispatch();
        if !self.coordinator.has_deferred() {
            return false;
        }
        let ran = self.coordinator.run_deferred();
        tracing::trace!(ran, "resumed deferred continuations");
        self.dispatch();
        true
    }

    /// Run one turn. Deferred continuations run first and never wait on a
    /// running request; only when nothing is deferred does the turn wait for
    /// the next request to finish and apply its result.
    ///
    /// Returns false if there was nothing to do.
    pub async fn turn(&mut self) -> bool {
        if self.end_turn() {
            return true;
        }
        let Some(completion) = self.in_flight.next().await else {
            return false;
        };
        let ticket = completion.ticket();
        if !self.coordinator.complete(completion) {
            tracing::debug!(?ticket, "result arrived for superseded request");
        }
        self.dispatch();
        true
    }

    /// Turn until nothing is running and nothing is deferred.
    pub async fn settle(&mut self) {
        while self.turn().await {}
    }

    fn dispatch(&mut self) {
        for request in self.coordinator.take_requests() {
            let future = match request {
                PendingRequest::Convert(request) => self.convert(request),
                PendingRequest::Reload(request) => self.reload(request),
            };
            self.in_flight.push(future);
        }
    }

    fn convert(&self, request: ConversionRequest) -> InFlight {
        tracing::debug!(
            direction = %request.direction(),
            generation = request.ticket.generation,
            "dispatching conversion"
        );
        let gateway = self.gateway.clone();
        async move {
            let ConversionRequest {
                ticket,
                input,
                syntax,
            } = request;
            match ticket.direction {
                Direction::ToSource => {
                    let _timing = TimingGuard::new("html to source conversion");
                    let result = gateway.to_source(&input, &syntax).await;
                    Completion::ToSource { ticket, result }
                }
                Direction::ToHtml => {
                    let _timing = TimingGuard::new("source to html conversion");
                    let result = gateway.to_html(&input, &syntax).await;
                    Completion::ToHtml { ticket, result }
                }
            }
        }
        .boxed_local()
    }

    fn reload(&self, request: ReloadRequest) -> InFlight {
        tracing::debug!(
            template = %request.template_url,
            generation = request.ticket.generation,
            "dispatching reload"
        );
        let reloader = self.reloader.clone();
        async move {
            let _timing = TimingGuard::new("rich text area reload");
            let result = reloader.reload(&request.template_url, &request.params).await;
            Completion::Reloaded {
                ticket: request.ticket,
                result,
            }
        }
        .boxed_local()
    }
}

impl<R, P, S, G, L> std::fmt::Debug for EditorSession<R, P, S, G, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("coordinator", &self.coordinator)
            .field("in_flight", &self.in_flight.len())
            .finish()
    }
}
