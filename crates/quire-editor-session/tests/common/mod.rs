//! Test doubles shared by the session tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use quire_editor_core::{
    Command, CommandManager, ConversionError, Direction, EditingSurface, EditorConfig,
    PlainSurface, RichSurface, SelectionPreserver, SourceRange, TabSwitchCoordinator,
};
use quire_editor_session::{ConversionGateway, HtmlCleaner, Reloader};
use tokio::sync::oneshot;

/// Rich text area. The document lives behind an `Rc` so a reloader can
/// rebuild it, like a template reload replaces the DOM.
#[derive(Debug, Default)]
pub struct FakeRich {
    pub html: Rc<RefCell<String>>,
    pub submitted: Option<String>,
    pub enabled: bool,
    pub loading: bool,
    pub initialized: u32,
    pub restored: u32,
}

impl CommandManager for FakeRich {
    fn execute(&mut self, command: &Command, param: Option<&str>) -> bool {
        if *command == Command::SUBMIT {
            self.submitted = Some(self.html.borrow().clone());
        } else if *command == Command::ENABLE {
            self.enabled = param == Some("true");
        }
        true
    }

    fn string_value(&self, command: &Command) -> Option<String> {
        (*command == Command::SUBMIT)
            .then(|| self.submitted.clone())
            .flatten()
    }

    fn is_enabled(&self, _command: &Command) -> bool {
        self.enabled
    }

    fn is_executed(&self, _command: &Command) -> bool {
        false
    }
}

impl EditingSurface for FakeRich {
    fn is_loading(&self) -> bool {
        self.loading
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn text(&self) -> String {
        self.html.borrow().clone()
    }

    fn set_text(&mut self, text: &str) {
        *self.html.borrow_mut() = text.to_string();
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn set_focus(&mut self, _focused: bool) -> bool {
        true
    }
}

impl RichSurface for FakeRich {
    type Commands = Self;

    fn commands(&self) -> &Self {
        self
    }

    fn commands_mut(&mut self) -> &mut Self {
        self
    }

    fn set_html(&mut self, html: &str) {
        *self.html.borrow_mut() = html.to_string();
    }

    fn initialize(&mut self) {
        self.initialized += 1;
    }
}

#[derive(Debug, Default)]
pub struct FakePlain {
    pub text: String,
    pub loading: bool,
    pub enabled: bool,
    pub range: SourceRange,
}

impl EditingSurface for FakePlain {
    fn is_loading(&self) -> bool {
        self.loading
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn set_focus(&mut self, _focused: bool) -> bool {
        false
    }
}

impl PlainSurface for FakePlain {
    fn cursor_pos(&self) -> usize {
        self.range.start
    }

    fn selection_length(&self) -> usize {
        self.range.length
    }

    fn set_selection_range(&mut self, range: SourceRange) {
        self.range = range;
    }

    fn submit(&mut self) {}
}

#[derive(Debug, Default)]
pub struct FakeSelection {
    saved: bool,
}

impl SelectionPreserver<FakeRich> for FakeSelection {
    fn save(&mut self, _surface: &FakeRich) {
        self.saved = true;
    }

    fn clear(&mut self) {
        self.saved = false;
    }

    fn has_selection(&self) -> bool {
        self.saved
    }

    fn restore(&mut self, surface: &mut FakeRich) {
        surface.restored += 1;
    }
}

pub type FakeCoordinator = TabSwitchCoordinator<FakeRich, FakePlain, FakeSelection>;

pub fn coordinator(config: EditorConfig, rich: FakeRich, plain: FakePlain) -> FakeCoordinator {
    TabSwitchCoordinator::new(config, rich, plain, FakeSelection::default())
}

type Reply = Result<String, ConversionError>;

#[derive(Default)]
struct GatewayState {
    held: HashMap<String, oneshot::Receiver<Reply>>,
    calls: Vec<(Direction, String)>,
}

/// Gateway answering `src:<input>` / `<p>input</p>` unless the test holds
/// the reply for an input back with [`ScriptedGateway::hold`].
#[derive(Clone, Default)]
pub struct ScriptedGateway {
    state: Rc<RefCell<GatewayState>>,
}

impl ScriptedGateway {
    /// The conversion of `input` waits until the returned sender fires.
    pub fn hold(&self, input: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.state.borrow_mut().held.insert(input.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> Vec<(Direction, String)> {
        self.state.borrow().calls.clone()
    }

    async fn answer(&self, direction: Direction, input: &str) -> Reply {
        let held = {
            let mut state = self.state.borrow_mut();
            state.calls.push((direction, input.to_string()));
            state.held.remove(input)
        };
        match held {
            Some(reply) => reply
                .await
                .unwrap_or_else(|_| Err(ConversionError::failed(direction, "reply dropped"))),
            None => Ok(match direction {
                Direction::ToSource => format!("src:{input}"),
                Direction::ToHtml => format!("<p>{input}</p>"),
            }),
        }
    }
}

impl ConversionGateway for ScriptedGateway {
    async fn to_source(&self, html: &str, _syntax: &str) -> Reply {
        self.answer(Direction::ToSource, html).await
    }

    async fn to_html(&self, source: &str, _syntax: &str) -> Reply {
        self.answer(Direction::ToHtml, source).await
    }
}

/// Renders `<div>{source}</div>` straight into the shared rich document.
#[derive(Clone)]
pub struct TemplateReloader {
    pub document: Rc<RefCell<String>>,
    pub urls: Rc<RefCell<Vec<String>>>,
}

impl Reloader for TemplateReloader {
    async fn reload(
        &self,
        template_url: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<(), ConversionError> {
        self.urls.borrow_mut().push(template_url.to_string());
        let source = params.get("source").cloned().unwrap_or_default();
        *self.document.borrow_mut() = format!("<div>{source}</div>");
        Ok(())
    }
}

#[derive(Clone, Copy)]
pub struct TrimCleaner;

impl HtmlCleaner for TrimCleaner {
    async fn clean(&self, html: &str) -> Result<String, ConversionError> {
        Ok(html.trim().replace("<br>", ""))
    }
}
