//! quire-editor-session: runs a [`TabSwitchCoordinator`] against real
//! conversion services.
//!
//! The coordinator queues requests; [`EditorSession`] hands them to a
//! [`ConversionGateway`] (or a [`Reloader`] for template-based rebuilds),
//! feeds the results back and resumes deferred work between turns.
//!
//! [`TabSwitchCoordinator`]: quire_editor_core::TabSwitchCoordinator

pub mod gateway;
pub mod session;

pub use gateway::{CleaningGateway, ConversionGateway, HtmlCleaner, NoReloader, Reloader};
pub use session::EditorSession;
