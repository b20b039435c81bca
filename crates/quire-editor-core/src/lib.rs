//! quire-editor-core: WYSIWYG ↔ source tab switching without framework dependencies.
//!
//! This crate provides:
//! - Surface proxy traits (`RichSurface`, `PlainSurface`, `SelectionPreserver`)
//!   implemented by the hosting UI layer
//! - `EditorConfig` - explicit editor configuration
//! - `TabSwitchCoordinator` - the state machine driving conversions between
//!   the rich text area and the source text area
//! - Request tracking with generation tokens, so superseded conversion results
//!   are dropped instead of applied
//!
//! The coordinator never awaits. It queues `PendingRequest`s which a driver
//! (see `quire-editor-session`) executes and reports back as `Completion`s.

pub mod actions;
pub mod cache;
pub mod command;
pub mod config;
pub mod coordinator;
pub mod deferred;
pub mod error;
pub mod platform;
pub mod request;
pub mod types;

pub use actions::{ActionEvent, ActionListeners, ActionName, ListenerId};
pub use cache::ConvertedValueCache;
pub use command::{Command, CommandManager};
pub use config::EditorConfig;
pub use coordinator::TabSwitchCoordinator;
pub use deferred::{Deferred, DeferredQueue};
pub use error::{ConfigError, ConversionError};
pub use platform::{EditingSurface, PlainSurface, RichSurface, SelectionPreserver};
pub use request::{
    Completion, ConversionRequest, PendingRequest, ReloadRequest, RequestTracker, Ticket,
};
pub use smol_str::SmolStr;
pub use types::{BeforeSelection, Direction, SourceRange, Surface, Tab};
