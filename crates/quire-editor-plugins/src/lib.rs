//! quire-editor-plugins: framework-free logic of the editor plug-ins.
//!
//! - `updater`: coalesced UI refreshes
//! - `shortcut`: keyboard shortcut registry
//! - `macro_menu`: the macro menu and its keyboard shortcuts
//! - `table`: table feature contract and registry
//! - `link_wizard`: wiki page selection step of the link wizard

pub mod error;
pub mod link_wizard;
pub mod macro_menu;
pub mod shortcut;
pub mod table;
pub mod updater;

pub use error::PluginError;
pub use link_wizard::{
    ExplorerSelection, LinkConfig, LinkConfigService, LinkType, LinkWizardData, LinkWizardStep,
    SerializedLink, WikiPageExplorerStep, WikiPageReference,
};
pub use macro_menu::{MacroAction, MacroMenuExtension, MacroPlugin, MacroStrings, MenuEntry, MenuItem};
pub use shortcut::{Modifiers, ShortcutKey, ShortcutKeyManager};
pub use table::{BasicTableFeature, TableFeature, TableFeatureRegistry};
pub use updater::{DeferredUpdater, Updatable};
