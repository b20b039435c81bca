//! Macro menu: insert, edit, refresh, collapse and expand macros.
//!
//! The sub-menu has two layouts. With no macro selected it offers insert,
//! refresh and the "all" variants of collapse/expand; with macros selected it
//! offers edit and collapse/expand of the selection. The layout follows the
//! selection on every refresh.

use quire_editor_core::{Command, CommandManager};
use smol_str::SmolStr;

use crate::shortcut::{ShortcutKey, ShortcutKeyManager};
use crate::updater::{DeferredUpdater, Updatable};

pub const INSERT: Command = Command::new_static("macroinsert");
pub const REFRESH: Command = Command::new_static("refresh");
pub const COLLAPSE: Command = Command::new_static("collapse");
pub const EXPAND: Command = Command::new_static("expand");

/// Feature name under which the macro menu item is contributed.
pub const FEATURE_NAME: &str = "macro";

/// What the macro plug-in exposes to its menu.
pub trait MacroPlugin {
    type Commands: CommandManager;

    fn commands(&self) -> &Self::Commands;

    fn commands_mut(&mut self) -> &mut Self::Commands;

    /// Number of macros in the current selection.
    fn selected_macro_count(&self) -> usize;

    /// Open the insert macro wizard.
    fn insert(&mut self);

    /// Open the edit wizard for the selected macro.
    fn edit(&mut self);

    fn is_attached(&self) -> bool;

    fn is_enabled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroAction {
    Insert,
    Refresh,
    Collapse,
    Expand,
    Edit,
}

/// Menu labels. Shortcut labels are shown next to the item text; an empty
/// label shows nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroStrings {
    pub menu: String,
    pub insert: String,
    pub insert_shortcut: String,
    pub edit: String,
    pub edit_shortcut: String,
    pub refresh: String,
    pub refresh_shortcut: String,
    pub collapse: String,
    pub collapse_shortcut: String,
    pub collapse_all: String,
    pub collapse_all_shortcut: String,
    pub expand: String,
    pub expand_shortcut: String,
    pub expand_all: String,
    pub expand_all_shortcut: String,
}

impl Default for MacroStrings {
    fn default() -> Self {
        Self {
            menu: "Macro".into(),
            insert: "Insert Macro...".into(),
            insert_shortcut: ShortcutKey::ctrl_shift('M').to_string(),
            edit: "Edit Macro Properties...".into(),
            edit_shortcut: String::new(),
            refresh: "Refresh".into(),
            refresh_shortcut: ShortcutKey::ctrl_shift('R').to_string(),
            collapse: "Collapse".into(),
            collapse_shortcut: ShortcutKey::ctrl_shift('C').to_string(),
            collapse_all: "Collapse All".into(),
            collapse_all_shortcut: ShortcutKey::ctrl_shift('C').to_string(),
            expand: "Expand".into(),
            expand_shortcut: ShortcutKey::ctrl_shift('E').to_string(),
            expand_all: "Expand All".into(),
            expand_all_shortcut: ShortcutKey::ctrl_shift('E').to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub action: MacroAction,
    pub label: String,
    pub shortcut_label: String,
    pub enabled: bool,
}

impl MenuItem {
    fn new(action: MacroAction, label: &str, shortcut_label: &str) -> Self {
        Self {
            action,
            label: label.to_string(),
            shortcut_label: shortcut_label.to_string(),
            enabled: true,
        }
    }

    fn relabel(&mut self, label: &str, shortcut_label: &str) {
        label.clone_into(&mut self.label);
        shortcut_label.clone_into(&mut self.shortcut_label);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Item(MacroAction),
    Separator,
}

#[derive(Debug)]
struct MenuState {
    strings: MacroStrings,
    insert: MenuItem,
    edit: MenuItem,
    refresh: MenuItem,
    collapse: MenuItem,
    expand: MenuItem,
    insert_entries: Vec<MenuEntry>,
    edit_entries: Vec<MenuEntry>,
    sub_menu: Vec<MenuEntry>,
    features: Vec<SmolStr>,
}

impl MenuState {
    fn item(&self, action: MacroAction) -> &MenuItem {
        match action {
            MacroAction::Insert => &self.insert,
            MacroAction::Edit => &self.edit,
            MacroAction::Refresh => &self.refresh,
            MacroAction::Collapse => &self.collapse,
            MacroAction::Expand => &self.expand,
        }
    }

    fn refresh<P: MacroPlugin>(&mut self, plugin: &P) {
        let commands = plugin.commands();
        self.collapse.enabled = !commands.is_executed(&COLLAPSE);
        self.expand.enabled = !commands.is_executed(&EXPAND);

        let strings = &self.strings;
        if commands.is_executed(&INSERT) {
            if self.sub_menu.first() != self.edit_entries.first() {
                self.sub_menu.clone_from(&self.edit_entries);
            }
            self.edit.enabled = plugin.selected_macro_count() == 1;
            self.collapse
                .relabel(&strings.collapse, &strings.collapse_shortcut);
            self.expand.relabel(&strings.expand, &strings.expand_shortcut);
        } else {
            if self.sub_menu.first() != self.insert_entries.first() {
                self.sub_menu.clone_from(&self.insert_entries);
            }
            self.insert.enabled = commands.is_enabled(&INSERT);
            self.collapse
                .relabel(&strings.collapse_all, &strings.collapse_all_shortcut);
            self.expand
                .relabel(&strings.expand_all, &strings.expand_all_shortcut);
        }
    }
}

/// Borrows the menu together with the plug-in for one refresh.
struct MenuRefresh<'a, P> {
    menu: &'a mut MenuState,
    plugin: &'a P,
}

impl<P: MacroPlugin> Updatable for MenuRefresh<'_, P> {
    fn update(&mut self) {
        self.menu.refresh(self.plugin);
    }

    fn can_update(&self) -> bool {
        self.plugin.is_attached() && self.plugin.is_enabled()
    }
}

/// The macro entry of the editor menu bar.
#[derive(Debug)]
pub struct MacroMenuExtension {
    menu: MenuState,
    shortcuts: ShortcutKeyManager<MacroAction>,
    updater: DeferredUpdater,
    destroyed: bool,
}

impl MacroMenuExtension {
    pub fn new(strings: MacroStrings) -> Self {
        use MacroAction::*;

        let mut shortcuts = ShortcutKeyManager::new();
        for (key, action) in [('R', Refresh), ('C', Collapse), ('E', Expand), ('M', Insert)] {
            shortcuts.put(ShortcutKey::ctrl_shift(key), action);
        }

        let insert_entries = vec![
            MenuEntry::Item(Insert),
            MenuEntry::Separator,
            MenuEntry::Item(Refresh),
            MenuEntry::Separator,
            MenuEntry::Item(Collapse),
            MenuEntry::Item(Expand),
        ];
        let edit_entries = vec![
            MenuEntry::Item(Edit),
            MenuEntry::Separator,
            MenuEntry::Item(Collapse),
            MenuEntry::Item(Expand),
        ];

        let menu = MenuState {
            insert: MenuItem::new(Insert, &strings.insert, &strings.insert_shortcut),
            edit: MenuItem::new(Edit, &strings.edit, &strings.edit_shortcut),
            refresh: MenuItem::new(Refresh, &strings.refresh, &strings.refresh_shortcut),
            collapse: MenuItem::new(Collapse, &strings.collapse_all, &strings.collapse_all_shortcut),
            expand: MenuItem::new(Expand, &strings.expand_all, &strings.expand_all_shortcut),
            sub_menu: insert_entries.clone(),
            insert_entries,
            edit_entries,
            features: vec![SmolStr::new_static(FEATURE_NAME)],
            strings,
        };

        Self {
            menu,
            shortcuts,
            updater: DeferredUpdater::new(),
            destroyed: false,
        }
    }

    /// Label of the top level menu item.
    pub fn label(&self) -> &str {
        &self.menu.strings.menu
    }

    pub fn item(&self, action: MacroAction) -> &MenuItem {
        self.menu.item(action)
    }

    pub fn sub_menu(&self) -> &[MenuEntry] {
        &self.menu.sub_menu
    }

    /// The visible sub-menu; `None` stands for a separator.
    pub fn sub_menu_items(&self) -> impl Iterator<Item = Option<&MenuItem>> + '_ {
        self.menu.sub_menu.iter().map(|entry| match entry {
            MenuEntry::Item(action) => Some(self.menu.item(*action)),
            MenuEntry::Separator => None,
        })
    }

    /// Features contributed to the menu bar.
    pub fn features(&self) -> &[SmolStr] {
        &self.menu.features
    }

    pub fn shortcuts(&self) -> &ShortcutKeyManager<MacroAction> {
        &self.shortcuts
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Execute `action` against the plug-in. Returns false if nothing ran.
    pub fn run<P: MacroPlugin>(&self, action: MacroAction, plugin: &mut P) -> bool {
        tracing::trace!(?action, "running macro menu action");
        match action {
            MacroAction::Insert => {
                // The same shortcut edits a selected macro elsewhere.
                if plugin.selected_macro_count() > 0 {
                    return false;
                }
                plugin.insert();
                true
            }
            MacroAction::Edit => {
                plugin.edit();
                true
            }
            MacroAction::Refresh => plugin.commands_mut().execute(&REFRESH, None),
            MacroAction::Collapse => plugin.commands_mut().execute(&COLLAPSE, None),
            MacroAction::Expand => plugin.commands_mut().execute(&EXPAND, None),
        }
    }

    /// A sub-menu item was clicked. Disabled items do nothing.
    pub fn activate<P: MacroPlugin>(&self, action: MacroAction, plugin: &mut P) -> bool {
        self.menu.item(action).enabled && self.run(action, plugin)
    }

    /// Run the action bound to `key`, if any. Returns whether one ran.
    pub fn handle_shortcut<P: MacroPlugin>(&self, key: &ShortcutKey, plugin: &mut P) -> bool {
        match self.shortcuts.get(key) {
            Some(action) => self.run(action, plugin),
            None => false,
        }
    }

    /// The top level item was opened; refresh the sub-menu at the end of the
    /// turn.
    pub fn on_menu_item_selected(&mut self) {
        self.updater.defer_update();
    }

    /// Run the refresh requested by [`on_menu_item_selected`], if the text
    /// area is attached and enabled. Returns whether the menu was refreshed.
    ///
    /// [`on_menu_item_selected`]: Self::on_menu_item_selected
    pub fn flush_update<P: MacroPlugin>(&mut self, plugin: &P) -> bool {
        self.updater.flush(&mut MenuRefresh {
            menu: &mut self.menu,
            plugin,
        })
    }

    /// Refresh right away.
    pub fn update<P: MacroPlugin>(&mut self, plugin: &P) {
        self.menu.refresh(plugin);
    }

    pub fn destroy(&mut self) {
        self.menu.insert_entries.clear();
        self.menu.edit_entries.clear();
        self.menu.sub_menu.clear();
        self.menu.features.clear();
        self.shortcuts.clear();
        self.updater.cancel();
        self.destroyed = true;
    }
}

impl Default for MacroMenuExtension {
    fn default() -> Self {
        Self::new(MacroStrings::default())
    }
}
