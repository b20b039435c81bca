//! Keyboard shortcuts registered by plug-ins.

use std::collections::HashMap;

/// Modifier key state for a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const CTRL_SHIFT: Self = Self {
        ctrl: true,
        shift: true,
        ..Self::NONE
    };
}

/// A key plus modifiers. Letter keys are stored upper case, matching the key
/// codes reported for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShortcutKey {
    pub key: char,
    pub modifiers: Modifiers,
}

impl ShortcutKey {
    pub fn new(key: char, modifiers: Modifiers) -> Self {
        Self {
            key: key.to_ascii_uppercase(),
            modifiers,
        }
    }

    pub fn ctrl_shift(key: char) -> Self {
        Self::new(key, Modifiers::CTRL_SHIFT)
    }
}

impl std::fmt::Display for ShortcutKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Modifiers {
            ctrl,
            alt,
            shift,
            meta,
        } = self.modifiers;
        for (on, name) in [(ctrl, "Ctrl"), (alt, "Alt"), (shift, "Shift"), (meta, "Meta")] {
            if on {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.key)
    }
}

/// Maps shortcuts to the action they trigger.
#[derive(Debug, Clone)]
pub struct ShortcutKeyManager<A> {
    bindings: HashMap<ShortcutKey, A>,
}

impl<A> Default for ShortcutKeyManager<A> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<A: Copy> ShortcutKeyManager<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `action`, returning the action it was bound to before.
    pub fn put(&mut self, key: ShortcutKey, action: A) -> Option<A> {
        self.bindings.insert(key, action)
    }

    pub fn get(&self, key: &ShortcutKey) -> Option<A> {
        self.bindings.get(key).copied()
    }

    pub fn remove(&mut self, key: &ShortcutKey) -> Option<A> {
        self.bindings.remove(key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}
