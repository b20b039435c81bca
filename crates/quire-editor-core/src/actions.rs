//! Action notifications fired around tab switches.
//!
//! Plug-ins observe these to prepare for a surface being hidden or to react
//! once a surface is usable again. Events carry only their name and the
//! surface they originate from.

use crate::types::{Surface, Tab};

/// Names of the tab lifecycle actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionName {
    /// The WYSIWYG tab is about to be shown.
    ShowingWysiwyg,
    /// The source tab is about to be shown.
    ShowingSource,
    /// The WYSIWYG tab is shown and its selection restored.
    ShowWysiwyg,
    /// The source tab is shown and its selection restored.
    ShowSource,
}

impl ActionName {
    /// Action fired before switching to `tab`.
    pub fn showing(tab: Tab) -> Self {
        match tab {
            Tab::Wysiwyg => ActionName::ShowingWysiwyg,
            Tab::Source => ActionName::ShowingSource,
        }
    }

    /// Action fired once `tab` is usable.
    pub fn shown(tab: Tab) -> Self {
        match tab {
            Tab::Wysiwyg => ActionName::ShowWysiwyg,
            Tab::Source => ActionName::ShowSource,
        }
    }

    /// Wire name, as seen by script plug-ins.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionName::ShowingWysiwyg => "showingWysiwyg",
            ActionName::ShowingSource => "showingSource",
            ActionName::ShowWysiwyg => "showWysiwyg",
            ActionName::ShowSource => "showSource",
        }
    }
}

impl std::fmt::Display for ActionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEvent {
    pub name: ActionName,
    pub source: Surface,
}

/// Handle returned by [`ActionListeners::add`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registered action listeners, notified in registration order.
#[derive(Default)]
pub struct ActionListeners {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn FnMut(&ActionEvent)>)>,
}

impl ActionListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: impl FnMut(&ActionEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the listener was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn fire(&mut self, name: ActionName, source: Surface) {
        tracing::trace!(action = name.as_str(), "firing action");
        let event = ActionEvent { name, source };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for ActionListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionListeners")
            .field("len", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(ActionName::showing(Tab::Source).as_str(), "showingSource");
        assert_eq!(ActionName::shown(Tab::Wysiwyg).to_string(), "showWysiwyg");
    }

    #[test]
    fn test_fire_and_remove() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = ActionListeners::new();

        let sink = seen.clone();
        let id = listeners.add(move |event| sink.borrow_mut().push(event.name));
        listeners.fire(ActionName::ShowSource, Surface::Rich);

        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        listeners.fire(ActionName::ShowWysiwyg, Surface::Rich);

        assert_eq!(*seen.borrow(), vec![ActionName::ShowSource]);
        assert!(listeners.is_empty());
    }
}
