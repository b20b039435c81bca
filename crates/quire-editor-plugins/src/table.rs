//! Table editing features (insert table, add or remove rows and columns).
//!
//! Each feature is a named command of the rich text area. The toolbar asks
//! the registry which features are enabled and runs them by name.

use std::collections::BTreeMap;

use quire_editor_core::{Command, CommandManager};
use smol_str::SmolStr;

use crate::error::PluginError;

pub trait TableFeature {
    /// Feature name, e.g. `inserttable` or `insertrowbefore`.
    fn name(&self) -> &str;

    fn command(&self) -> &Command;

    fn is_enabled(&self, commands: &dyn CommandManager) -> bool {
        commands.is_enabled(self.command())
    }

    fn execute(&self, commands: &mut dyn CommandManager, param: Option<&str>) -> bool {
        commands.execute(self.command(), param)
    }

    /// Remove the feature's toolbar button.
    fn destroy(&mut self) {}
}

/// A feature whose name is its command name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicTableFeature {
    command: Command,
}

impl BasicTableFeature {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            command: Command::new(name),
        }
    }
}

impl TableFeature for BasicTableFeature {
    fn name(&self) -> &str {
        self.command.name()
    }

    fn command(&self) -> &Command {
        &self.command
    }
}

/// Names of the features every table plug-in offers.
pub const STANDARD_FEATURES: [&str; 8] = [
    "inserttable",
    "insertrowbefore",
    "insertrowafter",
    "deleterow",
    "insertcolbefore",
    "insertcolafter",
    "deletecol",
    "deletetable",
];

#[derive(Default)]
pub struct TableFeatureRegistry {
    features: BTreeMap<SmolStr, Box<dyn TableFeature>>,
}

impl TableFeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_standard_features() -> Self {
        let mut registry = Self::new();
        for name in STANDARD_FEATURES {
            registry.register(BasicTableFeature::new(name));
        }
        registry
    }

    /// Add a feature, replacing (and destroying) one with the same name.
    pub fn register(&mut self, feature: impl TableFeature + 'static) {
        let name = SmolStr::new(feature.name());
        if let Some(mut previous) = self.features.insert(name, Box::new(feature)) {
            tracing::debug!(name = previous.name(), "replacing table feature");
            previous.destroy();
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn TableFeature> {
        self.features.get(name).map(|feature| &**feature)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.features.keys().map(SmolStr::as_str)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Names of the features that can run right now.
    pub fn enabled(&self, commands: &dyn CommandManager) -> Vec<&str> {
        self.features
            .values()
            .filter(|feature| feature.is_enabled(commands))
            .map(|feature| feature.name())
            .collect()
    }

    pub fn execute(
        &self,
        name: &str,
        commands: &mut dyn CommandManager,
        param: Option<&str>,
    ) -> Result<bool, PluginError> {
        let feature = self
            .features
            .get(name)
            .ok_or_else(|| PluginError::UnknownTableFeature {
                name: SmolStr::new(name),
            })?;
        Ok(feature.execute(commands, param))
    }

    /// Destroy and drop every feature.
    pub fn destroy(&mut self) {
        for (_, mut feature) in std::mem::take(&mut self.features) {
            feature.destroy();
        }
    }
}

impl std::fmt::Debug for TableFeatureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.features.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct TableCommands {
        enabled: HashSet<String>,
        log: Vec<String>,
    }

    impl CommandManager for TableCommands {
        fn execute(&mut self, command: &Command, param: Option<&str>) -> bool {
            self.log.push(format!("{command}:{}", param.unwrap_or("")));
            self.enabled.contains(command.name())
        }

        fn string_value(&self, _command: &Command) -> Option<String> {
            None
        }

        fn is_enabled(&self, command: &Command) -> bool {
            self.enabled.contains(command.name())
        }

        fn is_executed(&self, _command: &Command) -> bool {
            false
        }
    }

    struct TrackedFeature {
        inner: BasicTableFeature,
        destroyed: Rc<Cell<u32>>,
    }

    impl TableFeature for TrackedFeature {
        fn name(&self) -> &str {
            self.inner.name()
        }

        fn command(&self) -> &Command {
            self.inner.command()
        }

        fn destroy(&mut self) {
            self.destroyed.set(self.destroyed.get() + 1);
        }
    }

    #[test]
    fn test_standard_features() {
        let registry = TableFeatureRegistry::with_standard_features();
        assert_eq!(registry.len(), STANDARD_FEATURES.len());
        assert!(registry.get("deletecol").is_some());

        let mut commands = TableCommands::default();
        commands.enabled.insert("inserttable".into());
        assert_eq!(registry.enabled(&commands), vec!["inserttable"]);

        assert_eq!(registry.execute("inserttable", &mut commands, Some("2,3")), Ok(true));
        assert_eq!(registry.execute("deleterow", &mut commands, None), Ok(false));
        assert_eq!(commands.log, vec!["inserttable:2,3", "deleterow:"]);
    }

    #[test]
    fn test_unknown_feature() {
        let registry = TableFeatureRegistry::new();
        let mut commands = TableCommands::default();
        let err = registry.execute("mergecells", &mut commands, None).unwrap_err();
        assert_eq!(err.to_string(), "no table feature named mergecells");
    }

    #[test]
    fn test_replace_and_destroy() {
        let destroyed = Rc::new(Cell::new(0));
        let tracked = |name: &str| TrackedFeature {
            inner: BasicTableFeature::new(name),
            destroyed: destroyed.clone(),
        };

        let mut registry = TableFeatureRegistry::new();
        registry.register(tracked("inserttable"));
        registry.register(tracked("inserttable"));
        assert_eq!(destroyed.get(), 1);
        assert_eq!(registry.len(), 1);

        registry.register(tracked("deletetable"));
        registry.destroy();
        assert_eq!(destroyed.get(), 3);
        assert!(registry.is_empty());
        assert_eq!(registry.names().count(), 0);
    }
}
