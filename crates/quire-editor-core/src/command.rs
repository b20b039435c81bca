//! Named commands understood by the rich text area's command manager.

use smol_str::SmolStr;

/// A named command executed through a [`CommandManager`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Command(SmolStr);

impl Command {
    /// Stores the current value of the text area as its submit value.
    /// `string_value(SUBMIT)` returns the last stored value.
    pub const SUBMIT: Command = Command::new_static("submit");

    /// Enables or disables the text area. Takes a boolean parameter.
    pub const ENABLE: Command = Command::new_static("enable");

    /// Discards interim editing state (undo history, pending formatting).
    pub const RESET: Command = Command::new_static("reset");

    /// Create a command from a short (inline-able) name.
    pub const fn new_static(name: &'static str) -> Self {
        Command(SmolStr::new_inline(name))
    }

    pub fn new(name: impl Into<SmolStr>) -> Self {
        Command(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Command execution facade of an editing surface.
///
/// Parameters are passed as strings, mirroring how plug-ins register
/// commands; boolean parameters use `"true"`/`"false"`.
pub trait CommandManager {
    /// Execute a command. Returns true if it was handled.
    fn execute(&mut self, command: &Command, param: Option<&str>) -> bool;

    /// Get the string value associated with a command, if any.
    fn string_value(&self, command: &Command) -> Option<String>;

    /// Check if a command can be executed right now.
    fn is_enabled(&self, command: &Command) -> bool;

    /// Check if a command's effect is in place (e.g. a toggled state).
    fn is_executed(&self, command: &Command) -> bool;

    /// Execute a command taking a boolean parameter.
    fn execute_flag(&mut self, command: &Command, flag: bool) -> bool {
        self.execute(command, Some(if flag { "true" } else { "false" }))
    }
}
