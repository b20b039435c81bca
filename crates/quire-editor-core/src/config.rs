//! Editor configuration.
//!
//! The hosting page describes each editor instance with a flat parameter map
//! (or the equivalent JSON object). The parsed [`EditorConfig`] is handed to
//! the coordinator explicitly; nothing reads it from global state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::ConfigError;
use crate::types::Tab;

/// Syntax used when the host does not configure one.
pub const DEFAULT_SYNTAX: &str = "xwiki/2.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Syntax of the source text area, passed to every conversion.
    pub syntax: SmolStr,
    /// When set, the rich text area is rebuilt by reloading this template
    /// instead of calling the HTML converter.
    #[serde(rename = "templateURL")]
    pub template_url: Option<String>,
    /// Whether the editor accepts input at all.
    pub enabled: bool,
    /// Whether the submitted value is HTML that still has to be converted to
    /// source on the server. Kept in sync with the active tab so an editor
    /// restored from the browser cache interprets its input correctly.
    pub input_converted: bool,
    /// Tab shown when the editor is created.
    pub default_editor: Tab,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            syntax: SmolStr::new_static(DEFAULT_SYNTAX),
            template_url: None,
            enabled: true,
            input_converted: false,
            default_editor: Tab::Wysiwyg,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON configuration object. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()
    }

    /// Build a configuration from the host page's string parameters.
    /// Unknown keys are ignored.
    pub fn from_params(params: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = EditorConfig::default();
        for (key, value) in params {
            match key.as_str() {
                "syntax" => config.syntax = SmolStr::new(value.trim()),
                "templateURL" => {
                    config.template_url = Some(value.clone()).filter(|url| !url.is_empty())
                }
                "enabled" => config.enabled = parse_flag(key, value)?,
                "inputConverted" => config.input_converted = parse_flag(key, value)?,
                "defaultEditor" => {
                    config.default_editor = match value.trim() {
                        "wysiwyg" => Tab::Wysiwyg,
                        "source" => Tab::Source,
                        _ => return Err(invalid(key, value)),
                    }
                }
                _ => {}
            }
        }
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.syntax.trim().is_empty() {
            return Err(ConfigError::EmptySyntax);
        }
        Ok(self)
    }

    pub fn has_template(&self) -> bool {
        self.template_url.is_some()
    }

    pub fn set_input_converted(&mut self, converted: bool) {
        self.input_converted = converted;
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: SmolStr::new(key),
        value: value.to_string(),
    }
}
