use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[non_exhaustive]
pub enum PluginError {
    #[error("no table feature named {name}")]
    #[diagnostic(
        code(quire::plugins::unknown_table_feature),
        help("register the feature with TableFeatureRegistry::register first")
    )]
    UnknownTableFeature { name: SmolStr },

    /// The link service could not serialize the selected page.
    #[error("link configuration failed: {message}")]
    #[diagnostic(code(quire::plugins::link_config))]
    LinkConfig { message: String },
}

impl PluginError {
    pub fn link_config(message: impl Into<String>) -> Self {
        PluginError::LinkConfig {
            message: message.into(),
        }
    }
}
