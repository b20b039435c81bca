//! Remote services the session talks to.

use std::collections::BTreeMap;
use std::future::Future;

use quire_editor_core::ConversionError;

/// Converts between HTML and wiki source text.
///
/// Implementations are usually thin handles around an HTTP client and are
/// cloned into every in-flight request.
pub trait ConversionGateway {
    /// Convert HTML produced by the rich text area to source in `syntax`.
    fn to_source(
        &self,
        html: &str,
        syntax: &str,
    ) -> impl Future<Output = Result<String, ConversionError>>;

    /// Render source text in `syntax` to HTML for the rich text area.
    fn to_html(
        &self,
        source: &str,
        syntax: &str,
    ) -> impl Future<Output = Result<String, ConversionError>>;
}

/// Rebuilds the rich text area from a server-rendered template.
///
/// Resolves once the new document is loaded into the rich text area; the
/// content itself never passes through the session.
pub trait Reloader {
    fn reload(
        &self,
        template_url: &str,
        params: &BTreeMap<String, String>,
    ) -> impl Future<Output = Result<(), ConversionError>>;
}

/// Normalizes HTML before it is converted to source.
pub trait HtmlCleaner {
    fn clean(&self, html: &str) -> impl Future<Output = Result<String, ConversionError>>;
}

/// Reloader for sessions without a template URL. Every reload fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReloader;

impl Reloader for NoReloader {
    async fn reload(
        &self,
        template_url: &str,
        _params: &BTreeMap<String, String>,
    ) -> Result<(), ConversionError> {
        Err(ConversionError::reload(format!(
            "no reload service for template {template_url}"
        )))
    }
}

/// Gateway that runs every HTML → source conversion through an
/// [`HtmlCleaner`] first. A cleaner failure fails the conversion.
#[derive(Debug, Clone)]
pub struct CleaningGateway<G, C> {
    inner: G,
    cleaner: C,
}

impl<G, C> CleaningGateway<G, C> {
    pub fn new(inner: G, cleaner: C) -> Self {
        Self { inner, cleaner }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G, C> ConversionGateway for CleaningGateway<G, C>
where
    G: ConversionGateway,
    C: HtmlCleaner,
{
    async fn to_source(&self, html: &str, syntax: &str) -> Result<String, ConversionError> {
        let cleaned = self.cleaner.clean(html).await?;
        self.inner.to_source(&cleaned, syntax).await
    }

    async fn to_html(&self, source: &str, syntax: &str) -> Result<String, ConversionError> {
        self.inner.to_html(source, syntax).await
    }
}
