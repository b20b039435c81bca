//! Last-converted values, used to skip conversions of unchanged content.

/// The most recent payload handed to each conversion direction.
///
/// A slot is filled as soon as a conversion starts (so repeated switches do
/// not issue duplicate requests while one is in flight) and cleared when that
/// conversion fails (so the next switch retries).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertedValueCache {
    last_converted_html: Option<String>,
    last_converted_source: Option<String>,
}

impl ConvertedValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `html` is exactly what was last converted to source.
    pub fn html_matches(&self, html: &str) -> bool {
        self.last_converted_html.as_deref() == Some(html)
    }

    /// Whether `source` is exactly what was last converted to HTML.
    pub fn source_matches(&self, source: &str) -> bool {
        self.last_converted_source.as_deref() == Some(source)
    }

    pub fn last_converted_html(&self) -> Option<&str> {
        self.last_converted_html.as_deref()
    }

    pub fn last_converted_source(&self) -> Option<&str> {
        self.last_converted_source.as_deref()
    }

    pub fn set_html(&mut self, html: impl Into<String>) {
        self.last_converted_html = Some(html.into());
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.last_converted_source = Some(source.into());
    }

    pub fn invalidate_html(&mut self) {
        self.last_converted_html = None;
    }

    pub fn invalidate_source(&mut self) {
        self.last_converted_source = None;
    }

    /// Forget both slots, e.g. after the host rebuilt the editor content.
    pub fn clear(&mut self) {
        self.last_converted_html = None;
        self.last_converted_source = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cache_never_matches() {
        let cache = ConvertedValueCache::new();
        // An empty document must still be converted the first time.
        assert!(!cache.html_matches(""));
        assert!(!cache.source_matches(""));
    }

    #[test]
    fn test_slots_are_independent() {
        let mut cache = ConvertedValueCache::new();
        cache.set_html("<p>x</p>");
        cache.set_source("x");

        cache.invalidate_html();
        assert!(!cache.html_matches("<p>x</p>"));
        assert!(cache.source_matches("x"));

        cache.clear();
        assert_eq!(cache, ConvertedValueCache::default());
    }
}
