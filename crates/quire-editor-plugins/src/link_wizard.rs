//! Link wizard step selecting the wiki page to link to.

use std::future::Future;

use crate::error::PluginError;

/// A wiki page address. Components are kept as entered; no parsing or
/// escaping happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WikiPageReference {
    pub wiki: String,
    pub space: String,
    pub page: String,
}

impl WikiPageReference {
    pub fn new(
        wiki: impl Into<String>,
        space: impl Into<String>,
        page: impl Into<String>,
    ) -> Self {
        Self {
            wiki: wiki.into(),
            space: space.into(),
            page: page.into(),
        }
    }

    pub fn has_page(&self) -> bool {
        !self.page.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkType {
    #[default]
    WikiPage,
    NewWikiPage,
    Attachment,
    External,
}

/// The link being created or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkConfig {
    pub link_type: LinkType,
    /// Serialized destination reference, once known.
    pub reference: Option<String>,
    pub url: Option<String>,
    pub label: String,
}

/// State shared by the steps of the link wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkWizardData {
    pub config: LinkConfig,
    pub destination: WikiPageReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkWizardStep {
    /// Ask for the name of the page to create.
    WikiPageCreator,
    /// Configure label and tooltip of the link.
    WikiPageConfig,
}

impl std::fmt::Display for LinkWizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LinkWizardStep::WikiPageCreator => "wikipage_creator",
            LinkWizardStep::WikiPageConfig => "wikipage_config",
        })
    }
}

/// What the user picked in the page explorer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorerSelection {
    pub reference: WikiPageReference,
    /// The "new page" tree node was picked (the page name comes later).
    pub new_page_node: bool,
    /// The selected page does not exist yet.
    pub new_page: bool,
}

/// Result of serializing a link destination on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedLink {
    pub reference: String,
    pub url: String,
}

/// Server side link configuration.
pub trait LinkConfigService {
    /// Serialize `destination` relative to the page being edited.
    fn serialize(
        &self,
        destination: &WikiPageReference,
    ) -> impl Future<Output = Result<SerializedLink, PluginError>>;
}

/// Page selection step of the link wizard.
#[derive(Debug, Clone)]
pub struct WikiPageExplorerStep {
    data: LinkWizardData,
    error: Option<String>,
    no_page_selected: String,
}

impl WikiPageExplorerStep {
    pub fn new(data: LinkWizardData) -> Self {
        Self {
            data,
            error: None,
            no_page_selected: "No page was selected".to_string(),
        }
    }

    /// Override the error shown when submitting without a page.
    pub fn with_no_page_selected_message(mut self, message: impl Into<String>) -> Self {
        self.no_page_selected = message.into();
        self
    }

    pub fn data(&self) -> &LinkWizardData {
        &self.data
    }

    pub fn into_data(self) -> LinkWizardData {
        self.data
    }

    /// Error currently displayed by the step.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn next_step(&self) -> LinkWizardStep {
        if self.data.destination.has_page() {
            LinkWizardStep::WikiPageConfig
        } else {
            LinkWizardStep::WikiPageCreator
        }
    }

    /// Validate the selection and update the link. Ok(false) keeps the
    /// wizard on this step.
    pub async fn on_submit(
        &mut self,
        selection: &ExplorerSelection,
        service: &impl LinkConfigService,
    ) -> Result<bool, PluginError> {
        self.error = None;
        let reference = &selection.reference;

        if selection.new_page_node {
            self.data.config.link_type = LinkType::NewWikiPage;
            self.data.destination = reference.clone();
            return Ok(true);
        }

        if !reference.has_page() {
            self.error = Some(self.no_page_selected.clone());
            return Ok(false);
        }

        let already_serialized = self
            .data
            .config
            .reference
            .as_deref()
            .is_some_and(|r| !r.is_empty());
        if already_serialized && self.data.destination == *reference {
            tracing::trace!("link destination unchanged");
            return Ok(true);
        }

        let serialized = service.serialize(reference).await?;
        self.data.destination = reference.clone();
        self.data.config.reference = Some(serialized.reference);
        self.data.config.url = Some(serialized.url);
        self.data.config.link_type = if selection.new_page {
            LinkType::NewWikiPage
        } else {
            LinkType::WikiPage
        };
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct FakeService {
        calls: RefCell<Vec<WikiPageReference>>,
        fail: bool,
    }

    impl LinkConfigService for FakeService {
        async fn serialize(
            &self,
            destination: &WikiPageReference,
        ) -> Result<SerializedLink, PluginError> {
            self.calls.borrow_mut().push(destination.clone());
            if self.fail {
                return Err(PluginError::link_config("service unavailable"));
            }
            let WikiPageReference { wiki, space, page } = destination;
            Ok(SerializedLink {
                reference: format!("{wiki}:{space}.{page}"),
                url: format!("/{wiki}/view/{space}/{page}"),
            })
        }
    }

    fn selection(page: &str) -> ExplorerSelection {
        ExplorerSelection {
            reference: WikiPageReference::new("xwiki", "Main", page),
            ..ExplorerSelection::default()
        }
    }

    #[test]
    fn test_next_step() {
        let mut data = LinkWizardData::default();
        assert_eq!(
            WikiPageExplorerStep::new(data.clone()).next_step(),
            LinkWizardStep::WikiPageCreator
        );

        data.destination = WikiPageReference::new("xwiki", "Main", "WebHome");
        assert_eq!(
            WikiPageExplorerStep::new(data).next_step(),
            LinkWizardStep::WikiPageConfig
        );
    }

    #[tokio::test]
    async fn test_existing_page_is_serialized() {
        let service = FakeService::default();
        let mut step = WikiPageExplorerStep::new(LinkWizardData::default());

        assert_eq!(step.on_submit(&selection("Sandbox"), &service).await, Ok(true));

        let config = &step.data().config;
        assert_eq!(config.link_type, LinkType::WikiPage);
        assert_eq!(config.reference.as_deref(), Some("xwiki:Main.Sandbox"));
        assert_eq!(config.url.as_deref(), Some("/xwiki/view/Main/Sandbox"));
        assert_eq!(step.next_step(), LinkWizardStep::WikiPageConfig);
    }

    #[tokio::test]
    async fn test_new_page_node_skips_service() {
        let service = FakeService::default();
        let mut step = WikiPageExplorerStep::new(LinkWizardData::default());
        let pick = ExplorerSelection {
            new_page_node: true,
            ..selection("")
        };

        assert_eq!(step.on_submit(&pick, &service).await, Ok(true));
        assert_eq!(step.data().config.link_type, LinkType::NewWikiPage);
        assert_eq!(step.next_step(), LinkWizardStep::WikiPageCreator);
        assert!(service.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_missing_page_shows_error() {
        let service = FakeService::default();
        let mut step = WikiPageExplorerStep::new(LinkWizardData::default())
            .with_no_page_selected_message("Pick a page");

        assert_eq!(step.on_submit(&selection(""), &service).await, Ok(false));
        assert_eq!(step.error(), Some("Pick a page"));

        // The error is cleared by the next submit.
        step.on_submit(&selection("Sandbox"), &service).await.unwrap();
        assert_eq!(step.error(), None);
    }

    #[tokio::test]
    async fn test_unchanged_destination_is_not_serialized_again() {
        let service = FakeService::default();
        let mut step = WikiPageExplorerStep::new(LinkWizardData::default());

        step.on_submit(&selection("Sandbox"), &service).await.unwrap();
        step.on_submit(&selection("Sandbox"), &service).await.unwrap();
        assert_eq!(service.calls.borrow().len(), 1);

        let new_page = ExplorerSelection {
            new_page: true,
            ..selection("Drafts")
        };
        step.on_submit(&new_page, &service).await.unwrap();
        assert_eq!(service.calls.borrow().len(), 2);
        assert_eq!(step.data().config.link_type, LinkType::NewWikiPage);
    }

    #[tokio::test]
    async fn test_empty_reference_is_serialized_again() {
        let service = FakeService::default();
        let mut data = LinkWizardData::default();
        data.destination = WikiPageReference::new("xwiki", "Main", "Sandbox");
        data.config.reference = Some(String::new());
        let mut step = WikiPageExplorerStep::new(data);

        assert_eq!(step.on_submit(&selection("Sandbox"), &service).await, Ok(true));
        assert_eq!(service.calls.borrow().len(), 1);
        assert_eq!(
            step.data().config.reference.as_deref(),
            Some("xwiki:Main.Sandbox")
        );
    }

    #[tokio::test]
    async fn test_service_failure_keeps_previous_link() {
        let service = FakeService {
            fail: true,
            ..FakeService::default()
        };
        let mut step = WikiPageExplorerStep::new(LinkWizardData::default());

        let err = step
            .on_submit(&selection("Sandbox"), &service)
            .await
            .unwrap_err();
        assert_eq!(err, PluginError::link_config("service unavailable"));
        assert_eq!(step.data().config.reference, None);
        assert!(!step.data().destination.has_page());
    }
}
