use oadoc::document::{self, DocumentFormat};
use oadoc::{DocumentError, Endpoint, EndpointStore};
use tracing::debug;

/// An endpoint document open in the editor.
///
/// The store keeps the last endpoint that parsed, so the preview survives
/// half-typed edits.
#[derive(Debug, Clone)]
pub struct OpenDocument {
    pub text: String,
    pub format: DocumentFormat,
    store: Option<EndpointStore>,
}

impl OpenDocument {
    pub fn new(text: impl Into<String>, format: DocumentFormat) -> Self {
        let mut doc = Self {
            text: String::new(),
            format,
            store: None,
        };
        if let Err(err) = doc.update(text) {
            debug!(error = %err, "opened document has no endpoint yet");
        }
        doc
    }

    /// Replace the text and merge the parsed endpoint into the store.
    pub fn update(&mut self, text: impl Into<String>) -> Result<(), DocumentError> {
        self.text = text.into();
        let endpoint = self.parse()?;
        if let Some(store) = self.store.as_mut() {
            store.replace(endpoint);
        } else {
            self.store = Some(EndpointStore::new(endpoint));
        }
        Ok(())
    }

    /// Parse the current text.
    pub fn parse(&self) -> Result<Endpoint, DocumentError> {
        document::parse(&self.text, self.format)
    }

    /// Store holding the last endpoint that parsed
    pub fn store(&self) -> Option<&EndpointStore> {
        self.store.as_ref()
    }

    /// Annotation of the last endpoint that parsed.
    pub fn last_annotation(&self) -> Option<String> {
        self.store.as_ref().map(EndpointStore::render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_last_good_endpoint() {
        let mut doc = OpenDocument::new(
            r#"{"method": "get", "path": "/users"}"#,
            DocumentFormat::Json,
        );
        assert!(doc.last_annotation().unwrap().contains(r#"path="/users""#));

        assert!(doc.update(r#"{"method": "get", "path": "/us"#).is_err());
        assert!(doc.parse().is_err());
        assert!(doc.last_annotation().unwrap().contains(r#"path="/users""#));

        doc.update(r#"{"method": "put", "path": "/users/1"}"#).unwrap();
        assert!(doc.store().unwrap().allowed().body);
    }

    #[test]
    fn store_appears_once_the_text_parses() {
        let mut doc = OpenDocument::new("{", DocumentFormat::Json);
        assert!(doc.store().is_none());

        doc.update(r#"{"method": "patch", "path": "/a"}"#).unwrap();
        assert_eq!(doc.store().unwrap().endpoint().path, "/a");
    }

    #[test]
    fn broken_first_version_has_no_store() {
        let doc = OpenDocument::new("method: [", DocumentFormat::Yaml);
        assert!(doc.store().is_none());
        assert!(doc.last_annotation().is_none());
    }
}
