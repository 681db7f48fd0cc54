//! Typed view over a SciVal Publication Lookup document.

use serde_json::Value;

use crate::client::{DocumentSource, Endpoint, Refresh};
use crate::error::LookupResult;
use crate::formatters;
use crate::json::{Coerced, chained_get, chained_str, coerce_int, link_href};
use crate::models::{Author, Institution, PublicationRecord};

/// A publication as returned by the Publication Lookup endpoint.
///
/// The document is loaded once when the view is built and never changes
/// afterwards; every accessor is a pure read. Absent data is `None`, and
/// list accessors return `None` instead of an empty vector. Text accessors
/// such as [`Self::title`] also return `None` when the value is not a string.
#[derive(Debug, Clone)]
pub struct PublicationLookup {
    identifier: String,
    document: Value,
}

impl PublicationLookup {
    /// Endpoint this view reads from.
    pub const ENDPOINT: Endpoint = Endpoint::PublicationLookup;

    /// Load the publication with the given Scopus ID through `source`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LookupError::Retrieval`] carrying the source's error unchanged.
    pub async fn new<S>(source: &S, identifier: u64, refresh: Refresh) -> LookupResult<Self>
    where
        S: DocumentSource + ?Sized,
    {
        let identifier = identifier.to_string();
        let document = source.fetch_or_load(Self::ENDPOINT, &identifier, refresh).await?;
        Ok(Self { identifier, document })
    }

    /// Build a view over an already parsed document.
    #[must_use]
    pub fn from_document(identifier: u64, document: Value) -> Self {
        Self { identifier: identifier.to_string(), document }
    }

    /// Identifier the view was requested with.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The raw document.
    #[must_use]
    pub const fn document(&self) -> &Value {
        &self.document
    }

    fn field(&self, key: &str) -> Option<&Value> {
        chained_get(&self.document, &["publication", key])
    }

    fn text(&self, key: &str) -> Option<&str> {
        chained_str(&self.document, &["publication", key])
    }

    fn number(&self, key: &str) -> Option<Coerced> {
        self.field(key).map(coerce_int)
    }

    /// ID of the document (same as the EID without "2-s2.0-").
    #[must_use]
    pub fn id(&self) -> Option<Coerced> {
        self.number("id")
    }

    /// Publication title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    /// Digital Object Identifier.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        self.text("doi")
    }

    /// Type of publication, e.g. "Article".
    #[must_use]
    pub fn publication_type(&self) -> Option<&str> {
        self.text("type")
    }

    /// Year of publication.
    #[must_use]
    pub fn publication_year(&self) -> Option<Coerced> {
        self.number("publicationYear")
    }

    /// Count of citations.
    #[must_use]
    pub fn citation_count(&self) -> Option<Coerced> {
        self.number("citationCount")
    }

    /// Title of the source (journal, book series, proceedings).
    #[must_use]
    pub fn source_title(&self) -> Option<&str> {
        self.text("sourceTitle")
    }

    /// SciVal topic ID.
    #[must_use]
    pub fn topic_id(&self) -> Option<Coerced> {
        self.number("topicId")
    }

    /// SciVal topic cluster ID.
    #[must_use]
    pub fn topic_cluster_id(&self) -> Option<Coerced> {
        self.number("topicClusterId")
    }

    /// SciVal URL of the publication.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        link_href(&self.document)
    }

    /// Authors in API order.
    ///
    /// # Errors
    ///
    /// Fails if an entry has no `id`.
    pub fn authors(&self) -> LookupResult<Option<Vec<Author>>> {
        self.records("authors", Author::from_entry)
    }

    /// First listed author.
    pub fn first_author(&self) -> LookupResult<Option<Author>> {
        Ok(self.authors()?.and_then(|authors| authors.into_iter().next()))
    }

    /// Institutions in API order.
    ///
    /// # Errors
    ///
    /// Fails if an entry has no `id`.
    pub fn institutions(&self) -> LookupResult<Option<Vec<Institution>>> {
        self.records("institutions", Institution::from_entry)
    }

    /// Sustainable Development Goal labels.
    ///
    /// Labels that are not strings are kept in their JSON text form.
    #[must_use]
    pub fn sdgs(&self) -> Option<Vec<String>> {
        let labels: Vec<String> = self
            .field("sdg")?
            .as_array()?
            .iter()
            .map(|label| match label {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect();
        non_empty(labels)
    }

    /// Read every field into a [`PublicationRecord`].
    pub fn record(&self) -> LookupResult<PublicationRecord> {
        Ok(PublicationRecord {
            id: self.id(),
            title: self.title().map(str::to_owned),
            doi: self.doi().map(str::to_owned),
            publication_type: self.publication_type().map(str::to_owned),
            publication_year: self.publication_year(),
            citation_count: self.citation_count(),
            source_title: self.source_title().map(str::to_owned),
            topic_id: self.topic_id(),
            topic_cluster_id: self.topic_cluster_id(),
            link: self.link().map(str::to_owned),
            authors: self.authors()?,
            institutions: self.institutions()?,
            sdgs: self.sdgs(),
        })
    }

    /// Multi-line human-readable summary; absent fields read "N/A".
    pub fn summary(&self) -> LookupResult<String> {
        Ok(formatters::format_summary(&self.record()?))
    }

    fn records<T>(
        &self,
        key: &str,
        build: impl Fn(&Value, usize) -> LookupResult<T>,
    ) -> LookupResult<Option<Vec<T>>> {
        let Some(entries) = self.field(key).and_then(Value::as_array) else {
            return Ok(None);
        };
        let records: Vec<T> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| build(entry, index))
            .collect::<LookupResult<_>>()?;
        Ok(non_empty(records))
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::LookupError;

    fn view(document: Value) -> PublicationLookup {
        PublicationLookup::from_document(1, document)
    }

    #[test]
    fn test_empty_document_is_all_absent() {
        let v = view(json!({}));
        assert!(v.id().is_none());
        assert!(v.title().is_none());
        assert!(v.doi().is_none());
        assert!(v.publication_type().is_none());
        assert!(v.publication_year().is_none());
        assert!(v.citation_count().is_none());
        assert!(v.source_title().is_none());
        assert!(v.topic_id().is_none());
        assert!(v.topic_cluster_id().is_none());
        assert!(v.link().is_none());
        assert!(v.authors().unwrap().is_none());
        assert!(v.institutions().unwrap().is_none());
        assert!(v.sdgs().is_none());
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let v = view(json!({"publication": {
            "id": "85036568406",
            "publicationYear": "2017",
            "citationCount": "12",
            "topicId": "1001",
            "topicClusterId": "42"
        }}));
        assert_eq!(v.id(), Some(Coerced::Int(85_036_568_406)));
        assert_eq!(v.publication_year(), Some(Coerced::Int(2017)));
        assert_eq!(v.citation_count(), Some(Coerced::Int(12)));
        assert_eq!(v.topic_id(), Some(Coerced::Int(1001)));
        assert_eq!(v.topic_cluster_id(), Some(Coerced::Int(42)));
    }

    #[test]
    fn test_non_numeric_string_passes_through() {
        let v = view(json!({"publication": {"publicationYear": "in press"}}));
        assert_eq!(v.publication_year(), Some(Coerced::Raw(json!("in press"))));
    }

    #[test]
    fn test_empty_lists_are_absent() {
        let v = view(json!({"publication": {"authors": [], "institutions": [], "sdg": []}}));
        assert!(v.authors().unwrap().is_none());
        assert!(v.institutions().unwrap().is_none());
        assert!(v.sdgs().is_none());
        assert!(v.first_author().unwrap().is_none());
    }

    #[test]
    fn test_non_array_list_field_is_absent() {
        let v = view(json!({"publication": {"authors": {"id": 1}, "sdg": "SDG 3"}}));
        assert!(v.authors().unwrap().is_none());
        assert!(v.sdgs().is_none());
    }

    #[test]
    fn test_author_without_id_fails() {
        let v = view(json!({"publication": {"authors": [{"id": 1}, {"name": "No Id"}]}}));
        let err = v.authors().unwrap_err();
        assert!(matches!(
            err,
            LookupError::MissingRequiredField { record: "Author", index: 1, field: "id" }
        ));
        assert!(v.record().is_err());
        assert!(v.summary().is_err());
    }

    #[test]
    fn test_sdgs_keep_non_string_labels() {
        let v = view(json!({"publication": {"sdg": [3, "SDG 9: Industry"]}}));
        assert_eq!(v.sdgs(), Some(vec!["3".to_string(), "SDG 9: Industry".to_string()]));
    }

    #[test]
    fn test_non_string_text_fields_are_absent() {
        let v = view(json!({"publication": {"title": 42, "doi": ["10.1/x"]}}));
        assert!(v.title().is_none());
        assert!(v.doi().is_none());
    }

    #[test]
    fn test_link_is_top_level() {
        let v = view(json!({
            "link": {"@href": "https://api.elsevier.com/analytics/scival/publication/1"},
            "publication": {"link": {"@href": "wrong"}}
        }));
        assert_eq!(v.link(), Some("https://api.elsevier.com/analytics/scival/publication/1"));
    }

    #[test]
    fn test_identifier_is_stringified() {
        let v = PublicationLookup::from_document(85_036_568_406, json!({}));
        assert_eq!(v.identifier(), "85036568406");
    }
}
