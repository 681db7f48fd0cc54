//! Materialized publication record.

use serde::Serialize;

use super::{Author, Institution};
use crate::formatters::NOT_AVAILABLE;
use crate::json::Coerced;

/// Every field of a Publication Lookup document, read once.
///
/// Fields mirror the view accessors: `None` means the document had no data
/// for it, and list fields are `None` rather than empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PublicationRecord {
    /// Scopus document ID (the EID without "2-s2.0-").
    pub id: Option<Coerced>,

    /// Publication title.
    pub title: Option<String>,

    /// Digital Object Identifier.
    pub doi: Option<String>,

    /// Publication type, e.g. "Article".
    #[serde(rename = "type")]
    pub publication_type: Option<String>,

    /// Year of publication.
    pub publication_year: Option<Coerced>,

    /// Citation count.
    pub citation_count: Option<Coerced>,

    /// Journal, book or conference title.
    pub source_title: Option<String>,

    /// SciVal topic ID.
    pub topic_id: Option<Coerced>,

    /// SciVal topic cluster ID.
    pub topic_cluster_id: Option<Coerced>,

    /// SciVal URL for the publication.
    pub link: Option<String>,

    /// Authors in API order.
    pub authors: Option<Vec<Author>>,

    /// Institutions in API order.
    pub institutions: Option<Vec<Institution>>,

    /// Sustainable Development Goal labels.
    pub sdgs: Option<Vec<String>>,
}

impl PublicationRecord {
    /// Get the first author if any.
    #[must_use]
    pub fn first_author(&self) -> Option<&Author> {
        self.authors.as_deref()?.first()
    }

    /// Get author names as a comma-separated string (`None` when there are no authors).
    ///
    /// Unnamed authors keep their slot as "N/A".
    #[must_use]
    pub fn author_names(&self) -> Option<String> {
        let authors = self.authors.as_deref()?;
        Some(join_names(authors.iter().map(|a| a.name.as_deref())))
    }

    /// Get institution names as a comma-separated string.
    #[must_use]
    pub fn institution_names(&self) -> Option<String> {
        let institutions = self.institutions.as_deref()?;
        Some(join_names(institutions.iter().map(|i| i.name.as_deref())))
    }
}

fn join_names<'a>(names: impl Iterator<Item = Option<&'a str>>) -> String {
    names.map(|name| name.unwrap_or(NOT_AVAILABLE)).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: i64, name: Option<&str>) -> Author {
        Author { id: Coerced::Int(id), name: name.map(str::to_owned), link: None }
    }

    fn institution(id: i64, name: Option<&str>) -> Institution {
        Institution {
            id: Coerced::Int(id),
            name: name.map(str::to_owned),
            country: None,
            country_code: None,
            link: None,
        }
    }

    #[test]
    fn test_empty_record_defaults() {
        let record = PublicationRecord::default();
        assert!(record.first_author().is_none());
        assert!(record.author_names().is_none());
        assert!(record.institution_names().is_none());
    }

    #[test]
    fn test_author_names_keep_unnamed_slots() {
        let record = PublicationRecord {
            authors: Some(vec![author(1, Some("Alice")), author(2, None), author(3, Some("Bob"))]),
            ..Default::default()
        };
        assert_eq!(record.author_names().as_deref(), Some("Alice, N/A, Bob"));
        assert_eq!(record.first_author().map(|a| a.id.clone()), Some(Coerced::Int(1)));
    }

    #[test]
    fn test_institution_names_keep_unnamed_slots() {
        let record = PublicationRecord {
            institutions: Some(vec![institution(1, None), institution(2, Some("Somewhere"))]),
            ..Default::default()
        };
        assert_eq!(record.institution_names().as_deref(), Some("N/A, Somewhere"));
    }
}
