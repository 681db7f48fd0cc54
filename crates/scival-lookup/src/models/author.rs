//! Author record as listed on a SciVal publication.

use serde::Serialize;
use serde_json::Value;

use crate::error::{LookupError, LookupResult};
use crate::json::{Coerced, coerce_int, link_href};

/// An author of a publication, in the order the API lists them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    /// Scopus author ID.
    pub id: Coerced,

    /// Display name, e.g. "Lin, T.-E.".
    pub name: Option<String>,

    /// SciVal URL for the author.
    pub link: Option<String>,
}

impl Author {
    pub(crate) const RECORD: &'static str = "Author";

    /// Build an author from the `index`-th entry of `publication.authors`.
    ///
    /// The `id` key is required; a missing key (or a non-object entry) means
    /// the upstream schema changed and is reported rather than skipped.
    pub fn from_entry(entry: &Value, index: usize) -> LookupResult<Self> {
        let id = entry
            .get("id")
            .ok_or_else(|| LookupError::missing_field(Self::RECORD, index, "id"))?;

        Ok(Self {
            id: coerce_int(id),
            name: entry.get("name").and_then(Value::as_str).map(str::to_owned),
            link: link_href(entry).map(str::to_owned),
        })
    }

    /// Get the author name, falling back to "Unknown" if not available.
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_entry_full() {
        let entry = json!({
            "id": "7404861905",
            "name": "Lin, T.-E.",
            "link": {"@href": "https://api.elsevier.com/analytics/scival/author/7404861905"}
        });
        let author = Author::from_entry(&entry, 0).unwrap();
        assert_eq!(author.id, Coerced::Int(7_404_861_905));
        assert_eq!(author.name.as_deref(), Some("Lin, T.-E."));
        assert!(author.link.unwrap().ends_with("/author/7404861905"));
    }

    #[test]
    fn test_from_entry_optional_fields_absent() {
        let author = Author::from_entry(&json!({"id": 1}), 0).unwrap();
        assert_eq!(author.id, 1_i64);
        assert!(author.name.is_none());
        assert!(author.link.is_none());
        assert_eq!(author.name_or_default(), "Unknown");
    }

    #[test]
    fn test_from_entry_null_id_is_not_missing() {
        let author = Author::from_entry(&json!({"id": null, "name": "X"}), 0).unwrap();
        assert!(author.id.is_null());
    }

    #[test]
    fn test_from_entry_missing_id() {
        let err = Author::from_entry(&json!({"name": "No Id"}), 3).unwrap_err();
        assert!(matches!(
            err,
            LookupError::MissingRequiredField { record: "Author", index: 3, field: "id" }
        ));
    }

    #[test]
    fn test_from_entry_not_an_object() {
        let err = Author::from_entry(&json!("Lin, T.-E."), 0).unwrap_err();
        assert!(matches!(err, LookupError::MissingRequiredField { field: "id", .. }));
    }
}
