//! JSON output formatting.

use serde_json::{Value, json};

use crate::models::{Author, Institution, PublicationRecord};

/// Create a compact publication representation for JSON output.
///
/// Fields that are absent are left out, and authors/institutions are
/// reduced to their names.
#[must_use]
pub fn compact_publication(record: &PublicationRecord) -> Value {
    let mut obj = json!({});

    if let Some(id) = &record.id {
        obj["id"] = json!(id);
    }

    if let Some(title) = &record.title {
        obj["title"] = json!(title);
    }

    if let Some(citations) = &record.citation_count {
        obj["citations"] = json!(citations);
    }

    if let Some(year) = &record.publication_year {
        obj["year"] = json!(year);
    }

    if let Some(doi) = &record.doi {
        obj["doi"] = json!(doi);
    }

    if let Some(kind) = &record.publication_type {
        obj["type"] = json!(kind);
    }

    if let Some(source) = &record.source_title {
        obj["source"] = json!(source);
    }

    if let Some(authors) = &record.authors {
        obj["authors"] = json!(authors.iter().map(Author::name_or_default).collect::<Vec<_>>());
    }

    if let Some(institutions) = &record.institutions {
        obj["institutions"] =
            json!(institutions.iter().map(compact_institution).collect::<Vec<_>>());
    }

    if let Some(sdgs) = &record.sdgs {
        obj["sdgs"] = json!(sdgs);
    }

    if let Some(link) = &record.link {
        obj["link"] = json!(link);
    }

    obj
}

/// Institution as id, name and country code, omitting what is absent.
#[must_use]
pub fn compact_institution(institution: &Institution) -> Value {
    let mut obj = json!({ "id": institution.id });

    if let Some(name) = &institution.name {
        obj["name"] = json!(name);
    }

    if let Some(code) = &institution.country_code {
        obj["country"] = json!(code);
    }

    obj
}
