//! Plain-text publication summary.

use std::fmt::Display;

use crate::models::PublicationRecord;

/// Placeholder for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Render a record as a fixed multi-line block, one `Label: value` per line.
///
/// Lists are comma-joined: author names, institution names, SDG labels.
#[must_use]
pub fn format_summary(record: &PublicationRecord) -> String {
    let lines = [
        ("Publication ID", or_na(record.id.as_ref())),
        ("Title", or_na(record.title.as_ref())),
        ("DOI", or_na(record.doi.as_ref())),
        ("Type", or_na(record.publication_type.as_ref())),
        ("Publication year", or_na(record.publication_year.as_ref())),
        ("Source title", or_na(record.source_title.as_ref())),
        ("Citation count", or_na(record.citation_count.as_ref())),
        ("Topic ID", or_na(record.topic_id.as_ref())),
        ("Topic cluster ID", or_na(record.topic_cluster_id.as_ref())),
        ("Link", or_na(record.link.as_ref())),
        ("Authors", or_na(record.author_names().as_ref())),
        ("Institutions", or_na(record.institution_names().as_ref())),
        ("SDGs", or_na(record.sdgs.as_ref().map(|sdgs| sdgs.join(", ")).as_ref())),
    ];

    lines.iter().map(|(label, value)| format!("{label}: {value}")).collect::<Vec<_>>().join("\n")
}

fn or_na<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
}
