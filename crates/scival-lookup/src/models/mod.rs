//! Data models for SciVal Publication Lookup entities.
//!
//! Records are built from the raw JSON document rather than derived with
//! `Deserialize`, so a missing optional key never fails the whole record.

mod author;
mod institution;
mod publication;

pub use author::Author;
pub use institution::Institution;
pub use publication::PublicationRecord;
