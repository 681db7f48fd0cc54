//! Integration tests against the live SciVal API.
//!
//! These tests need `SCIVAL_API_KEY` (and, off campus, `SCIVAL_INST_TOKEN`).
//! Run with: `cargo test --features integration -- --nocapture`

#![cfg(feature = "integration")]

use scival_lookup::config::Config;
use scival_lookup::{PublicationLookup, Refresh, ScivalClient};

/// Well-known publication used for end-to-end checks.
const PUBLICATION_ID: u64 = 85_036_568_406;

fn create_client(cache_dir: &std::path::Path) -> ScivalClient {
    let mut config = Config::from_env().expect("valid environment");
    config.cache_dir = cache_dir.to_path_buf();
    ScivalClient::new(config).expect("Failed to create client")
}

#[tokio::test]
async fn test_publication_lookup_live() {
    let dir = tempfile::tempdir().unwrap();
    let client = create_client(dir.path());

    let pub1 = PublicationLookup::new(&client, PUBLICATION_ID, Refresh::Always)
        .await
        .expect("Lookup should succeed");

    assert_eq!(pub1.id().unwrap(), 85_036_568_406_i64);
    assert_eq!(pub1.doi(), Some("10.1002/anie.201709271"));
    assert_eq!(pub1.publication_type(), Some("Article"));
    assert_eq!(pub1.publication_year().unwrap(), 2017_i64);
    assert_eq!(pub1.source_title(), Some("Angewandte Chemie - International Edition"));
    assert!(pub1.citation_count().and_then(|c| c.as_i64()).unwrap() > 0);

    let authors = pub1.authors().unwrap().unwrap();
    assert!(authors.len() >= 7);
    assert_eq!(authors[0].id, 7_404_861_905_i64);
    assert_eq!(authors[0].name.as_deref(), Some("Lin, T.-E."));

    let institutions = pub1.institutions().unwrap().unwrap();
    assert!(institutions.len() >= 3);
    assert_eq!(institutions[0].id, 217_002_i64);
    assert_eq!(institutions[0].name.as_deref(), Some("Chang Gung University"));
    assert_eq!(institutions[0].country.as_deref(), Some("Taiwan"));
    assert_eq!(institutions[0].country_code.as_deref(), Some("TWN"));

    let sdgs = pub1.sdgs().unwrap();
    assert!(!sdgs.is_empty());
    assert_eq!(sdgs[0], "SDG 3: Good Health and Well-being");
}

#[tokio::test]
async fn test_second_lookup_uses_cache() {
    let dir = tempfile::tempdir().unwrap();
    let client = create_client(dir.path());

    let fresh = PublicationLookup::new(&client, PUBLICATION_ID, Refresh::Always).await.unwrap();
    let cached = PublicationLookup::new(&client, PUBLICATION_ID, Refresh::Cached).await.unwrap();

    assert_eq!(fresh.document(), cached.document());
    assert!(dir.path().join("PublicationLookup").join(PUBLICATION_ID.to_string()).is_file());
}
