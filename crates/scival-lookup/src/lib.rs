//! SciVal Publication Lookup client
//!
//! A read-only client for Elsevier's SciVal Publication Lookup API. Documents
//! are fetched once, cached on disk, and exposed through a typed view.
//!
//! # Features
//!
//! - **Typed accessors**: authors, institutions, topics, SDGs and citation data
//! - **Cached**: in-process and on-disk cache with a per-call [`Refresh`] policy
//! - **Forgiving**: absent fields are `None`, numeric strings become integers
//!
//! # Example
//!
//! ```no_run
//! use scival_lookup::{PublicationLookup, Refresh, ScivalClient, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = ScivalClient::new(config)?;
//!
//!     let publication = PublicationLookup::new(&client, 85036568406, Refresh::Cached).await?;
//!     println!("{}", publication.summary()?);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod json;
pub mod lookup;
pub mod models;

pub use client::{DocumentSource, Endpoint, Refresh, ScivalClient};
pub use config::Config;
pub use error::{ClientError, LookupError};
pub use json::{Coerced, coerce_int};
pub use lookup::PublicationLookup;
