//! Institution record as listed on a SciVal publication.

use serde::Serialize;
use serde_json::Value;

use crate::error::{LookupError, LookupResult};
use crate::json::{Coerced, coerce_int, link_href};

/// An institution affiliated with a publication, in API order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Institution {
    /// SciVal institution ID.
    pub id: Coerced,

    /// Institution name.
    pub name: Option<String>,

    /// Country name, e.g. "Taiwan".
    pub country: Option<String>,

    /// ISO 3166-1 alpha-3 country code, e.g. "TWN".
    pub country_code: Option<String>,

    /// SciVal URL for the institution.
    pub link: Option<String>,
}

impl Institution {
    pub(crate) const RECORD: &'static str = "Institution";

    /// Build an institution from the `index`-th entry of `publication.institutions`.
    pub fn from_entry(entry: &Value, index: usize) -> LookupResult<Self> {
        let id = entry
            .get("id")
            .ok_or_else(|| LookupError::missing_field(Self::RECORD, index, "id"))?;
        let text = |key: &str| entry.get(key).and_then(Value::as_str).map(str::to_owned);

        Ok(Self {
            id: coerce_int(id),
            name: text("name"),
            country: text("country"),
            country_code: text("countryCode"),
            link: link_href(entry).map(str::to_owned),
        })
    }
}
