//! Output formatters for plain text and JSON.

mod json;
mod summary;

pub use self::json::*;
pub use summary::*;
