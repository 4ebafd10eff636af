//! Purpose: JSON body decoding built on serde/serde_json.
//! Exports: `JsonBody`, parse-failure categorization helpers.
//! Role: Stock `BodyDecoder` for the common JSON case.
//! Invariants: Parse failures are categorized before being reported.
//! Invariants: The decoded value stays with the decoder; the chain never sees it.

mod body;
pub(crate) mod parse;

pub use body::JsonBody;
pub use parse::ParseFailureCategory;
