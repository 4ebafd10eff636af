//! Purpose: Decode JSON bytes and describe failures by category.
//! Exports: `from_slice`, `ParseFailureCategory`, `categorize_error`, `describe_error`.
//! Role: Parser boundary so callsites share one failure vocabulary.
//! Notes: Error mapping into `Error` is done by callsites so context stays explicit.

use serde::de::DeserializeOwned;
use serde_json::error::Category;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Io => "io",
        }
    }
}

pub(crate) fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(input)
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof => ParseFailureCategory::Eof,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub(crate) fn describe_error(err: &serde_json::Error) -> String {
    let category = categorize_error(err);
    if err.line() == 0 {
        return format!("invalid JSON body ({})", category.label());
    }
    format!(
        "invalid JSON body ({}) at line {} column {}",
        category.label(),
        err.line(),
        err.column()
    )
}
