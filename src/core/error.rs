//! Purpose: Single error model shared by the chain and every stock collaborator.
//! Exports: `Error`, `ErrorKind`, `to_status_code`.
//! Role: Collaborators return this type so `parse` can hand failures back verbatim.
//! Invariants: Kinds are stable; new kinds are additive only.
//! Invariants: Status mapping is pure; responses are built by callers.
use axum::http::StatusCode;
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    MissingPathVar,
    InvalidPathVar,
    InvalidBody,
    Io,
    Config,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    key: Option<String>,
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            key: None,
            hint: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Path-variable key the failure relates to, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {key})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_status_code(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::MissingPathVar => StatusCode::NOT_FOUND,
        ErrorKind::InvalidPathVar | ErrorKind::InvalidBody => StatusCode::BAD_REQUEST,
        ErrorKind::Io | ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
