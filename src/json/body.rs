use super::parse::{self, ParseFailureCategory};
use crate::core::decode::BodyDecoder;
use crate::core::error::{Error, ErrorKind};
use serde::de::DeserializeOwned;
use std::io::Read;

/// Body decoder that parses JSON into `T` and keeps the result.
///
/// Pass it to `ExpectChain::body` by `&mut` and read the value back once
/// `parse` has returned.
#[derive(Debug)]
pub struct JsonBody<T> {
    value: Option<T>,
    limit: Option<usize>,
}

impl<T> JsonBody<T> {
    pub fn new() -> Self {
        Self {
            value: None,
            limit: None,
        }
    }

    /// Rejects bodies larger than `max_bytes`.
    pub fn with_limit(mut self, max_bytes: usize) -> Self {
        self.limit = Some(max_bytes);
        self
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }

    pub fn into_inner(self) -> Option<T> {
        self.value
    }
}

impl<T> Default for JsonBody<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> BodyDecoder for JsonBody<T> {
    fn decode_body(&mut self, body: &mut dyn Read) -> Result<(), Error> {
        let bytes = read_limited(body, self.limit)?;
        let value = parse::from_slice::<T>(&bytes).map_err(|err| {
            let category = parse::categorize_error(&err);
            let message = parse::describe_error(&err);
            let kind = match category {
                ParseFailureCategory::Io => ErrorKind::Io,
                _ => ErrorKind::InvalidBody,
            };
            Error::new(kind).with_message(message).with_source(err)
        })?;
        self.value = Some(value);
        Ok(())
    }
}

fn read_limited(body: &mut dyn Read, limit: Option<usize>) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    let read = match limit {
        Some(max) => body
            .take((max as u64).saturating_add(1))
            .read_to_end(&mut bytes),
        None => body.read_to_end(&mut bytes),
    };
    read.map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read request body")
            .with_source(err)
    })?;
    if let Some(max) = limit {
        if bytes.len() > max {
            return Err(Error::new(ErrorKind::InvalidBody)
                .with_message(format!("request body exceeds {max} bytes"))
                .with_hint("Send a smaller body or raise the decoder limit."));
        }
    }
    Ok(bytes)
}
