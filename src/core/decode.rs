//! Purpose: Collaborator contracts consumed by `ExpectChain`.
//! Exports: `PathVarsDecoder`, `PathVarValidator`, `BodyDecoder`, the `*Func` adapters, `PathVarMap`.
//! Role: Seam between the chain and caller-supplied extraction/validation logic.
//! Invariants: Path-variable decoders only extract; judging values is the validator's job.
//! Invariants: Body decoders own whatever they decode; the chain never reads it back.
use crate::core::error::Error;
use axum::http::request::Parts;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;

pub type PathVarMap = HashMap<String, String>;

/// Extracts path variables from a request without validating them.
pub trait PathVarsDecoder {
    fn decode_path_vars(&self, parts: &Parts) -> PathVarMap;
}

/// Judges a single decoded path variable.
///
/// Takes `&mut self` so a validator may record the values it accepts.
pub trait PathVarValidator {
    fn validate_path_var(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// Decodes a request body into whatever shape the implementation expects.
///
/// Implementations keep the decoded value themselves; return an error when
/// the body differs from what is expected.
pub trait BodyDecoder {
    fn decode_body(&mut self, body: &mut dyn Read) -> Result<(), Error>;
}

impl<T: PathVarsDecoder + ?Sized> PathVarsDecoder for &T {
    fn decode_path_vars(&self, parts: &Parts) -> PathVarMap {
        (**self).decode_path_vars(parts)
    }
}

impl<T: PathVarsDecoder + ?Sized> PathVarsDecoder for Box<T> {
    fn decode_path_vars(&self, parts: &Parts) -> PathVarMap {
        (**self).decode_path_vars(parts)
    }
}

impl<T: PathVarValidator + ?Sized> PathVarValidator for &mut T {
    fn validate_path_var(&mut self, key: &str, value: &str) -> Result<(), Error> {
        (**self).validate_path_var(key, value)
    }
}

impl<T: PathVarValidator + ?Sized> PathVarValidator for Box<T> {
    fn validate_path_var(&mut self, key: &str, value: &str) -> Result<(), Error> {
        (**self).validate_path_var(key, value)
    }
}

impl<T: BodyDecoder + ?Sized> BodyDecoder for &mut T {
    fn decode_body(&mut self, body: &mut dyn Read) -> Result<(), Error> {
        (**self).decode_body(body)
    }
}

impl<T: BodyDecoder + ?Sized> BodyDecoder for Box<T> {
    fn decode_body(&mut self, body: &mut dyn Read) -> Result<(), Error> {
        (**self).decode_body(body)
    }
}

/// Lets a plain function act as a [`PathVarsDecoder`].
#[derive(Clone, Copy)]
pub struct PathVarsDecoderFunc<F>(pub F);

impl<F> PathVarsDecoderFunc<F>
where
    F: Fn(&Parts) -> PathVarMap,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> PathVarsDecoder for PathVarsDecoderFunc<F>
where
    F: Fn(&Parts) -> PathVarMap,
{
    fn decode_path_vars(&self, parts: &Parts) -> PathVarMap {
        (self.0)(parts)
    }
}

impl<F> fmt::Debug for PathVarsDecoderFunc<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PathVarsDecoderFunc")
    }
}

/// Lets a plain function or closure act as a [`PathVarValidator`].
#[derive(Clone, Copy)]
pub struct PathVarValidatorFunc<F>(pub F);

impl<F> PathVarValidatorFunc<F>
where
    F: FnMut(&str, &str) -> Result<(), Error>,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> PathVarValidator for PathVarValidatorFunc<F>
where
    F: FnMut(&str, &str) -> Result<(), Error>,
{
    fn validate_path_var(&mut self, key: &str, value: &str) -> Result<(), Error> {
        (self.0)(key, value)
    }
}

impl<F> fmt::Debug for PathVarValidatorFunc<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PathVarValidatorFunc")
    }
}

/// Lets a plain function or closure act as a [`BodyDecoder`].
#[derive(Clone, Copy)]
pub struct BodyDecoderFunc<F>(pub F);

impl<F> BodyDecoderFunc<F>
where
    F: FnMut(&mut dyn Read) -> Result<(), Error>,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> BodyDecoder for BodyDecoderFunc<F>
where
    F: FnMut(&mut dyn Read) -> Result<(), Error>,
{
    fn decode_body(&mut self, body: &mut dyn Read) -> Result<(), Error> {
        (self.0)(body)
    }
}

impl<F> fmt::Debug for BodyDecoderFunc<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BodyDecoderFunc")
    }
}
