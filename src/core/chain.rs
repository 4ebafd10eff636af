//! Purpose: Declarative request expectations executed by a single terminal `parse`.
//! Exports: `ExpectChain`, `expect`.
//! Role: Sequences caller-supplied decoders/validators; owns no decoding logic itself.
//! Invariants: Path variables are checked before the body, keys in declaration order.
//! Invariants: The first failure is returned as-is; nothing is aggregated.
//! Invariants: Declaring a key without both path-var collaborators is a wiring bug and panics.
use crate::core::decode::{BodyDecoder, PathVarValidator, PathVarsDecoder};
use crate::core::error::{Error, ErrorKind};
use axum::http::Request;
use axum::http::request::Parts;
use bytes::Buf;
use std::fmt;
use std::io::Read;

const MISSING_COLLABORATORS: &str = "you need to set a PathVarsDecoder and a PathVarValidator \
     (see ExpectChain::with_path_vars) to use ExpectChain::path_var";

/// Accumulates the expectations for one request.
///
/// Builder methods consume and return the chain so they compose fluently;
/// the chain should end with [`ExpectChain::parse`]. Collaborators can be
/// handed over owned or by reference (`&decoder`, `&mut validator`), which
/// is how a caller keeps access to whatever a body decoder retained.
///
/// ```
/// use expect_fields::api::{Error, ErrorKind, PathVarValidatorFunc, PathVarsDecoderFunc, expect, path_vars, set_path_vars};
/// use axum::http::Request;
///
/// let mut request = Request::get("/greet").body(bytes::Bytes::new()).unwrap();
/// set_path_vars(&mut request, [("foo", "Hello"), ("bar", "Gorilla!")]);
///
/// let (mut foo, mut bar) = (String::new(), String::new());
/// let validator = PathVarValidatorFunc::new(|key: &str, value: &str| {
///     match key {
///         "foo" => foo = value.to_string(),
///         "bar" => bar = value.to_string(),
///         _ => return Err(Error::new(ErrorKind::InvalidPathVar).with_key(key)),
///     }
///     Ok(())
/// });
///
/// expect()
///     .with_path_vars(PathVarsDecoderFunc::new(path_vars), validator)
///     .path_var("foo")
///     .path_var("bar")
///     .parse(request)
///     .unwrap();
///
/// assert_eq!(format!("{foo} {bar}"), "Hello Gorilla!");
/// ```
#[derive(Default)]
pub struct ExpectChain<'a> {
    path_decoder: Option<Box<dyn PathVarsDecoder + 'a>>,
    path_validator: Option<Box<dyn PathVarValidator + 'a>>,
    body_decoder: Option<Box<dyn BodyDecoder + 'a>>,
    expected: Vec<String>,
}

/// Starts an empty chain.
pub fn expect<'a>() -> ExpectChain<'a> {
    ExpectChain::new()
}

impl<'a> ExpectChain<'a> {
    pub fn new() -> Self {
        Self {
            path_decoder: None,
            path_validator: None,
            body_decoder: None,
            expected: Vec::new(),
        }
    }

    /// Registers how path variables are extracted and judged.
    pub fn with_path_vars<D, V>(mut self, decoder: D, validator: V) -> Self
    where
        D: PathVarsDecoder + 'a,
        V: PathVarValidator + 'a,
    {
        self.path_decoder = Some(Box::new(decoder));
        self.path_validator = Some(Box::new(validator));
        self
    }

    /// Sets the body expectation. A later call replaces an earlier one.
    pub fn body<D>(mut self, decoder: D) -> Self
    where
        D: BodyDecoder + 'a,
    {
        self.body_decoder = Some(Box::new(decoder));
        self
    }

    /// Expects a path variable. Must be used together with `with_path_vars`.
    pub fn path_var(mut self, key: impl Into<String>) -> Self {
        self.expected.push(key.into());
        self
    }

    pub fn path_vars<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.expected.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn expected_path_vars(&self) -> &[String] {
        &self.expected
    }

    /// Reports the wiring problem `parse` would panic on, without panicking.
    pub fn check_wiring(&self) -> Result<(), Error> {
        if !self.expected.is_empty()
            && (self.path_decoder.is_none() || self.path_validator.is_none())
        {
            return Err(Error::new(ErrorKind::Config)
                .with_message(MISSING_COLLABORATORS)
                .with_hint("Call with_path_vars before parse."));
        }
        Ok(())
    }

    /// Ends the chain and verifies every expectation against `request`.
    ///
    /// # Panics
    ///
    /// Panics when a path variable is expected but `with_path_vars` was not
    /// called.
    pub fn parse<B: Buf>(self, request: Request<B>) -> Result<(), Error> {
        let (parts, body) = request.into_parts();
        let mut reader = body.reader();
        self.parse_parts(&parts, &mut reader)
    }

    /// Same as [`ExpectChain::parse`] for a request already split into parts.
    pub fn parse_parts(mut self, parts: &Parts, body: &mut dyn Read) -> Result<(), Error> {
        if let Err(err) = self.check_wiring() {
            panic!("{}", err.message().unwrap_or(MISSING_COLLABORATORS));
        }

        tracing::trace!(expected = self.expected.len(), "checking path vars");
        if let Some(decoder) = self.path_decoder.as_ref() {
            let vars = decoder.decode_path_vars(parts);
            for key in &self.expected {
                let Some(value) = vars.get(key) else {
                    tracing::debug!(key = %key, "expected path var missing");
                    return Err(Error::new(ErrorKind::MissingPathVar)
                        .with_message(format!("expected path var: {key}"))
                        .with_key(key.clone()));
                };
                // check_wiring guarantees the validator once any key is expected
                if let Some(validator) = self.path_validator.as_mut() {
                    if let Err(err) = validator.validate_path_var(key, value) {
                        tracing::debug!(key = %key, error = %err, "path var rejected");
                        return Err(err);
                    }
                }
            }
        }

        if let Some(decoder) = self.body_decoder.as_mut() {
            tracing::trace!("decoding body");
            if let Err(err) = decoder.decode_body(body) {
                tracing::debug!(error = %err, "body rejected");
                return Err(err);
            }
        }

        Ok(())
    }
}

impl fmt::Debug for ExpectChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpectChain")
            .field("path_decoder", &self.path_decoder.is_some())
            .field("path_validator", &self.path_validator.is_some())
            .field("body_decoder", &self.body_decoder.is_some())
            .field("expected", &self.expected)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{ExpectChain, expect};
    use crate::core::decode::{
        BodyDecoderFunc, PathVarMap, PathVarValidatorFunc, PathVarsDecoderFunc,
    };
    use crate::core::error::{Error, ErrorKind};
    use axum::http::Request;
    use axum::http::request::Parts;
    use bytes::Bytes;
    use std::cell::{Cell, RefCell};
    use std::io::Read;

    fn request(body: &'static str) -> Request<Bytes> {
        Request::get("/").body(Bytes::from_static(body.as_bytes())).expect("request")
    }

    fn fixed(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&Parts) -> PathVarMap {
        move |_parts: &Parts| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        }
    }

    fn accept_all(_key: &str, _value: &str) -> Result<(), Error> {
        Ok(())
    }

    #[test]
    fn empty_chain_accepts_anything() {
        expect().parse(request("")).expect("empty");
        expect().parse(request("not json at all")).expect("garbage");
    }

    #[test]
    fn single_path_var_round_trip() {
        let result = expect()
            .with_path_vars(
                PathVarsDecoderFunc::new(fixed(&[("foo", "bar")])),
                PathVarValidatorFunc::new(|key: &str, value: &str| {
                    assert_eq!((key, value), ("foo", "bar"));
                    Ok(())
                }),
            )
            .path_var("foo")
            .parse(request(""));
        result.expect("foo present");
    }

    #[test]
    fn missing_key_stops_before_later_keys() {
        let validated = RefCell::new(Vec::new());
        let err = expect()
            .with_path_vars(
                PathVarsDecoderFunc::new(fixed(&[("a", "1"), ("c", "3")])),
                PathVarValidatorFunc::new(|key: &str, _value: &str| {
                    validated.borrow_mut().push(key.to_string());
                    Ok(())
                }),
            )
            .path_vars(["a", "b", "c"])
            .parse(request(""))
            .expect_err("b missing");

        assert_eq!(err.kind(), ErrorKind::MissingPathVar);
        assert_eq!(err.key(), Some("b"));
        assert_eq!(err.message(), Some("expected path var: b"));
        assert_eq!(validated.into_inner(), vec!["a".to_string()]);
    }

    #[test]
    fn empty_map_reports_first_key() {
        let err = expect()
            .with_path_vars(
                PathVarsDecoderFunc::new(fixed(&[])),
                PathVarValidatorFunc::new(accept_all),
            )
            .path_var("foo")
            .parse(request(""))
            .expect_err("foo missing");
        assert_eq!(err.kind(), ErrorKind::MissingPathVar);
        assert_eq!(err.key(), Some("foo"));
    }

    #[test]
    fn validator_error_is_returned_verbatim() {
        let err = expect()
            .with_path_vars(
                PathVarsDecoderFunc::new(fixed(&[("seq", "abc")])),
                PathVarValidatorFunc::new(|key: &str, _value: &str| {
                    Err(Error::new(ErrorKind::InvalidPathVar)
                        .with_message("seq must be numeric")
                        .with_key(key))
                }),
            )
            .path_var("seq")
            .parse(request(""))
            .expect_err("rejected");
        assert_eq!(err.kind(), ErrorKind::InvalidPathVar);
        assert_eq!(err.message(), Some("seq must be numeric"));
        assert_eq!(err.key(), Some("seq"));
    }

    #[test]
    fn duplicate_keys_are_each_validated() {
        let calls = Cell::new(0);
        expect()
            .with_path_vars(
                PathVarsDecoderFunc::new(fixed(&[("id", "7")])),
                PathVarValidatorFunc::new(|_key: &str, _value: &str| {
                    calls.set(calls.get() + 1);
                    Ok(())
                }),
            )
            .path_var("id")
            .path_var("id")
            .parse(request(""))
            .expect("valid");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn path_failure_skips_body() {
        let body_calls = Cell::new(0);
        let err = expect()
            .with_path_vars(
                PathVarsDecoderFunc::new(fixed(&[])),
                PathVarValidatorFunc::new(accept_all),
            )
            .path_var("pool")
            .body(BodyDecoderFunc::new(|_body: &mut dyn Read| {
                body_calls.set(body_calls.get() + 1);
                Ok(())
            }))
            .parse(request("{}"))
            .expect_err("pool missing");
        assert_eq!(err.kind(), ErrorKind::MissingPathVar);
        assert_eq!(body_calls.get(), 0);
    }

    #[test]
    fn body_error_is_returned_and_decoder_runs_once() {
        let body_calls = Cell::new(0);
        let err = expect()
            .body(BodyDecoderFunc::new(|body: &mut dyn Read| {
                body_calls.set(body_calls.get() + 1);
                let mut text = String::new();
                body.read_to_string(&mut text)
                    .map_err(|err| Error::new(ErrorKind::Io).with_source(err))?;
                Err(Error::new(ErrorKind::InvalidBody).with_message(format!("unexpected: {text}")))
            }))
            .parse(request("[1,2]"))
            .expect_err("rejected");
        assert_eq!(err.kind(), ErrorKind::InvalidBody);
        assert_eq!(err.message(), Some("unexpected: [1,2]"));
        assert_eq!(body_calls.get(), 1);
    }

    #[test]
    fn last_body_decoder_wins() {
        let first = Cell::new(false);
        let second = Cell::new(false);
        expect()
            .body(BodyDecoderFunc::new(|_body: &mut dyn Read| {
                first.set(true);
                Ok(())
            }))
            .body(BodyDecoderFunc::new(|_body: &mut dyn Read| {
                second.set(true);
                Ok(())
            }))
            .parse(request("x"))
            .expect("valid");
        assert!(!first.get());
        assert!(second.get());
    }

    #[test]
    fn decoder_runs_once_even_without_keys() {
        let decodes = Cell::new(0);
        expect()
            .with_path_vars(
                PathVarsDecoderFunc::new(|_parts: &Parts| {
                    decodes.set(decodes.get() + 1);
                    PathVarMap::new()
                }),
                PathVarValidatorFunc::new(accept_all),
            )
            .parse(request(""))
            .expect("no keys");
        assert_eq!(decodes.get(), 1);
    }

    #[test]
    #[should_panic(expected = "see ExpectChain::with_path_vars")]
    fn path_var_without_collaborators_panics() {
        let _ = expect().path_var("foo").parse(request(""));
    }

    #[test]
    fn check_wiring_matches_panic_boundary() {
        assert!(expect().check_wiring().is_ok());
        assert!(expect().body(BodyDecoderFunc::new(|_b: &mut dyn Read| Ok(()))).check_wiring().is_ok());
        let wired = expect().with_path_vars(
            PathVarsDecoderFunc::new(fixed(&[])),
            PathVarValidatorFunc::new(accept_all),
        );
        assert!(wired.path_var("foo").check_wiring().is_ok());

        let err = ExpectChain::new()
            .path_var("foo")
            .check_wiring()
            .expect_err("unwired");
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn borrowed_collaborators_are_usable_after_parse() {
        let decoder = PathVarsDecoderFunc::new(fixed(&[("name", "demo")]));
        let mut seen = Vec::new();
        {
            let mut validator = PathVarValidatorFunc::new(|_key: &str, value: &str| {
                seen.push(value.to_string());
                Ok(())
            });
            for _ in 0..2 {
                expect()
                    .with_path_vars(&decoder, &mut validator)
                    .path_var("name")
                    .parse(request(""))
                    .expect("valid");
            }
        }
        assert_eq!(seen, vec!["demo".to_string(), "demo".to_string()]);
        assert_eq!(
            expect().path_var("a").path_vars(["b"]).expected_path_vars(),
            ["a".to_string(), "b".to_string()]
        );
    }
}
