//! Purpose: Stock path-variable decoders.
//! Exports: `PathVars`, `set_path_vars`, `path_vars`, `PathTemplate`.
//! Role: Request-extension carrier for router-extracted vars plus a template matcher.
//! Invariants: Decoding never validates; unmatched requests decode to an empty map.
//! Invariants: Values are raw path segments (no percent-decoding).
use crate::core::decode::{PathVarMap, PathVarsDecoder};
use crate::core::error::{Error, ErrorKind};
use axum::http::Request;
use axum::http::request::Parts;
use std::collections::HashSet;

/// Decoded path variables stored as a request extension.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PathVars(pub PathVarMap);

/// Attaches path variables to `request`, replacing any set earlier.
pub fn set_path_vars<B, I, K, V>(request: &mut Request<B>, vars: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let map = vars
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect();
    request.extensions_mut().insert(PathVars(map));
}

/// Reads the variables stored by [`set_path_vars`]; empty when none were set.
pub fn path_vars(parts: &Parts) -> PathVarMap {
    parts
        .extensions
        .get::<PathVars>()
        .map(|vars| vars.0.clone())
        .unwrap_or_default()
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Segment {
    Literal(String),
    Capture(String),
    Wildcard(String),
}

/// Route template such as `/pools/:pool/messages/{seq}` or `/files/*rest`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathTemplate {
    pattern: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn parse(pattern: &str) -> Result<Self, Error> {
        let mut segments = Vec::new();
        let mut names = HashSet::new();
        let raw: Vec<&str> = split_path(pattern).collect();

        for (index, part) in raw.iter().enumerate() {
            let segment = parse_segment(part);
            match &segment {
                Segment::Literal(_) => {}
                Segment::Capture(name) | Segment::Wildcard(name) => {
                    if name.is_empty() {
                        return Err(template_error(pattern, "capture name must not be empty"));
                    }
                    if !names.insert(name.clone()) {
                        return Err(template_error(
                            pattern,
                            &format!("capture name `{name}` is used twice"),
                        ));
                    }
                }
            }
            if matches!(segment, Segment::Wildcard(_)) && index + 1 != raw.len() {
                return Err(template_error(pattern, "wildcard must be the last segment"));
            }
            segments.push(segment);
        }

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Captures from `path`, or `None` when the path does not fit the template.
    pub fn captures(&self, path: &str) -> Option<PathVarMap> {
        let parts: Vec<&str> = split_path(path).collect();
        let mut vars = PathVarMap::new();

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Wildcard(name) => {
                    let rest = parts.get(index..).unwrap_or_default().join("/");
                    vars.insert(name.clone(), rest);
                    return Some(vars);
                }
                Segment::Literal(literal) => {
                    if parts.get(index) != Some(&literal.as_str()) {
                        return None;
                    }
                }
                Segment::Capture(name) => {
                    let value = parts.get(index)?;
                    vars.insert(name.clone(), (*value).to_string());
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(vars)
    }
}

impl PathVarsDecoder for PathTemplate {
    fn decode_path_vars(&self, parts: &Parts) -> PathVarMap {
        self.captures(parts.uri.path()).unwrap_or_default()
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|part| !part.is_empty())
}

fn parse_segment(part: &str) -> Segment {
    if let Some(name) = part.strip_prefix(':') {
        return Segment::Capture(name.to_string());
    }
    if let Some(name) = part.strip_prefix('*') {
        return Segment::Wildcard(name.to_string());
    }
    if let Some(inner) = part.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
        return match inner.strip_prefix('*') {
            Some(name) => Segment::Wildcard(name.to_string()),
            None => Segment::Capture(inner.to_string()),
        };
    }
    Segment::Literal(part.to_string())
}

fn template_error(pattern: &str, message: &str) -> Error {
    Error::new(ErrorKind::Config)
        .with_message(format!("invalid path template `{pattern}`: {message}"))
        .with_hint("Use `:name`, `{name}` or a trailing `*name` for captures.")
}
