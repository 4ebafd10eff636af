//! Purpose: Stock path-variable validators.
//! Exports: `PathVarRules`, `not_empty`, `no_separators`, `parse_u64`.
//! Role: Per-key rule table implementing `PathVarValidator`.
//! Invariants: A key with no registered rule is rejected, never silently accepted.
//! Invariants: Rule errors always carry the offending key.
use crate::core::decode::PathVarValidator;
use crate::core::error::{Error, ErrorKind};
use std::collections::HashMap;
use std::fmt;

type Rule<'a> = Box<dyn FnMut(&str) -> Result<(), Error> + 'a>;

/// Validates path variables by looking up a rule per key.
#[derive(Default)]
pub struct PathVarRules<'a> {
    rules: HashMap<String, Rule<'a>>,
}

impl<'a> PathVarRules<'a> {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Registers `check` for `key`, replacing an earlier rule for the same key.
    pub fn rule<F>(mut self, key: impl Into<String>, check: F) -> Self
    where
        F: FnMut(&str) -> Result<(), Error> + 'a,
    {
        self.rules.insert(key.into(), Box::new(check));
        self
    }

    pub fn has_rule(&self, key: &str) -> bool {
        self.rules.contains_key(key)
    }
}

impl PathVarValidator for PathVarRules<'_> {
    fn validate_path_var(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let Some(check) = self.rules.get_mut(key) else {
            return Err(Error::new(ErrorKind::InvalidPathVar)
                .with_message("unhandled, but expected path variable")
                .with_key(key));
        };
        check(value).map_err(|err| {
            if err.key().is_some() {
                err
            } else {
                err.with_key(key)
            }
        })
    }
}

impl fmt::Debug for PathVarRules<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("PathVarRules").field("keys", &keys).finish()
    }
}

pub fn not_empty(value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::new(ErrorKind::InvalidPathVar).with_message("must not be empty"));
    }
    Ok(())
}

pub fn no_separators(value: &str) -> Result<(), Error> {
    if value.contains('/') || value.contains('\\') {
        return Err(Error::new(ErrorKind::InvalidPathVar)
            .with_message("must not contain path separators"));
    }
    Ok(())
}

pub fn parse_u64(value: &str) -> Result<(), Error> {
    value.parse::<u64>().map(|_| ()).map_err(|err| {
        Error::new(ErrorKind::InvalidPathVar)
            .with_message(format!("expected an unsigned integer, got `{value}`"))
            .with_source(err)
    })
}
