//! Environment variable abstraction for testability.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env::var`].
//! Tests use [`Env::mock()`] backed by a `HashMap`, so config overrides can
//! be tested without mutating the process environment.

use std::collections::HashMap;
use std::str::FromStr;

/// Environment variable reader.
#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

/// A variable that is set but does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVar {
    pub name: String,
    pub value: String,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up an environment variable by name.
    pub fn var(&self, name: &str) -> Option<String> {
        match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
    }

    /// Look up and parse a variable. `Ok(None)` when unset.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>, InvalidVar> {
        match self.var(name) {
            None => Ok(None),
            Some(value) => value.trim().parse().map(Some).map_err(|_| InvalidVar {
                name: name.to_string(),
                value,
            }),
        }
    }
}
