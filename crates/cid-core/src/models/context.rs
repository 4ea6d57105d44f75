use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A partial assignment of variables to state indices.
///
/// Used both as conditioning evidence for expectation queries and as the trial
/// assignment a candidate decision is evaluated under. Ordered by variable name so
/// that contexts compare, hash, and print deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(BTreeMap<String, usize>);

impl Context {
    /// The empty context.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, variable: impl Into<String>, state: usize) -> Self {
        self.0.insert(variable.into(), state);
        self
    }

    /// Assign `variable`, returning the previous state if any.
    pub fn insert(&mut self, variable: impl Into<String>, state: usize) -> Option<usize> {
        self.0.insert(variable.into(), state)
    }

    pub fn get(&self, variable: &str) -> Option<usize> {
        self.0.get(variable).copied()
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.0.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Assigned variables in name order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for Context {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (variable, state)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{variable}={state}")?;
        }
        f.write_str("}")
    }
}
