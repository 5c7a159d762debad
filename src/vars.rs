//! Variable substitution scopes for connection configuration values
//!
//! Connection fields such as the root location may contain variable
//! references using the `${VAR_NAME}` syntax. A [`VariableScope`] holds the
//! bindings used to resolve them. A reference to an unbound variable
//! substitutes to the empty string, so an unset variable behaves exactly
//! like a value that was never configured.

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Regex pattern for matching variable references: ${VAR_NAME}
static VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// A substitution scope mapping variable names to values.
///
/// Scopes are cheap to clone and never perform I/O. An empty scope is used
/// deliberately when resolving direct files, so that connection-bound
/// variables cannot trigger recursive connection lookups.
#[derive(Debug, Clone, Default)]
pub struct VariableScope {
    bindings: HashMap<String, String>,
}

impl VariableScope {
    /// Create an empty scope. Every reference substitutes to "".
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope from a snapshot of the process environment.
    pub fn from_env() -> Self {
        Self {
            bindings: env::vars().collect(),
        }
    }

    /// Bind a variable, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.bindings.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Look up a binding.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }

    /// Substitute all `${VAR_NAME}` references in `input`.
    ///
    /// Unbound variables resolve to the empty string. Text that does not
    /// match the reference syntax (`$VAR`, `{VAR}`) passes through unchanged.
    pub fn substitute(&self, input: &str) -> String {
        VAR_PATTERN
            .replace_all(input, |caps: &Captures| {
                self.get(&caps[1]).unwrap_or("").to_string()
            })
            .into_owned()
    }
}

/// Parse a configuration boolean.
///
/// Accepts the spellings commonly found in stored connection settings;
/// anything else is unparseable and yields `None`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Derive a boolean setting that may be stored as a variable.
///
/// If `variable_name` is non-empty and resolves to non-empty text in the
/// scope, that text is parsed (unparseable counts as false). Otherwise the
/// literal `default` is parsed the same way. Never fails.
pub fn bool_of_variable(scope: &VariableScope, variable_name: &str, default: &str) -> bool {
    if !variable_name.is_empty() {
        let value = scope.get(variable_name).unwrap_or("");
        if !value.is_empty() {
            return parse_bool(value).unwrap_or(false);
        }
    }
    parse_bool(default).unwrap_or(false)
}
