//! Process-wide variables and `{{name}}` substitution.

use std::collections::HashMap;

use crate::config::values::split_assignment;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Case-insensitive name to value table with an optional environment fallback.
#[derive(Clone, Debug)]
pub struct VariableStore {
    vars: HashMap<String, String>,
    env_fallback: bool,
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableStore {
    /// Store that falls back to the process environment on a miss.
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
            env_fallback: true,
        }
    }

    /// Store that never consults the environment.
    pub fn isolated() -> Self {
        Self {
            vars: HashMap::new(),
            env_fallback: false,
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        tracing::debug!(name, value = %value, "set variable");
        self.vars.insert(name.to_lowercase(), value);
    }

    pub fn get(&self, name: &str) -> Option<String> {
        if let Some(v) = self.vars.get(&name.to_lowercase()) {
            return Some(v.clone());
        }
        if self.env_fallback && is_env_name(name) {
            return std::env::var(name).ok();
        }
        None
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Substitute every `{{name}}` span in one left-to-right pass.
    ///
    /// Undefined names expand to the name itself. An unterminated `{{` and everything after it
    /// is copied verbatim. Substituted values are never rescanned.
    pub fn expand(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find(OPEN) {
            let after = &rest[start + OPEN.len()..];
            let Some(end) = after.find(CLOSE) else {
                break;
            };
            out.push_str(&rest[..start]);
            let name = &after[..end];
            match self.get(name) {
                Some(value) => out.push_str(&value),
                None => out.push_str(name),
            }
            rest = &after[end + CLOSE.len()..];
        }
        out.push_str(rest);
        out
    }

    /// Apply a `name=value` assignment, expanding the value first when `substitute` is set.
    ///
    /// Returns `false` (and logs) when the text has no `=`.
    pub fn set_assignment(&mut self, text: &str, substitute: bool) -> bool {
        let Some((name, value)) = split_assignment(text) else {
            tracing::warn!(text, "no '=' in variable assignment");
            return false;
        };
        let value = if substitute {
            self.expand(value)
        } else {
            value.to_owned()
        };
        self.set(name, value);
        true
    }
}

fn is_env_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['=', '\0'])
}

#[cfg(test)]
#[path = "../../tests/unit/compose/vars.rs"]
mod tests;
