//! Runtime variable references in user-supplied text.
//!
//! Action fields may embed `$(label:name)` references. Resolution is the
//! host's job; [`resolve`] only decides whether to ask. [`VariableMap`] is a
//! small in-memory table for hosts without their own variable store.

use std::collections::HashMap;

use crate::host::Host;

/// Marker that opens a variable reference.
pub const VARIABLE_MARKER: &str = "$(";

/// Resolve variable references in `text` through the host.
///
/// Text without a marker is returned as-is without a host round trip.
pub fn resolve<H: Host + ?Sized>(host: &H, text: &str) -> String {
    if text.contains(VARIABLE_MARKER) {
        let resolved = host.parse_variables_in_string(text);
        tracing::trace!(target: "snmp_set_adapter::variables", { input = text, resolved = %resolved }, "resolved variables");
        resolved
    } else {
        text.to_owned()
    }
}

/// In-memory `$(label:name)` substitution table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableMap {
    values: HashMap<String, String>,
}

impl VariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `$(label:name)` to `value`.
    pub fn insert(
        &mut self,
        label: impl AsRef<str>,
        name: impl AsRef<str>,
        value: impl Into<String>,
    ) {
        self.values.insert(
            format!("{}:{}", label.as_ref(), name.as_ref()),
            value.into(),
        );
    }

    /// Parse and insert a `label:name=value` definition.
    pub fn insert_definition(&mut self, definition: &str) -> Result<(), String> {
        let (key, value) = definition
            .split_once('=')
            .ok_or_else(|| format!("variable '{}' must be label:name=value", definition))?;
        let (label, name) = key
            .split_once(':')
            .filter(|(label, name)| !label.is_empty() && !name.is_empty())
            .ok_or_else(|| format!("variable name '{}' must be label:name", key))?;
        self.insert(label, name, value);
        Ok(())
    }

    pub fn get(&self, label: &str, name: &str) -> Option<&str> {
        self.values
            .get(&format!("{}:{}", label, name))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace every known `$(label:name)` in `text`.
    ///
    /// Unknown or unterminated references are copied through unchanged.
    /// Substituted values are not scanned again.
    pub fn substitute(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find(VARIABLE_MARKER) {
            out.push_str(&rest[..start]);
            let after = &rest[start + VARIABLE_MARKER.len()..];

            let Some(end) = after.find(')') else {
                out.push_str(&rest[start..]);
                return out;
            };

            let key = &after[..end];
            match self.values.get(key) {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[start..start + VARIABLE_MARKER.len() + end + 1]),
            }
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        out
    }
}
