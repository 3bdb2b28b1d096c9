//! The automation host's side of the plugin contract.
//!
//! The adapter never talks to the user directly: status, log lines, variable
//! substitution and the action table all go through a [`Host`].

use std::sync::Mutex;

use crate::actions::ActionDefinition;
use crate::variables::VariableMap;

/// Instance status shown by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum InstanceStatus {
    /// Session open, ready to send.
    Ok,
    /// The SNMP library could not open the session.
    ConnectionFailure,
    /// Configuration incomplete; the reason names the missing field.
    UnknownError,
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::ConnectionFailure => write!(f, "connection_failure"),
            Self::UnknownError => write!(f, "unknown_error"),
        }
    }
}

/// Severity of a line logged through the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Services the automation host provides to a plugin instance.
///
/// Methods take `&self`: a host is shared with in-flight SET futures, so
/// implementations keep any mutable state behind a lock.
pub trait Host: Send + Sync {
    /// Report the instance status, with an optional human-readable reason.
    fn update_status(&self, status: InstanceStatus, reason: Option<&str>);

    /// Write a line to the instance log.
    fn log(&self, level: LogLevel, message: &str);

    /// Substitute `$(...)` variable references in `text`.
    ///
    /// Unresolvable references are returned unchanged.
    fn parse_variables_in_string(&self, text: &str) -> String;

    /// Publish the instance's action table.
    fn set_action_definitions(&self, definitions: Vec<ActionDefinition>);
}

/// Minimal host that reports through `tracing`.
///
/// Used by the `snmp-set-action` CLI and handy for embedding the adapter
/// without a real automation host.
#[derive(Debug, Default)]
pub struct TracingHost {
    variables: VariableMap,
    status: Mutex<Option<(InstanceStatus, Option<String>)>>,
    actions: Mutex<Vec<ActionDefinition>>,
}

impl TracingHost {
    /// Create a host that resolves variables from `variables`.
    pub fn with_variables(variables: VariableMap) -> Self {
        Self {
            variables,
            ..Default::default()
        }
    }

    /// Last status reported by the instance.
    pub fn status(&self) -> Option<(InstanceStatus, Option<String>)> {
        self.status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Names of the registered actions.
    pub fn action_ids(&self) -> Vec<&'static str> {
        self.actions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|def| def.id.as_str())
            .collect()
    }
}

impl Host for TracingHost {
    fn update_status(&self, status: InstanceStatus, reason: Option<&str>) {
        tracing::info!(target: "snmp_set_adapter::host", %status, reason, "instance status");
        *self
            .status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) =
            Some((status, reason.map(str::to_owned)));
    }

    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "snmp_set_adapter::host", "{}", message),
            LogLevel::Info => tracing::info!(target: "snmp_set_adapter::host", "{}", message),
            LogLevel::Warn => tracing::warn!(target: "snmp_set_adapter::host", "{}", message),
            LogLevel::Error => tracing::error!(target: "snmp_set_adapter::host", "{}", message),
        }
    }

    fn parse_variables_in_string(&self, text: &str) -> String {
        self.variables.substitute(text)
    }

    fn set_action_definitions(&self, definitions: Vec<ActionDefinition>) {
        tracing::debug!(target: "snmp_set_adapter::host", { count = definitions.len() }, "action definitions registered");
        *self
            .actions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = definitions;
    }
}
