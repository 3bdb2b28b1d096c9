//! Error types for snmp-set-adapter.
//!
//! Three families of failure exist, and none of them is fatal:
//!
//! - [`ConfigErrorKind`]: the configuration lacks a field its version or
//!   security level requires. Reported to the host as a status reason.
//! - [`ConvertError`]: a user-supplied value does not fit the action's type.
//!   Logged, and the request is dropped.
//! - [`Error`]: dispatching the SET failed (no session, bad target OID,
//!   transport or agent error). Logged; the session stays as it was.

use crate::value::ObjectType;

/// Result type alias using the adapter's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration error kinds.
///
/// [`reason`](Self::reason) is the short text shown as the instance status;
/// [`hint`](Self::hint) is the longer log line telling the user what to fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigErrorKind {
    /// No agent address configured.
    MissingAddress,
    /// SNMPv1/v2c without a community string.
    MissingCommunity,
    /// SNMPv3 without an engine ID.
    MissingEngineId,
    /// SNMPv3 without a user name.
    MissingUsername,
    /// authNoPriv/authPriv without an authentication key.
    MissingAuthKey,
    /// authPriv without a privacy key.
    MissingPrivKey,
    /// Authentication protocol name not recognized.
    UnknownAuthProtocol,
    /// Privacy protocol name not recognized.
    UnknownPrivProtocol,
}

impl ConfigErrorKind {
    /// Status reason reported to the host.
    pub fn reason(self) -> &'static str {
        match self {
            Self::MissingAddress => "Missing configuration",
            Self::MissingCommunity => "Missing community",
            Self::MissingEngineId => "Missing Engine ID",
            Self::MissingUsername => "Missing User Name",
            Self::MissingAuthKey => "Missing Auth Key",
            Self::MissingPrivKey => "Missing Priv Key",
            Self::UnknownAuthProtocol => "Unknown Auth Protocol",
            Self::UnknownPrivProtocol => "Unknown Priv Protocol",
        }
    }

    /// Warning logged alongside the status change.
    pub fn hint(self) -> &'static str {
        match self {
            Self::MissingAddress => "Please configure your instance",
            Self::MissingCommunity => "When using SNMP v1 or v2c please specify a community.",
            Self::MissingEngineId => "When using SNMP v3 please specify an Engine ID.",
            Self::MissingUsername => "When using SNMP v3 please specify an User Name.",
            Self::MissingAuthKey => {
                "Please specify an Auth Key when Security level is authNoPriv or authPriv."
            }
            Self::MissingPrivKey => "Please specify a Priv Key when Security level is authPriv.",
            Self::UnknownAuthProtocol => {
                "Auth protocol must be one of md5, sha, sha224, sha256, sha384, sha512."
            }
            Self::UnknownPrivProtocol => {
                "Priv protocol must be one of des, aes, aes256b, aes256r."
            }
        }
    }
}

impl std::fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

/// A user-supplied value that cannot be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// No leading integer in the input.
    #[error("Value \"{input}\" is not an number")]
    NotANumber { input: Box<str> },

    /// Integer parsed but does not fit the target type.
    #[error("Value \"{input}\" is out of range for {ty}")]
    OutOfRange { input: Box<str>, ty: ObjectType },

    /// Not one of true/false/yes/no.
    #[error("Value \"{input}\" is not an boolean")]
    NotABoolean { input: Box<str> },

    /// Type selector names no numeric type.
    #[error("Type \"{input}\" is not a numeric SNMP type")]
    NotNumericType { input: Box<str> },

    /// Not a dotted-quad IPv4 address.
    #[error("Value \"{input}\" is not a valid IP address")]
    InvalidIpAddress { input: Box<str> },

    /// Not a dotted OID.
    #[error("Value \"{input}\" is not a valid OID")]
    InvalidOid { input: Box<str> },
}

impl ConvertError {
    /// Whether the input was rejected by the adapter's own parsing (numbers,
    /// booleans) rather than by the SNMP value format check.
    ///
    /// Adapter-level rejections are logged as warnings, format rejections as
    /// errors.
    pub fn is_input_warning(&self) -> bool {
        matches!(
            self,
            Self::NotANumber { .. }
                | Self::OutOfRange { .. }
                | Self::NotABoolean { .. }
                | Self::NotNumericType { .. }
        )
    }
}

/// Adapter error type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration is missing a required field.
    #[error("configuration error: {kind}")]
    Config { kind: ConfigErrorKind },

    /// A SET was requested while no session is open.
    #[error("no SNMP session; check the instance configuration")]
    NoSession,

    /// The target OID of a SET is malformed.
    #[error("invalid OID \"{input}\": {source}")]
    InvalidOid {
        input: Box<str>,
        #[source]
        source: Box<async_snmp::Error>,
    },

    /// Session creation or the SET request failed inside the SNMP library.
    #[error(transparent)]
    Snmp(#[from] Box<async_snmp::Error>),
}

impl Error {
    /// Create a configuration error.
    pub fn config(kind: ConfigErrorKind) -> Self {
        Self::Config { kind }
    }

    /// Create an invalid OID error with the input string that failed.
    pub fn invalid_oid(input: impl Into<Box<str>>, source: Box<async_snmp::Error>) -> Self {
        Self::InvalidOid {
            input: input.into(),
            source,
        }
    }

    /// Get the configuration error kind, if this is a configuration error.
    pub fn config_kind(&self) -> Option<ConfigErrorKind> {
        match self {
            Self::Config { kind } => Some(*kind),
            _ => None,
        }
    }
}

impl From<ConfigErrorKind> for Error {
    fn from(kind: ConfigErrorKind) -> Self {
        Self::config(kind)
    }
}
