//! Instance configuration and its validation into session parameters.
//!
//! [`Config`] mirrors the fields the host's configuration form produces, with
//! the host's field names on the wire. [`Config::session_params`] applies the
//! per-version requirements and yields the library-ready [`SessionParams`].

use async_snmp::{Auth, AuthProtocol, PrivProtocol};
use serde::{Deserialize, Serialize};

use crate::error::ConfigErrorKind;

/// Default SNMP agent port.
pub const DEFAULT_PORT: u16 = 161;

/// SNMP protocol version selected in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SnmpVersion {
    #[default]
    #[serde(rename = "v1")]
    V1,
    #[serde(rename = "v2c")]
    V2c,
    #[serde(rename = "v3")]
    V3,
}

impl std::fmt::Display for SnmpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnmpVersion::V1 => write!(f, "SNMPv1"),
            SnmpVersion::V2c => write!(f, "SNMPv2c"),
            SnmpVersion::V3 => write!(f, "SNMPv3"),
        }
    }
}

/// SNMPv3 security level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecurityLevel {
    #[default]
    NoAuthNoPriv,
    AuthNoPriv,
    AuthPriv,
}

impl SecurityLevel {
    /// Whether this level authenticates requests.
    pub fn requires_auth(self) -> bool {
        !matches!(self, SecurityLevel::NoAuthNoPriv)
    }

    /// Whether this level encrypts requests.
    pub fn requires_privacy(self) -> bool {
        matches!(self, SecurityLevel::AuthPriv)
    }
}

/// Instance configuration as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Agent host name or address.
    pub ip: String,
    pub port: u16,
    pub version: SnmpVersion,
    /// Community string (v1/v2c).
    pub community: String,
    /// Engine ID (v3).
    #[serde(rename = "engineID")]
    pub engine_id: String,
    /// User name (v3).
    pub username: String,
    pub security_level: SecurityLevel,
    /// Authentication protocol name: md5, sha, sha224, sha256, sha384, sha512.
    pub auth_protocol: String,
    pub auth_key: String,
    /// Privacy protocol name: des, aes, aes256b, aes256r.
    pub priv_protocol: String,
    pub priv_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ip: String::new(),
            port: DEFAULT_PORT,
            version: SnmpVersion::V1,
            community: "private".into(),
            engine_id: "0000000000".into(),
            username: String::new(),
            security_level: SecurityLevel::NoAuthNoPriv,
            auth_protocol: "md5".into(),
            auth_key: String::new(),
            priv_protocol: "des".into(),
            priv_key: String::new(),
        }
    }
}

/// Validated parameters for opening one SNMP session.
#[derive(Debug, Clone)]
pub struct SessionParams {
    /// `host:port` target, with IPv6 literals bracketed.
    pub target: String,
    pub version: SnmpVersion,
    pub auth: Auth,
    /// Engine ID from the configuration (v3 only).
    pub engine_id: Option<String>,
}

impl Config {
    /// `host:port` form of the configured agent address.
    pub fn target(&self) -> String {
        let host = self.ip.trim();
        if host.contains(':') && !host.starts_with('[') {
            format!("[{}]:{}", host, self.port)
        } else {
            format!("{}:{}", host, self.port)
        }
    }

    /// Check the fields the selected version and security level require and
    /// assemble the session parameters.
    ///
    /// Checks run in a fixed order (address, then community or engine ID,
    /// user name, auth key, priv key) and the first missing field wins.
    pub fn session_params(&self) -> Result<SessionParams, ConfigErrorKind> {
        if self.ip.trim().is_empty() {
            return Err(ConfigErrorKind::MissingAddress);
        }

        match self.version {
            SnmpVersion::V1 | SnmpVersion::V2c => {
                if self.community.is_empty() {
                    return Err(ConfigErrorKind::MissingCommunity);
                }
                let auth = if self.version == SnmpVersion::V1 {
                    Auth::v1(self.community.clone())
                } else {
                    Auth::v2c(self.community.clone())
                };
                Ok(SessionParams {
                    target: self.target(),
                    version: self.version,
                    auth,
                    engine_id: None,
                })
            }
            SnmpVersion::V3 => {
                if self.engine_id.is_empty() {
                    return Err(ConfigErrorKind::MissingEngineId);
                }
                if self.username.is_empty() {
                    return Err(ConfigErrorKind::MissingUsername);
                }

                let mut usm = Auth::usm(self.username.clone());

                if self.security_level.requires_auth() {
                    if self.auth_key.is_empty() {
                        return Err(ConfigErrorKind::MissingAuthKey);
                    }
                    let protocol = parse_auth_protocol(&self.auth_protocol)
                        .ok_or(ConfigErrorKind::UnknownAuthProtocol)?;
                    usm = usm.auth(protocol, self.auth_key.clone());

                    if self.security_level.requires_privacy() {
                        if self.priv_key.is_empty() {
                            return Err(ConfigErrorKind::MissingPrivKey);
                        }
                        let protocol = parse_priv_protocol(&self.priv_protocol)
                            .ok_or(ConfigErrorKind::UnknownPrivProtocol)?;
                        usm = usm.privacy(protocol, self.priv_key.clone());
                    }
                }

                Ok(SessionParams {
                    target: self.target(),
                    version: SnmpVersion::V3,
                    auth: usm.into(),
                    engine_id: Some(self.engine_id.clone()),
                })
            }
        }
    }
}

/// Resolve an authentication protocol name.
pub fn parse_auth_protocol(name: &str) -> Option<AuthProtocol> {
    name.trim().parse().ok()
}

/// Resolve a privacy protocol name.
///
/// `aes256b` and `aes256r` (Blumenthal and Reeder key extension) both select
/// AES-256; the library picks the key extension from the protocol pair.
pub fn parse_priv_protocol(name: &str) -> Option<PrivProtocol> {
    match name.trim().to_ascii_lowercase().as_str() {
        "aes256b" | "aes256r" => Some(PrivProtocol::Aes256),
        other => other.parse().ok(),
    }
}
