//! Command-line argument structures for the `snmp-set-action` tool.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, SecurityLevel, SnmpVersion};

/// SNMP version for CLI argument parsing.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VersionArg {
    /// SNMPv1
    #[value(name = "1")]
    V1,
    /// SNMPv2c
    #[value(name = "2c")]
    V2c,
    /// SNMPv3
    #[value(name = "3")]
    V3,
}

impl From<VersionArg> for SnmpVersion {
    fn from(v: VersionArg) -> Self {
        match v {
            VersionArg::V1 => SnmpVersion::V1,
            VersionArg::V2c => SnmpVersion::V2c,
            VersionArg::V3 => SnmpVersion::V3,
        }
    }
}

/// SNMPv3 security level for CLI argument parsing.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SecurityLevelArg {
    #[value(name = "noAuthNoPriv")]
    NoAuthNoPriv,
    #[value(name = "authNoPriv")]
    AuthNoPriv,
    #[value(name = "authPriv")]
    AuthPriv,
}

impl From<SecurityLevelArg> for SecurityLevel {
    fn from(l: SecurityLevelArg) -> Self {
        match l {
            SecurityLevelArg::NoAuthNoPriv => SecurityLevel::NoAuthNoPriv,
            SecurityLevelArg::AuthNoPriv => SecurityLevel::AuthNoPriv,
            SecurityLevelArg::AuthPriv => SecurityLevel::AuthPriv,
        }
    }
}

/// Instance configuration: a JSON file, individual flags, or both.
///
/// Flags override values read from the file.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// JSON configuration file using the host's field names.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Agent host name or address.
    #[arg(long = "ip")]
    pub ip: Option<String>,

    /// Agent port (default 161).
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// SNMP version: 1, 2c, or 3.
    #[arg(short = 'v', long = "snmp-version")]
    pub snmp_version: Option<VersionArg>,

    /// Community string (v1/v2c).
    #[arg(short = 'c', long = "community")]
    pub community: Option<String>,

    /// Engine ID (v3).
    #[arg(short = 'e', long = "engine-id")]
    pub engine_id: Option<String>,

    /// User name (v3).
    #[arg(short = 'u', long = "username")]
    pub username: Option<String>,

    /// Security level (v3).
    #[arg(short = 'l', long = "security-level")]
    pub security_level: Option<SecurityLevelArg>,

    /// Authentication protocol: md5, sha, sha224, sha256, sha384, sha512.
    #[arg(short = 'a', long = "auth-protocol")]
    pub auth_protocol: Option<String>,

    /// Authentication key.
    #[arg(short = 'A', long = "auth-key")]
    pub auth_key: Option<String>,

    /// Privacy protocol: des, aes, aes256b, aes256r.
    #[arg(short = 'x', long = "priv-protocol")]
    pub priv_protocol: Option<String>,

    /// Privacy key.
    #[arg(short = 'X', long = "priv-key")]
    pub priv_key: Option<String>,
}

impl ConfigArgs {
    /// Build the instance configuration.
    pub fn load(&self) -> Result<Config, String> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
                serde_json::from_str(&text)
                    .map_err(|e| format!("invalid configuration {}: {}", path.display(), e))?
            }
            None => Config::default(),
        };

        if let Some(ip) = &self.ip {
            config.ip = ip.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(version) = self.snmp_version {
            config.version = version.into();
        }
        if let Some(community) = &self.community {
            config.community = community.clone();
        }
        if let Some(engine_id) = &self.engine_id {
            config.engine_id = engine_id.clone();
        }
        if let Some(username) = &self.username {
            config.username = username.clone();
        }
        if let Some(level) = self.security_level {
            config.security_level = level.into();
        }
        if let Some(protocol) = &self.auth_protocol {
            config.auth_protocol = protocol.clone();
        }
        if let Some(key) = &self.auth_key {
            config.auth_key = key.clone();
        }
        if let Some(protocol) = &self.priv_protocol {
            config.priv_protocol = protocol.clone();
        }
        if let Some(key) = &self.priv_key {
            config.priv_key = key.clone();
        }

        Ok(config)
    }
}

/// Output format for CLI tools.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output for scripting.
    Json,
}

/// Output and logging arguments.
#[derive(Debug, Parser)]
pub struct OutputArgs {
    /// Output format: human or json.
    #[arg(short = 'O', long = "output", default_value = "human")]
    pub format: OutputFormat,

    /// Enable debug logging (snmp_set_adapter=debug).
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Enable trace logging (snmp_set_adapter=trace, async_snmp=trace).
    #[arg(short = 'D', long = "trace")]
    pub trace: bool,
}

impl OutputArgs {
    /// Initialize tracing based on debug/trace flags.
    ///
    /// Host log lines and status changes are `tracing` events, so the default
    /// filter keeps them at info.
    pub fn init_tracing(&self) {
        use tracing_subscriber::EnvFilter;

        let filter = if self.trace {
            "snmp_set_adapter=trace,async_snmp=trace"
        } else if self.debug {
            "snmp_set_adapter=debug,async_snmp=debug"
        } else {
            "snmp_set_adapter=info,async_snmp=warn"
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(std::io::stderr)
            .try_init();
    }
}
