//! Common test fixtures and constants.

use snmp_set_adapter::{Config, SecurityLevel, SnmpVersion};

/// sysContact.0
pub const SYS_CONTACT: &str = "1.3.6.1.2.1.1.4.0";
/// sysName.0
pub const SYS_NAME: &str = "1.3.6.1.2.1.1.5.0";
/// sysLocation.0
pub const SYS_LOCATION: &str = "1.3.6.1.2.1.1.6.0";
/// A writable scalar in a private enterprise subtree.
pub const ENTERPRISE_SCALAR: &str = "1.3.6.1.4.1.99999.1.1.0";

pub const AGENT_IP: &str = "192.0.2.10";
pub const COMMUNITY: &str = "private";
pub const USERNAME: &str = "privaes128user";
pub const AUTH_PASSWORD: &str = "authpass123";
pub const PRIV_PASSWORD: &str = "privpass123";

pub fn v1_config() -> Config {
    Config {
        ip: AGENT_IP.into(),
        version: SnmpVersion::V1,
        community: COMMUNITY.into(),
        ..Config::default()
    }
}

pub fn v2c_config() -> Config {
    Config {
        version: SnmpVersion::V2c,
        ..v1_config()
    }
}

pub fn v3_config(level: SecurityLevel) -> Config {
    Config {
        ip: AGENT_IP.into(),
        version: SnmpVersion::V3,
        engine_id: "80001f8880e9bd0c1d12667a5100000000".into(),
        username: USERNAME.into(),
        security_level: level,
        auth_protocol: "sha".into(),
        auth_key: AUTH_PASSWORD.into(),
        priv_protocol: "aes".into(),
        priv_key: PRIV_PASSWORD.into(),
        ..Config::default()
    }
}
