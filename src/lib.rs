//! # snmp-set-adapter
//!
//! Plugin adapter that exposes SNMP SET operations to an automation host.
//!
//! The host hands the adapter a [`Config`] on init and on every change; the
//! adapter keeps exactly one SNMP session for that configuration and offers
//! five actions (one per value family) that write a single OID.
//!
//! The wire protocol, USM and engine discovery come from [`async_snmp`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snmp_set_adapter::{
//!     ActionId, ActionOptions, Config, PluginInstance, SnmpInstance, TracingHost,
//! };
//!
//! # async fn example() {
//! let mut instance = SnmpInstance::new(TracingHost::default());
//!
//! let config = Config {
//!     ip: "192.168.1.1".into(),
//!     community: "private".into(),
//!     ..Config::default()
//! };
//! instance.init(config).await;
//!
//! let options = ActionOptions::new()
//!     .with("oid", "1.3.6.1.2.1.1.4.0")
//!     .with("value", "admin@example.com");
//! // The returned future owns its session handle; spawn it to fire and forget
//! tokio::spawn(instance.run_action(ActionId::SetString, &options));
//!
//! instance.destroy().await;
//! # }
//! ```

pub mod actions;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod instance;
pub mod session;
pub mod value;
pub mod variables;

#[cfg(feature = "cli")]
pub mod cli;

pub use actions::{ActionDefinition, ActionId, ActionOption, ActionOptions, ActionRegistry};
pub use config::{Config, SecurityLevel, SessionParams, SnmpVersion};
pub use dispatch::SetRequest;
pub use error::{ConfigErrorKind, ConvertError, Error, Result};
pub use host::{Host, InstanceStatus, LogLevel, TracingHost};
pub use instance::{ActionOutcome, PluginInstance, SnmpInstance};
pub use session::{BoxFuture, SessionConnector, SessionManager, SetSession, SnmpConnector};
pub use value::ObjectType;
pub use variables::VariableMap;
