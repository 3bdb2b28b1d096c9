//! Sessions backed by an `async_snmp::Client`.

use std::sync::Arc;
use std::time::Duration;

use async_snmp::{Client, Oid, Transport, Value, VarBind};

use crate::config::SessionParams;

use super::{BoxFuture, SessionConnector, SetSession};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connector that opens UDP clients with `async_snmp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnmpConnector {
    timeout: Duration,
}

impl Default for SnmpConnector {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SnmpConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout of sessions opened from now on.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl SessionConnector for SnmpConnector {
    fn connect<'a>(
        &'a self,
        params: &'a SessionParams,
    ) -> BoxFuture<'a, async_snmp::Result<Arc<dyn SetSession>>> {
        Box::pin(async move {
            let client = Client::builder(params.target.clone(), params.auth.clone())
                .timeout(self.timeout)
                .connect()
                .await?;

            tracing::debug!(target: "snmp_set_adapter::session", {
                target = %params.target,
                version = %params.version,
                engine_id = params.engine_id.as_deref(),
            }, "SNMP session opened");

            let session: Arc<dyn SetSession> = Arc::new(SnmpSession {
                client,
                target: params.target.clone(),
            });
            Ok(session)
        })
    }
}

struct SnmpSession<T: Transport> {
    client: Client<T>,
    target: String,
}

impl<T: Transport + 'static> SetSession for SnmpSession<T> {
    fn set<'a>(
        &'a self,
        oid: &'a Oid,
        value: Value,
    ) -> BoxFuture<'a, async_snmp::Result<VarBind>> {
        Box::pin(self.client.set(oid, value))
    }

    fn close(&self) {
        tracing::debug!(target: "snmp_set_adapter::session", { target = %self.target }, "SNMP session closed");
    }
}
