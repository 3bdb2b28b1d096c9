//! Session and connector traits.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_snmp::{Oid, Value, VarBind};

use crate::config::SessionParams;

/// Type alias for boxed async return type (dyn-compatible).
///
/// Sessions and connectors are stored as trait objects, so their async
/// methods return `BoxFuture` instead of `impl Future`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// An open SNMP session able to SET one varbind.
///
/// A session is bound to the configuration it was opened with. It is shared
/// as `Arc<dyn SetSession>` so an in-flight SET keeps it alive while the
/// session manager moves on to a new configuration.
pub trait SetSession: Send + Sync {
    /// Send a single-varbind SET request and return the agent's echo.
    fn set<'a>(&'a self, oid: &'a Oid, value: Value)
    -> BoxFuture<'a, async_snmp::Result<VarBind>>;

    /// Release the session.
    ///
    /// Called exactly once by the session manager before the handle is
    /// dropped. The default does nothing; dropping releases the socket.
    fn close(&self) {}
}

/// Opens sessions from validated parameters.
pub trait SessionConnector: Send + Sync {
    fn connect<'a>(
        &'a self,
        params: &'a SessionParams,
    ) -> BoxFuture<'a, async_snmp::Result<Arc<dyn SetSession>>>;
}
