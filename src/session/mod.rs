//! Ownership of the single SNMP session.
//!
//! The [`SessionManager`] holds at most one open session. Every configuration
//! change tears the current session down before a new one is opened, so two
//! sessions never coexist, and a configuration that fails validation leaves
//! the manager empty.

mod snmp;
mod traits;

pub use snmp::{DEFAULT_TIMEOUT, SnmpConnector};
pub use traits::{BoxFuture, SessionConnector, SetSession};

use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::host::{Host, InstanceStatus, LogLevel};

/// Owner of the current SNMP session.
#[derive(Default)]
pub struct SessionManager {
    session: Option<Arc<dyn SetSession>>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("open", &self.is_open())
            .finish()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current session, if one is open.
    pub fn current(&self) -> Option<&Arc<dyn SetSession>> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Install `session` as the current session.
    ///
    /// The previous session, if any, is closed first.
    pub fn replace(&mut self, session: Option<Arc<dyn SetSession>>) {
        if let Some(old) = self.session.take() {
            old.close();
        }
        self.session = session;
    }

    /// Close and forget the current session. Idempotent.
    pub fn close_session(&mut self) {
        self.replace(None);
    }

    /// Rebuild the session for `config`.
    ///
    /// The current session is closed before anything else happens. On a
    /// configuration error the host gets a warning and an
    /// [`InstanceStatus::UnknownError`] naming the missing field; if the
    /// library cannot open the session the status is
    /// [`InstanceStatus::ConnectionFailure`]. Either way no session remains.
    pub async fn apply_configuration<H, C>(
        &mut self,
        host: &H,
        connector: &C,
        config: &Config,
    ) -> Result<()>
    where
        H: Host + ?Sized,
        C: SessionConnector + ?Sized,
    {
        self.close_session();

        let params = match config.session_params() {
            Ok(params) => params,
            Err(kind) => {
                tracing::debug!(target: "snmp_set_adapter::session", { reason = kind.reason() }, "configuration rejected");
                host.log(LogLevel::Warn, kind.hint());
                host.update_status(InstanceStatus::UnknownError, Some(kind.reason()));
                return Err(Error::config(kind));
            }
        };

        match connector.connect(&params).await {
            Ok(session) => {
                self.replace(Some(session));
                host.update_status(InstanceStatus::Ok, None);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(target: "snmp_set_adapter::session", { target = %params.target, error = %e }, "failed to open session");
                let message = e.to_string();
                host.log(
                    LogLevel::Error,
                    &format!("Failed to open SNMP session to {}: {}", params.target, message),
                );
                host.update_status(InstanceStatus::ConnectionFailure, Some(&message));
                Err(Error::Snmp(e))
            }
        }
    }
}
