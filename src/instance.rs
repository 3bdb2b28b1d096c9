//! The plugin instance the host drives.

use std::sync::Arc;

use async_snmp::VarBind;

use crate::actions::{ActionId, ActionOptions, ActionRegistry};
use crate::config::Config;
use crate::dispatch;
use crate::error::{ConvertError, Error};
use crate::host::{Host, InstanceStatus, LogLevel};
use crate::session::{BoxFuture, SessionConnector, SessionManager, SnmpConnector};

/// Lifecycle hooks the host calls, always one at a time.
pub trait PluginInstance {
    /// First configuration; registers the action table.
    fn init(&mut self, config: Config) -> BoxFuture<'_, ()>;

    /// The user changed the configuration.
    fn config_updated(&mut self, config: Config) -> BoxFuture<'_, ()>;

    /// The instance is being removed.
    fn destroy(&mut self) -> BoxFuture<'_, ()>;

    /// The user triggered `action`.
    ///
    /// Options are resolved and converted before this returns. The future
    /// only sends the SET and owns everything it needs, so the host may
    /// await it or spawn it and carry on with the next call.
    fn run_action(&self, action: ActionId, options: &ActionOptions)
    -> BoxFuture<'static, ActionOutcome>;
}

/// What became of one action invocation.
#[derive(Debug)]
pub enum ActionOutcome {
    /// The agent accepted the SET and echoed this varbind.
    Sent(VarBind),
    /// The value did not convert; nothing was sent.
    Dropped(ConvertError),
    /// The SET could not be sent or the agent rejected it.
    Failed(Error),
}

impl ActionOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }
}

/// SNMP SET plugin instance.
///
/// Owns the host handle, the session manager and the action table.
#[derive(Debug)]
pub struct SnmpInstance<H, C = SnmpConnector> {
    host: Arc<H>,
    connector: C,
    config: Option<Config>,
    sessions: SessionManager,
    actions: ActionRegistry,
}

impl<H: Host> SnmpInstance<H> {
    /// Create an instance that opens real SNMP sessions.
    pub fn new(host: H) -> Self {
        Self::with_connector(host, SnmpConnector::default())
    }
}

impl<H: Host, C: SessionConnector> SnmpInstance<H, C> {
    /// Create an instance that opens sessions through `connector`.
    pub fn with_connector(host: H, connector: C) -> Self {
        Self {
            host: Arc::new(host),
            connector,
            config: None,
            sessions: SessionManager::new(),
            actions: ActionRegistry::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Whether a session is currently open.
    pub fn has_session(&self) -> bool {
        self.sessions.is_open()
    }

    async fn connect_agent(&mut self) {
        let Some(config) = self.config.as_ref() else {
            return;
        };
        // Failures are already reported to the host as status
        let _ = self
            .sessions
            .apply_configuration(&*self.host, &self.connector, config)
            .await;
    }
}

impl<H: Host + 'static, C: SessionConnector> PluginInstance for SnmpInstance<H, C> {
    fn init(&mut self, config: Config) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            self.config = Some(config);
            self.host.update_status(InstanceStatus::Ok, None);
            self.host
                .set_action_definitions(self.actions.definitions().to_vec());
            self.connect_agent().await;
        })
    }

    fn config_updated(&mut self, config: Config) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            self.config = Some(config);
            self.connect_agent().await;
        })
    }

    fn destroy(&mut self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            self.sessions.close_session();
            self.host.log(LogLevel::Debug, "destroy");
        })
    }

    fn run_action(
        &self,
        action: ActionId,
        options: &ActionOptions,
    ) -> BoxFuture<'static, ActionOutcome> {
        let request = match self.actions.prepare(&*self.host, action, options) {
            Ok(request) => request,
            Err(e) => {
                let level = if e.is_input_warning() {
                    LogLevel::Warn
                } else {
                    LogLevel::Error
                };
                self.host
                    .log(level, &format!("{}. SNMP message not sent.", e));
                return Box::pin(std::future::ready(ActionOutcome::Dropped(e)));
            }
        };

        tracing::debug!(target: "snmp_set_adapter::instance", { action = %action, oid = %request.oid, ty = %request.ty }, "running action");

        let host = Arc::clone(&self.host);
        let session = self.sessions.current().cloned();
        Box::pin(async move {
            match dispatch::set_oid(&*host, session, request).await {
                Ok(varbind) => ActionOutcome::Sent(varbind),
                Err(e) => ActionOutcome::Failed(e),
            }
        })
    }
}
