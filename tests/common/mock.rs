//! In-memory host and session doubles.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_snmp::{Oid, Value, VarBind};
use tokio::sync::Notify;

use super::fixtures::AGENT_IP;
use snmp_set_adapter::{
    ActionDefinition, BoxFuture, Host, InstanceStatus, LogLevel, SessionConnector, SessionParams,
    SetSession, VariableMap,
};

/// Host that records everything the instance reports.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub variables: VariableMap,
    logs: Mutex<Vec<(LogLevel, String)>>,
    statuses: Mutex<Vec<(InstanceStatus, Option<String>)>>,
    actions: Mutex<Vec<ActionDefinition>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variables(variables: VariableMap) -> Self {
        Self {
            variables,
            ..Self::default()
        }
    }

    pub fn logs(&self) -> Vec<(LogLevel, String)> {
        self.logs.lock().unwrap().clone()
    }

    pub fn logs_at(&self, level: LogLevel) -> Vec<String> {
        self.logs()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }

    pub fn statuses(&self) -> Vec<(InstanceStatus, Option<String>)> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn last_status(&self) -> Option<(InstanceStatus, Option<String>)> {
        self.statuses().last().cloned()
    }

    pub fn action_count(&self) -> usize {
        self.actions.lock().unwrap().len()
    }
}

impl Host for RecordingHost {
    fn update_status(&self, status: InstanceStatus, reason: Option<&str>) {
        self.statuses
            .lock()
            .unwrap()
            .push((status, reason.map(str::to_owned)));
    }

    fn log(&self, level: LogLevel, message: &str) {
        self.logs.lock().unwrap().push((level, message.to_owned()));
    }

    fn parse_variables_in_string(&self, text: &str) -> String {
        self.variables.substitute(text)
    }

    fn set_action_definitions(&self, definitions: Vec<ActionDefinition>) {
        *self.actions.lock().unwrap() = definitions;
    }
}

/// Counters and knobs shared by a [`MockConnector`] and its sessions.
#[derive(Debug, Default)]
pub struct MockState {
    /// Sessions currently open.
    pub open: AtomicUsize,
    /// Highest number of sessions open at once.
    pub max_open: AtomicUsize,
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub fail_connect: AtomicBool,
    pub fail_set: AtomicBool,
    /// Park every SET until [`MockState::release_sets`] is called.
    pub hold_sets: AtomicBool,
    released: Notify,
    pub params: Mutex<Vec<SessionParams>>,
    pub sets: Mutex<Vec<(Oid, Value)>>,
    /// Session number (1-based, in opening order) each SET went out on.
    pub set_sessions: Mutex<Vec<usize>>,
}

impl MockState {
    pub fn sets(&self) -> Vec<(Oid, Value)> {
        self.sets.lock().unwrap().clone()
    }

    pub fn set_sessions(&self) -> Vec<usize> {
        self.set_sessions.lock().unwrap().clone()
    }

    /// Let one parked SET continue.
    pub fn release_sets(&self) {
        self.released.notify_one();
    }

    pub fn open(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }

    pub fn max_open(&self) -> usize {
        self.max_open.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn last_params(&self) -> Option<SessionParams> {
        self.params.lock().unwrap().last().cloned()
    }
}

/// Connector handing out [`MockSession`]s.
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    pub state: Arc<MockState>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionConnector for MockConnector {
    fn connect<'a>(
        &'a self,
        params: &'a SessionParams,
    ) -> BoxFuture<'a, async_snmp::Result<Arc<dyn SetSession>>> {
        Box::pin(async move {
            self.state.params.lock().unwrap().push(params.clone());
            if self.state.fail_connect.load(Ordering::SeqCst) {
                return Err(
                    async_snmp::Error::Config("engine discovery failed".into()).boxed(),
                );
            }

            let open = self.state.open.fetch_add(1, Ordering::SeqCst) + 1;
            self.state.max_open.fetch_max(open, Ordering::SeqCst);
            let id = self.state.opened.fetch_add(1, Ordering::SeqCst) + 1;

            let session: Arc<dyn SetSession> = Arc::new(MockSession {
                id,
                state: self.state.clone(),
                closed: AtomicBool::new(false),
            });
            Ok(session)
        })
    }
}

/// Session that records SETs and echoes the value back.
#[derive(Debug)]
pub struct MockSession {
    id: usize,
    state: Arc<MockState>,
    closed: AtomicBool,
}

impl SetSession for MockSession {
    fn set<'a>(
        &'a self,
        oid: &'a Oid,
        value: Value,
    ) -> BoxFuture<'a, async_snmp::Result<VarBind>> {
        Box::pin(async move {
            if self.state.hold_sets.load(Ordering::SeqCst) {
                self.state.released.notified().await;
            }
            if self.state.fail_set.load(Ordering::SeqCst) {
                return Err(async_snmp::Error::MalformedResponse {
                    target: format!("{}:161", AGENT_IP).parse().unwrap(),
                }
                .boxed());
            }
            self.state
                .sets
                .lock()
                .unwrap()
                .push((oid.clone(), value.clone()));
            self.state.set_sessions.lock().unwrap().push(self.id);
            Ok(VarBind::new(oid.clone(), value))
        })
    }

    fn close(&self) {
        assert!(
            !self.closed.swap(true, Ordering::SeqCst),
            "session closed twice"
        );
        self.state.open.fetch_sub(1, Ordering::SeqCst);
        self.state.closed.fetch_add(1, Ordering::SeqCst);
    }
}
