//! End-to-end tests of the plugin instance against a mock session.

mod common;

use std::sync::atomic::Ordering;

use async_snmp::{Oid, Value};
use bytes::Bytes;
use common::*;
use snmp_set_adapter::{
    ActionId, ActionOptions, ActionOutcome, Config, ConvertError, Error, InstanceStatus, LogLevel,
    PluginInstance, SecurityLevel, SnmpInstance, VariableMap,
};

type TestInstance = SnmpInstance<RecordingHost, MockConnector>;

async fn started(config: Config) -> (TestInstance, MockConnector) {
    started_with(RecordingHost::new(), config).await
}

async fn started_with(host: RecordingHost, config: Config) -> (TestInstance, MockConnector) {
    let connector = MockConnector::new();
    let mut instance = SnmpInstance::with_connector(host, connector.clone());
    instance.init(config).await;
    (instance, connector)
}

fn options(oid: &str, value: &str) -> ActionOptions {
    ActionOptions::new().with("oid", oid).with("value", value)
}

fn oid(s: &str) -> Oid {
    Oid::parse(s).unwrap()
}

#[tokio::test]
async fn init_registers_actions_and_opens_session() {
    let (instance, connector) = started(v2c_config()).await;

    assert_eq!(instance.host().action_count(), 5);
    assert!(instance.has_session());
    assert_eq!(connector.state.opened(), 1);
    assert_eq!(
        instance.host().statuses(),
        vec![(InstanceStatus::Ok, None), (InstanceStatus::Ok, None)]
    );
}

#[tokio::test]
async fn set_string_sends_octet_string() {
    let (instance, connector) = started(v2c_config()).await;

    let outcome = instance
        .run_action(ActionId::SetString, &options(SYS_LOCATION, "Rack 12"))
        .await;

    assert!(outcome.is_sent());
    assert_eq!(
        connector.state.sets(),
        vec![(
            oid(SYS_LOCATION),
            Value::OctetString(Bytes::from_static(b"Rack 12"))
        )]
    );
}

#[tokio::test]
async fn set_number_converts_and_dispatches() {
    let (instance, connector) = started(v1_config()).await;

    let outcome = instance
        .run_action(ActionId::SetNumber, &options(ENTERPRISE_SCALAR, "42"))
        .await;

    assert!(outcome.is_sent());
    assert_eq!(
        connector.state.sets(),
        vec![(oid(ENTERPRISE_SCALAR), Value::Integer(42))]
    );
}

#[tokio::test]
async fn set_number_honors_type_selector() {
    let (instance, connector) = started(v2c_config()).await;

    let opts = options(ENTERPRISE_SCALAR, "360000").with("type", "TimeTicks");
    instance.run_action(ActionId::SetNumber, &opts).await;

    let opts = options(ENTERPRISE_SCALAR, "7").with("type", "Unsigned32");
    instance.run_action(ActionId::SetNumber, &opts).await;

    let values: Vec<Value> = connector.state.sets().into_iter().map(|(_, v)| v).collect();
    assert_eq!(values, vec![Value::TimeTicks(360000), Value::Gauge32(7)]);
}

#[tokio::test]
async fn set_number_rejects_non_numeric_without_sending() {
    let (instance, connector) = started(v2c_config()).await;

    let outcome = instance
        .run_action(ActionId::SetNumber, &options(ENTERPRISE_SCALAR, "abc"))
        .await;

    assert!(matches!(
        outcome,
        ActionOutcome::Dropped(ConvertError::NotANumber { .. })
    ));
    assert!(connector.state.sets().is_empty());
    assert_eq!(
        instance.host().logs_at(LogLevel::Warn),
        vec!["Value \"abc\" is not an number. SNMP message not sent.".to_string()]
    );
    // Input errors leave status untouched
    assert_eq!(instance.host().statuses().len(), 2);
}

#[tokio::test]
async fn set_boolean_accepts_padded_mixed_case() {
    let (instance, connector) = started(v2c_config()).await;

    let outcome = instance
        .run_action(ActionId::SetBoolean, &options(ENTERPRISE_SCALAR, "  YES "))
        .await;

    assert!(outcome.is_sent());
    let (_, value) = connector.state.sets().pop().unwrap();
    assert_eq!(
        value,
        Value::Unknown {
            tag: 0x01,
            data: Bytes::from_static(&[0xFF]),
        }
    );
}

#[tokio::test]
async fn set_boolean_rejects_unknown_token() {
    let (instance, connector) = started(v2c_config()).await;

    let outcome = instance
        .run_action(ActionId::SetBoolean, &options(ENTERPRISE_SCALAR, "maybe"))
        .await;

    assert!(matches!(
        outcome,
        ActionOutcome::Dropped(ConvertError::NotABoolean { .. })
    ));
    assert!(connector.state.sets().is_empty());
    assert_eq!(instance.host().logs_at(LogLevel::Warn).len(), 1);
}

#[tokio::test]
async fn set_ip_address_and_oid() {
    let (instance, connector) = started(v3_config(SecurityLevel::AuthPriv)).await;

    instance
        .run_action(ActionId::SetIpAddress, &options(ENTERPRISE_SCALAR, "10.20.30.40"))
        .await;
    instance
        .run_action(ActionId::SetOid, &options(ENTERPRISE_SCALAR, "1.3.6.1.4.1.8072"))
        .await;

    let values: Vec<Value> = connector.state.sets().into_iter().map(|(_, v)| v).collect();
    assert_eq!(
        values,
        vec![
            Value::IpAddress([10, 20, 30, 40]),
            Value::ObjectIdentifier(oid("1.3.6.1.4.1.8072")),
        ]
    );
}

#[tokio::test]
async fn malformed_ip_address_is_logged_as_error() {
    let (instance, connector) = started(v2c_config()).await;

    let outcome = instance
        .run_action(ActionId::SetIpAddress, &options(ENTERPRISE_SCALAR, "10.20.30"))
        .await;

    assert!(matches!(
        outcome,
        ActionOutcome::Dropped(ConvertError::InvalidIpAddress { .. })
    ));
    assert!(connector.state.sets().is_empty());
    assert_eq!(instance.host().logs_at(LogLevel::Error).len(), 1);
}

#[tokio::test]
async fn variables_resolve_in_oid_and_value() {
    let mut vars = VariableMap::new();
    vars.insert("custom", "row", "4");
    vars.insert("custom", "gain", "-6");
    let (instance, connector) =
        started_with(RecordingHost::with_variables(vars), v2c_config()).await;

    let outcome = instance
        .run_action(
            ActionId::SetNumber,
            &options("1.3.6.1.4.1.99999.2.$(custom:row)", "$(custom:gain)"),
        )
        .await;

    assert!(outcome.is_sent());
    assert_eq!(
        connector.state.sets(),
        vec![(oid("1.3.6.1.4.1.99999.2.4"), Value::Integer(-6))]
    );
}

#[tokio::test]
async fn set_without_session_fails_gracefully() {
    let (instance, connector) = started(Config::default()).await;
    assert!(!instance.has_session());

    let outcome = instance
        .run_action(ActionId::SetString, &options(SYS_NAME, "core-sw-1"))
        .await;

    assert!(matches!(outcome, ActionOutcome::Failed(Error::NoSession)));
    assert!(connector.state.sets().is_empty());
    assert_eq!(instance.host().logs_at(LogLevel::Error).len(), 1);
}

#[tokio::test]
async fn invalid_target_oid_is_not_sent() {
    let (instance, connector) = started(v2c_config()).await;

    let outcome = instance
        .run_action(ActionId::SetString, &options("not.an.oid", "x"))
        .await;

    assert!(matches!(
        outcome,
        ActionOutcome::Failed(Error::InvalidOid { .. })
    ));
    assert!(connector.state.sets().is_empty());
    assert!(instance.has_session());
}

#[tokio::test]
async fn agent_error_keeps_session_and_status() {
    let (instance, connector) = started(v2c_config()).await;
    connector.state.fail_set.store(true, Ordering::SeqCst);

    let outcome = instance
        .run_action(ActionId::SetString, &options(SYS_CONTACT, "noc@example.com"))
        .await;

    assert!(matches!(outcome, ActionOutcome::Failed(Error::Snmp(_))));
    assert!(instance.has_session());
    assert_eq!(connector.state.closed(), 0);
    assert_eq!(instance.host().last_status(), Some((InstanceStatus::Ok, None)));
    assert_eq!(instance.host().logs_at(LogLevel::Error).len(), 1);

    // Next attempt goes through on the same session
    connector.state.fail_set.store(false, Ordering::SeqCst);
    let outcome = instance
        .run_action(ActionId::SetString, &options(SYS_CONTACT, "noc@example.com"))
        .await;
    assert!(outcome.is_sent());
    assert_eq!(connector.state.opened(), 1);
}

#[tokio::test]
async fn config_updated_rebuilds_session() {
    let (mut instance, connector) = started(v1_config()).await;

    instance.config_updated(v3_config(SecurityLevel::AuthNoPriv)).await;
    assert!(instance.has_session());
    assert_eq!(connector.state.opened(), 2);
    assert_eq!(connector.state.closed(), 1);
    assert_eq!(connector.state.max_open(), 1);

    let broken = Config {
        username: String::new(),
        ..v3_config(SecurityLevel::AuthNoPriv)
    };
    instance.config_updated(broken).await;
    assert!(!instance.has_session());
    assert_eq!(connector.state.open(), 0);
    assert_eq!(
        instance.host().last_status(),
        Some((
            InstanceStatus::UnknownError,
            Some("Missing User Name".into())
        ))
    );
}

#[tokio::test]
async fn destroy_closes_session() {
    let (mut instance, connector) = started(v2c_config()).await;

    instance.destroy().await;

    assert!(!instance.has_session());
    assert_eq!(connector.state.open(), 0);
    assert_eq!(
        instance.host().logs_at(LogLevel::Debug),
        vec!["destroy".to_string()]
    );

    // Destroy after destroy is harmless
    instance.destroy().await;
    assert_eq!(connector.state.closed(), 1);
}

#[tokio::test]
async fn conversion_errors_are_reported_before_the_future_runs() {
    let (instance, connector) = started(v2c_config()).await;

    let outcome = instance.run_action(ActionId::SetNumber, &options(ENTERPRISE_SCALAR, "n/a"));
    assert_eq!(instance.host().logs_at(LogLevel::Warn).len(), 1);

    assert!(matches!(outcome.await, ActionOutcome::Dropped(_)));
    assert!(connector.state.sets().is_empty());
}

#[tokio::test]
async fn spawned_set_completes_on_previous_session_after_reconfiguration() {
    let (mut instance, connector) = started(v2c_config()).await;
    connector.state.hold_sets.store(true, Ordering::SeqCst);

    let pending = tokio::spawn(
        instance.run_action(ActionId::SetString, &options(SYS_NAME, "edge-rtr-2")),
    );
    tokio::task::yield_now().await;

    instance.config_updated(v1_config()).await;
    assert_eq!(connector.state.opened(), 2);
    assert_eq!(connector.state.closed(), 1);
    assert!(connector.state.sets().is_empty());

    connector.state.release_sets();
    let outcome = pending.await.unwrap();

    assert!(outcome.is_sent());
    assert_eq!(
        connector.state.sets(),
        vec![(
            oid(SYS_NAME),
            Value::OctetString(Bytes::from_static(b"edge-rtr-2"))
        )]
    );
    assert_eq!(connector.state.set_sessions(), vec![1]);
    assert_eq!(connector.state.max_open(), 1);
}
