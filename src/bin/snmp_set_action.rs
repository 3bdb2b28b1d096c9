//! snmp-set-action: Run one SNMP SET action outside an automation host.
//!
//! Stands in for the host: builds the instance configuration from a file or
//! flags, registers the actions, runs one of them and reports the result.

use clap::Parser;
use snmp_set_adapter::cli::args::{ConfigArgs, OutputArgs};
use snmp_set_adapter::cli::output::write_outcome;
use snmp_set_adapter::{
    ActionId, ActionOptions, PluginInstance, SnmpInstance, TracingHost, VariableMap,
};
use std::process::ExitCode;

/// Run one SNMP SET action.
///
/// Actions:
///   setString     OctetString value
///   setNumber     Integer-family value (choose with --type)
///   setBoolean    true/false, yes/no
///   setIpAddress  dotted IPv4 address
///   setOID        dotted OID
#[derive(Debug, Parser)]
#[command(name = "snmp-set-action", version, about, verbatim_doc_comment)]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Variable available as $(label:name) in OID and value.
    #[arg(long = "var", value_name = "LABEL:NAME=VALUE")]
    vars: Vec<String>,

    /// Number type for setNumber (Integer, Counter32, Gauge32, TimeTicks, ...).
    #[arg(short = 't', long = "type")]
    value_type: Option<String>,

    /// Action to run.
    #[arg(value_name = "ACTION")]
    action: ActionId,

    /// Target OID.
    #[arg(value_name = "OID")]
    oid: String,

    /// Value to write.
    #[arg(value_name = "VALUE")]
    value: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    args.output.init_tracing();

    let config = match args.config.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut variables = VariableMap::new();
    for definition in &args.vars {
        if let Err(e) = variables.insert_definition(definition) {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let mut options = ActionOptions::new()
        .with("oid", args.oid.as_str())
        .with("value", args.value.as_str());
    if let Some(ty) = &args.value_type {
        options.insert("type", ty.as_str());
    }

    let mut instance = SnmpInstance::new(TracingHost::with_variables(variables));
    instance.init(config).await;

    if !instance.has_session() {
        let reason = instance
            .host()
            .status()
            .and_then(|(_, reason)| reason)
            .unwrap_or_else(|| "no session".to_string());
        eprintln!("Error: {}", reason);
        instance.destroy().await;
        return ExitCode::FAILURE;
    }

    let outcome = instance.run_action(args.action, &options).await;
    instance.destroy().await;

    if let Err(e) = write_outcome(args.output.format, args.action, &outcome) {
        eprintln!("Error writing output: {}", e);
        return ExitCode::FAILURE;
    }

    if outcome.is_sent() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
