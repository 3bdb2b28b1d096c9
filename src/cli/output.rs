//! Output of action results.

use std::io::{self, Write};

use crate::actions::ActionId;
use crate::instance::ActionOutcome;

use super::args::OutputFormat;

/// Write the outcome of `action` to stdout.
pub fn write_outcome(format: OutputFormat, action: ActionId, outcome: &ActionOutcome) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => write_human(&mut out, outcome),
        OutputFormat::Json => write_json(&mut out, action, outcome),
    }
}

fn write_human<W: Write>(out: &mut W, outcome: &ActionOutcome) -> io::Result<()> {
    match outcome {
        ActionOutcome::Sent(vb) => writeln!(out, "{} = {}", vb.oid, vb.value),
        ActionOutcome::Dropped(e) => writeln!(out, "not sent: {}", e),
        ActionOutcome::Failed(e) => writeln!(out, "failed: {}", e),
    }
}

fn write_json<W: Write>(out: &mut W, action: ActionId, outcome: &ActionOutcome) -> io::Result<()> {
    let value = match outcome {
        ActionOutcome::Sent(vb) => serde_json::json!({
            "action": action.as_str(),
            "status": "sent",
            "oid": vb.oid.to_string(),
            "value": vb.value.to_string(),
        }),
        ActionOutcome::Dropped(e) => serde_json::json!({
            "action": action.as_str(),
            "status": "dropped",
            "error": e.to_string(),
        }),
        ActionOutcome::Failed(e) => serde_json::json!({
            "action": action.as_str(),
            "status": "failed",
            "error": e.to_string(),
        }),
    };
    writeln!(out, "{}", value)
}
