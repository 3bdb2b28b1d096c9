//! Sending one SET request over the current session.

use std::sync::Arc;

use async_snmp::{Value, VarBind};

use crate::error::{Error, Result};
use crate::host::{Host, LogLevel};
use crate::session::SetSession;
use crate::value::{self, ObjectType};

/// A single OID write, built per action invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SetRequest {
    /// Target OID in dotted form, after variable resolution.
    pub oid: String,
    pub ty: ObjectType,
    pub value: Value,
}

impl SetRequest {
    pub fn new(oid: impl Into<String>, ty: ObjectType, value: Value) -> Self {
        Self {
            oid: oid.into(),
            ty,
            value,
        }
    }
}

/// Send `request` over `session`.
///
/// Failures (no session, malformed target OID, transport or agent error) are
/// logged to the host at error level and returned. Nothing is retried and
/// the session is left as it is.
pub async fn set_oid<H: Host + ?Sized>(
    host: &H,
    session: Option<Arc<dyn SetSession>>,
    request: SetRequest,
) -> Result<VarBind> {
    let result = send(session, request).await;
    if let Err(e) = &result {
        host.log(LogLevel::Error, &e.to_string());
    }
    result
}

async fn send(session: Option<Arc<dyn SetSession>>, request: SetRequest) -> Result<VarBind> {
    let session = session.ok_or(Error::NoSession)?;
    let oid = value::parse_oid(&request.oid).map_err(|e| Error::invalid_oid(request.oid.as_str(), e))?;

    tracing::debug!(target: "snmp_set_adapter::dispatch", { oid = %oid, ty = %request.ty }, "sending SET");
    let varbind = session.set(&oid, request.value).await?;
    tracing::debug!(target: "snmp_set_adapter::dispatch", { oid = %varbind.oid, value = ?varbind.value }, "SET acknowledged");
    Ok(varbind)
}
