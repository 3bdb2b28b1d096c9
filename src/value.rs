//! Conversion of user-supplied strings into typed SNMP values.
//!
//! Every action ends up here: the resolved value text and the logical
//! [`ObjectType`] chosen by the action (or the user, for numbers) become an
//! [`async_snmp::Value`] ready for a SET.

use std::net::Ipv4Addr;

use async_snmp::{Oid, Value};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// Universal BOOLEAN tag (X.690). Not part of the SNMP SMI, so it travels as
/// [`Value::Unknown`].
pub const BOOLEAN_TAG: u8 = 0x01;

/// Logical SNMP object types an action can write.
///
/// `Counter`, `Gauge` and `Unsigned32` are the SMIv1 and textual aliases of
/// Counter32 and Gauge32; they encode identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    OctetString,
    Integer,
    Counter,
    Counter32,
    Gauge,
    Gauge32,
    TimeTicks,
    Unsigned32,
    Boolean,
    IpAddress,
    #[serde(rename = "OID")]
    Oid,
}

impl ObjectType {
    /// Types selectable in the number action's dropdown, in display order.
    pub const NUMERIC: [ObjectType; 7] = [
        ObjectType::Integer,
        ObjectType::Counter,
        ObjectType::Counter32,
        ObjectType::Gauge,
        ObjectType::Gauge32,
        ObjectType::TimeTicks,
        ObjectType::Unsigned32,
    ];

    /// One type per distinct tag, SMIv2 names first, for tag lookup.
    const BY_TAG: [ObjectType; 8] = [
        ObjectType::Boolean,
        ObjectType::Integer,
        ObjectType::OctetString,
        ObjectType::Oid,
        ObjectType::IpAddress,
        ObjectType::Counter32,
        ObjectType::Gauge32,
        ObjectType::TimeTicks,
    ];

    /// BER tag the value is encoded with.
    pub const fn tag(self) -> u8 {
        match self {
            Self::Boolean => BOOLEAN_TAG,
            Self::Integer => 0x02,
            Self::OctetString => 0x04,
            Self::Oid => 0x06,
            Self::IpAddress => 0x40,
            Self::Counter | Self::Counter32 => 0x41,
            Self::Gauge | Self::Gauge32 | Self::Unsigned32 => 0x42,
            Self::TimeTicks => 0x43,
        }
    }

    /// Display label, also accepted by [`FromStr`](std::str::FromStr).
    pub const fn label(self) -> &'static str {
        match self {
            Self::OctetString => "OctetString",
            Self::Integer => "Integer",
            Self::Counter => "Counter",
            Self::Counter32 => "Counter32",
            Self::Gauge => "Gauge",
            Self::Gauge32 => "Gauge32",
            Self::TimeTicks => "TimeTicks",
            Self::Unsigned32 => "Unsigned32",
            Self::Boolean => "Boolean",
            Self::IpAddress => "IpAddress",
            Self::Oid => "OID",
        }
    }

    /// Whether the type carries an integer value.
    pub fn is_numeric(self) -> bool {
        Self::NUMERIC.contains(&self)
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ObjectType {
    type Err = ConvertError;

    /// Parse a type label (case-insensitive) or a decimal BER tag.
    ///
    /// Tags shared by aliases resolve to the SMIv2 name (65 is Counter32,
    /// 66 is Gauge32).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(tag) = s.parse::<u8>() {
            return Self::BY_TAG
                .into_iter()
                .find(|ty| ty.tag() == tag)
                .ok_or_else(|| ConvertError::NotNumericType { input: s.into() });
        }

        match s.to_ascii_lowercase().as_str() {
            "octetstring" => Ok(Self::OctetString),
            "integer" => Ok(Self::Integer),
            "counter" => Ok(Self::Counter),
            "counter32" => Ok(Self::Counter32),
            "gauge" => Ok(Self::Gauge),
            "gauge32" => Ok(Self::Gauge32),
            "timeticks" => Ok(Self::TimeTicks),
            "unsigned32" => Ok(Self::Unsigned32),
            "boolean" => Ok(Self::Boolean),
            "ipaddress" => Ok(Self::IpAddress),
            "oid" => Ok(Self::Oid),
            _ => Err(ConvertError::NotNumericType { input: s.into() }),
        }
    }
}

/// Convert `raw` into a value of type `ty`.
pub fn convert(ty: ObjectType, raw: &str) -> Result<Value, ConvertError> {
    match ty {
        ObjectType::OctetString => Ok(Value::OctetString(Bytes::copy_from_slice(raw.as_bytes()))),
        ObjectType::Boolean => parse_boolean(raw).map(boolean_value),
        ObjectType::IpAddress => parse_ip_address(raw).map(Value::IpAddress),
        ObjectType::Oid => parse_oid_value(raw).map(Value::ObjectIdentifier),
        ObjectType::Integer => {
            let n = leading_integer(raw)?;
            i32::try_from(n)
                .map(Value::Integer)
                .map_err(|_| out_of_range(raw, ty))
        }
        ObjectType::Counter
        | ObjectType::Counter32
        | ObjectType::Gauge
        | ObjectType::Gauge32
        | ObjectType::TimeTicks
        | ObjectType::Unsigned32 => {
            let n = leading_integer(raw)?;
            let n = u32::try_from(n).map_err(|_| out_of_range(raw, ty))?;
            Ok(match ty {
                ObjectType::Counter | ObjectType::Counter32 => Value::Counter32(n),
                ObjectType::TimeTicks => Value::TimeTicks(n),
                _ => Value::Gauge32(n),
            })
        }
    }
}

/// Parse the leading integer of `input`.
///
/// Leading whitespace and one sign are accepted, a `0x`/`0X` prefix switches
/// to hexadecimal, and parsing stops at the first character that is not a
/// digit. Returns `None` when no digit was consumed. Magnitudes beyond `i128`
/// saturate, so they are always out of range for SNMP types.
pub fn parse_integer(input: &str) -> Option<i128> {
    let s = input.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: i128 = 0;
    let mut consumed = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        consumed = true;
        value = value
            .checked_mul(i128::from(radix))
            .and_then(|v| v.checked_add(i128::from(d)))
            .unwrap_or(i128::MAX);
    }

    if !consumed {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Parse `true`/`yes` and `false`/`no`, ignoring case and surrounding
/// whitespace.
pub fn parse_boolean(input: &str) -> Result<bool, ConvertError> {
    let normalized = input.trim().to_lowercase();
    match normalized.as_str() {
        "true" | "yes" => Ok(true),
        "false" | "no" => Ok(false),
        _ => Err(ConvertError::NotABoolean {
            input: normalized.into(),
        }),
    }
}

fn boolean_value(b: bool) -> Value {
    Value::Unknown {
        tag: BOOLEAN_TAG,
        data: Bytes::from_static(if b { &[0xFF] } else { &[0x00] }),
    }
}

fn parse_ip_address(input: &str) -> Result<[u8; 4], ConvertError> {
    input
        .trim()
        .parse::<Ipv4Addr>()
        .map(|addr| addr.octets())
        .map_err(|_| ConvertError::InvalidIpAddress {
            input: input.into(),
        })
}

/// Parse a dotted OID, requiring at least two arcs and valid leading arcs.
pub fn parse_oid(input: &str) -> async_snmp::Result<Oid> {
    let oid = Oid::parse(input.trim())?;
    if oid.len() < 2 {
        return Err(async_snmp::Error::InvalidOid(
            format!("'{}': expected at least two arcs", input.trim()).into(),
        )
        .boxed());
    }
    oid.validate()?;
    Ok(oid)
}

fn parse_oid_value(input: &str) -> Result<Oid, ConvertError> {
    parse_oid(input).map_err(|_| ConvertError::InvalidOid {
        input: input.into(),
    })
}

fn leading_integer(raw: &str) -> Result<i128, ConvertError> {
    parse_integer(raw).ok_or_else(|| ConvertError::NotANumber { input: raw.into() })
}

fn out_of_range(raw: &str, ty: ObjectType) -> ConvertError {
    ConvertError::OutOfRange {
        input: raw.into(),
        ty,
    }
}
