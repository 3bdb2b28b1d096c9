//! The action table offered to the host.
//!
//! Five actions write one OID each, differing only in the value type. Each
//! declares its input fields; invoking one resolves variables in the fields,
//! converts the value and produces a [`SetRequest`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dispatch::SetRequest;
use crate::error::ConvertError;
use crate::host::Host;
use crate::value::{self, ObjectType};
use crate::variables;

/// Option field holding the target OID.
pub const OPTION_OID: &str = "oid";
/// Option field holding the number type selector.
pub const OPTION_TYPE: &str = "type";
/// Option field holding the value.
pub const OPTION_VALUE: &str = "value";

/// Identifier of a user-facing action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionId {
    #[serde(rename = "setString")]
    SetString,
    #[serde(rename = "setNumber")]
    SetNumber,
    #[serde(rename = "setBoolean")]
    SetBoolean,
    #[serde(rename = "setIpAddress")]
    SetIpAddress,
    #[serde(rename = "setOID")]
    SetOid,
}

impl ActionId {
    pub const ALL: [ActionId; 5] = [
        ActionId::SetString,
        ActionId::SetNumber,
        ActionId::SetBoolean,
        ActionId::SetIpAddress,
        ActionId::SetOid,
    ];

    /// Identifier used by the host.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SetString => "setString",
            Self::SetNumber => "setNumber",
            Self::SetBoolean => "setBoolean",
            Self::SetIpAddress => "setIpAddress",
            Self::SetOid => "setOID",
        }
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown action '{}'; expected one of: setString, setNumber, setBoolean, setIpAddress, setOID",
                    s
                )
            })
    }
}

/// One entry of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub id: ObjectType,
    pub label: &'static str,
}

/// Input field of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionOption {
    #[serde(rename_all = "camelCase")]
    TextInput {
        id: &'static str,
        label: &'static str,
        default: &'static str,
        required: bool,
        use_variables: bool,
    },
    Dropdown {
        id: &'static str,
        label: &'static str,
        choices: Vec<Choice>,
        default: ObjectType,
    },
}

impl ActionOption {
    fn text(id: &'static str, label: &'static str, default: &'static str, required: bool) -> Self {
        Self::TextInput {
            id,
            label,
            default,
            required,
            use_variables: true,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::TextInput { id, .. } | Self::Dropdown { id, .. } => id,
        }
    }

    /// Value used when the host omits this field.
    pub fn default_value(&self) -> &'static str {
        match self {
            Self::TextInput { default, .. } => default,
            Self::Dropdown { default, .. } => default.label(),
        }
    }
}

/// Declaration of one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDefinition {
    pub id: ActionId,
    pub name: &'static str,
    pub options: Vec<ActionOption>,
}

impl ActionDefinition {
    fn new(id: ActionId) -> Self {
        let oid = ActionOption::text(OPTION_OID, "OID", "", true);
        let (name, options) = match id {
            ActionId::SetString => (
                "Set OID value to an OctetString",
                vec![oid, ActionOption::text(OPTION_VALUE, "Value", "", true)],
            ),
            ActionId::SetNumber => (
                "Set OID value to a Number",
                vec![
                    oid,
                    ActionOption::Dropdown {
                        id: OPTION_TYPE,
                        label: "Type",
                        choices: ObjectType::NUMERIC
                            .into_iter()
                            .map(|ty| Choice {
                                id: ty,
                                label: ty.label(),
                            })
                            .collect(),
                        default: ObjectType::Integer,
                    },
                    ActionOption::text(OPTION_VALUE, "Value", "0", false),
                ],
            ),
            ActionId::SetBoolean => (
                "Set OID value to a Boolean",
                vec![
                    oid,
                    ActionOption::text(OPTION_VALUE, "Value (true/false, yes/no)", "true", false),
                ],
            ),
            ActionId::SetIpAddress => (
                "Set OID value to an IP Address",
                vec![oid, ActionOption::text(OPTION_VALUE, "Value", "", true)],
            ),
            ActionId::SetOid => (
                "Set OID value to an OID",
                vec![oid, ActionOption::text(OPTION_VALUE, "Value", "", true)],
            ),
        };
        Self { id, name, options }
    }

    /// Look up an input field by id.
    pub fn option(&self, id: &str) -> Option<&ActionOption> {
        self.options.iter().find(|opt| opt.id() == id)
    }
}

/// Option values supplied by the host when an action runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionOptions {
    values: HashMap<String, String>,
}

impl ActionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(id, value);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(id.into(), value.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }
}

/// The registered action table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRegistry {
    definitions: Vec<ActionDefinition>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            definitions: ActionId::ALL.into_iter().map(ActionDefinition::new).collect(),
        }
    }

    pub fn definitions(&self) -> &[ActionDefinition] {
        &self.definitions
    }

    pub fn get(&self, id: ActionId) -> Option<&ActionDefinition> {
        self.definitions.iter().find(|def| def.id == id)
    }

    /// Turn an invocation of `action` into a SET request.
    ///
    /// Missing fields fall back to the declared defaults. Variable references
    /// in the OID and value are resolved through `host` before conversion.
    pub fn prepare<H: Host + ?Sized>(
        &self,
        host: &H,
        action: ActionId,
        options: &ActionOptions,
    ) -> Result<SetRequest, ConvertError> {
        let definition = self.get(action);
        let field = |id: &str| field_value(options, definition, id);

        let ty = match action {
            ActionId::SetString => ObjectType::OctetString,
            ActionId::SetBoolean => ObjectType::Boolean,
            ActionId::SetIpAddress => ObjectType::IpAddress,
            ActionId::SetOid => ObjectType::Oid,
            ActionId::SetNumber => {
                let selector = field(OPTION_TYPE);
                let ty: ObjectType = selector.parse()?;
                if !ty.is_numeric() {
                    return Err(ConvertError::NotNumericType {
                        input: selector.into(),
                    });
                }
                ty
            }
        };

        let raw = variables::resolve(host, field(OPTION_VALUE));
        let value = value::convert(ty, &raw)?;
        let oid = variables::resolve(host, field(OPTION_OID));

        Ok(SetRequest::new(oid, ty, value))
    }
}

/// Value of field `id`, or the declared default when the host omitted it.
fn field_value<'o>(
    options: &'o ActionOptions,
    definition: Option<&ActionDefinition>,
    id: &str,
) -> &'o str {
    options
        .get(id)
        .or_else(|| {
            definition
                .and_then(|def| def.option(id))
                .map(ActionOption::default_value)
        })
        .unwrap_or_default()
}
