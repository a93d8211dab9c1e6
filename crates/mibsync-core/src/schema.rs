//! Alert plugin-schema model and message descriptors.
//!
//! Alert files are JSON serializations of a `PluginSchemaList` message.
//! Only the fields the MIB generator reads are modelled; everything else in
//! the file is ignored during deserialization.
//!
//! `MessageDescriptor` carries the field metadata (name, type code, label
//! code) that protobuf reflection would otherwise provide. The codes follow
//! `google.protobuf.FieldDescriptorProto`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ── Alert files ───────────────────────────────────────────────────

/// Root message of an alert file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginSchemaList {
    #[serde(default)]
    pub plugin_schema_list: Vec<PluginSchema>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginSchema {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub check_schema_list: Vec<CheckSchema>,
}

/// A single health check. Only checks with an `alert_config` raise alerts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckSchema {
    /// Symbolic check name, e.g. `high_cpu_usage_check`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alert_config: Option<AlertConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default)]
    pub alert_title: String,
    #[serde(default)]
    pub alert_id: Option<AlertId>,
}

/// Alert identifier. Older schema files store it as a number, newer ones
/// as a string such as `A1050`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlertId {
    Number(i64),
    Text(String),
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

// ── Descriptors ───────────────────────────────────────────────────

/// Wire type of a message field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Group,
    Message,
    Bytes,
    Uint32,
    Enum,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Double => "TYPE_DOUBLE",
            Self::Float => "TYPE_FLOAT",
            Self::Int64 => "TYPE_INT64",
            Self::Uint64 => "TYPE_UINT64",
            Self::Int32 => "TYPE_INT32",
            Self::Fixed64 => "TYPE_FIXED64",
            Self::Fixed32 => "TYPE_FIXED32",
            Self::Bool => "TYPE_BOOL",
            Self::String => "TYPE_STRING",
            Self::Group => "TYPE_GROUP",
            Self::Message => "TYPE_MESSAGE",
            Self::Bytes => "TYPE_BYTES",
            Self::Uint32 => "TYPE_UINT32",
            Self::Enum => "TYPE_ENUM",
        }
    }
}

impl TryFrom<i32> for FieldType {
    type Error = CoreError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Ok(match code {
            1 => Self::Double,
            2 => Self::Float,
            3 => Self::Int64,
            4 => Self::Uint64,
            5 => Self::Int32,
            6 => Self::Fixed64,
            7 => Self::Fixed32,
            8 => Self::Bool,
            9 => Self::String,
            10 => Self::Group,
            11 => Self::Message,
            12 => Self::Bytes,
            13 => Self::Uint32,
            14 => Self::Enum,
            _ => return Err(CoreError::UnknownFieldType(code)),
        })
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cardinality of a message field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldLabel {
    Optional,
    Required,
    Repeated,
}

impl FieldLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Optional => "LABEL_OPTIONAL",
            Self::Required => "LABEL_REQUIRED",
            Self::Repeated => "LABEL_REPEATED",
        }
    }
}

impl TryFrom<i32> for FieldLabel {
    type Error = CoreError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Optional),
            2 => Ok(Self::Required),
            3 => Ok(Self::Repeated),
            _ => Err(CoreError::UnknownFieldLabel(code)),
        }
    }
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw field metadata, codes left undecoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub number: i32,
    #[serde(rename = "type")]
    pub type_code: i32,
    #[serde(rename = "label")]
    pub label_code: i32,
}

impl FieldDescriptor {
    pub fn new(name: &str, number: i32, type_code: i32, label_code: i32) -> Self {
        Self {
            name: name.to_string(),
            number,
            type_code,
            label_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    /// Descriptor of the `PluginSchema.CheckSchema` message.
    pub fn check_schema() -> Self {
        Self {
            name: "PluginSchema.CheckSchema".to_string(),
            fields: vec![
                FieldDescriptor::new("name", 1, 9, 2),
                FieldDescriptor::new("check_id", 2, 3, 1),
                FieldDescriptor::new("title", 3, 9, 1),
                FieldDescriptor::new("description", 4, 9, 1),
                FieldDescriptor::new("causes", 5, 9, 3),
                FieldDescriptor::new("resolutions", 6, 9, 3),
                FieldDescriptor::new("impact", 7, 9, 1),
                FieldDescriptor::new("kb_list", 8, 9, 3),
                FieldDescriptor::new("severity", 9, 14, 1),
                FieldDescriptor::new("alert_config", 10, 11, 1),
                FieldDescriptor::new("enabled", 11, 8, 1),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_codes_decode() {
        assert_eq!(FieldType::try_from(3).unwrap(), FieldType::Int64);
        assert_eq!(FieldType::try_from(14).unwrap(), FieldType::Enum);
        assert_eq!(FieldLabel::try_from(3).unwrap(), FieldLabel::Repeated);
        assert_eq!(FieldType::Uint64.to_string(), "TYPE_UINT64");
    }

    #[test]
    fn test_unknown_codes_rejected() {
        assert_eq!(FieldType::try_from(15), Err(CoreError::UnknownFieldType(15)));
        assert_eq!(FieldType::try_from(0), Err(CoreError::UnknownFieldType(0)));
        assert_eq!(FieldLabel::try_from(4), Err(CoreError::UnknownFieldLabel(4)));
    }

    #[test]
    fn test_parse_alert_file() {
        let json = r#"{
            "plugin_schema_list": [{
                "name": "network_checks",
                "check_schema_list": [
                    {
                        "name": "duplicate_ip_check",
                        "description": "Duplicate IP detected",
                        "causes": ["ignored"],
                        "alert_config": {"alert_title": "Duplicate IP", "alert_id": 1050}
                    },
                    {"name": "no_alert_check"}
                ]
            }]
        }"#;

        let list: PluginSchemaList = serde_json::from_str(json).unwrap();
        let checks = &list.plugin_schema_list[0].check_schema_list;
        assert_eq!(checks.len(), 2);

        let alert = checks[0].alert_config.as_ref().unwrap();
        assert_eq!(alert.alert_title, "Duplicate IP");
        assert_eq!(alert.alert_id, Some(AlertId::Number(1050)));
        assert!(checks[1].alert_config.is_none());
    }

    #[test]
    fn test_alert_id_accepts_strings() {
        let alert: AlertConfig =
            serde_json::from_str(r#"{"alert_title": "x", "alert_id": "A1050"}"#).unwrap();
        assert_eq!(alert.alert_id.unwrap().to_string(), "A1050");
    }

    #[test]
    fn test_descriptor_from_json() {
        let json = r#"{"name": "AlertConfig", "fields": [
            {"name": "alert_title", "number": 1, "type": 9, "label": 2}
        ]}"#;
        let desc: MessageDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(desc.fields[0], FieldDescriptor::new("alert_title", 1, 9, 2));
    }
}
