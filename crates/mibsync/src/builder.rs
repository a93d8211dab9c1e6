//! Record builders: catalog attributes become object-types, alert
//! configurations become notification-types.
//!
//! OIDs are taken from the registry's counters at build time. Building does
//! not insert; callers pass the result to the registry.

use mibsync_core::schema::{AlertConfig, CheckSchema, FieldType};
use mibsync_core::types::{
    DEFAULT_ACCESS, DEFAULT_STATUS, MAX_NAME_LEN, OBJECT_NAME_PREFIX, OBJECT_OID_PARENT,
    TRAP_NAME_PREFIX, TRAP_OID_PARENT,
};
use mibsync_core::{ObjectRecord, Syntax, TrapRecord};

use crate::catalog::AttributeCatalog;
use crate::error::{Result, SyncError};
use crate::registry::Registry;

/// Capitalize each space-separated word, join them, and keep only ASCII
/// letters and digits.
///
/// `"disk space_low"` becomes `"DiskSpacelow"`.
pub fn title_case(input: &str) -> String {
    input
        .split(' ')
        .filter(|word| !word.is_empty())
        .flat_map(|word| {
            let mut chars = word.chars();
            let first = chars.next().into_iter().flat_map(char::to_uppercase);
            first.chain(chars)
        })
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// SNMP syntax used for an attribute of the given wire type.
pub fn syntax_for(field_type: FieldType) -> Syntax {
    match field_type {
        FieldType::Int64 | FieldType::Bool => Syntax::Counter64,
        FieldType::String => Syntax::DisplayString,
        _ => Syntax::DisplayString,
    }
}

/// Build the object-type carrying an alert attribute.
pub fn object_from_attribute(
    attribute: &str,
    catalog: &AttributeCatalog,
    registry: &Registry,
) -> Result<ObjectRecord> {
    let info = catalog
        .get(attribute)
        .ok_or_else(|| SyncError::UnknownAttribute(attribute.to_string()))?;

    let title = title_case(attribute);
    let name = format!("{OBJECT_NAME_PREFIX}{title}");
    if name.len() > MAX_NAME_LEN {
        return Err(SyncError::NameTooLong {
            name,
            max: MAX_NAME_LEN,
        });
    }

    let oid_suffix = registry.next_object_oid();
    Ok(ObjectRecord {
        name,
        syntax: syntax_for(info.field_type),
        access: DEFAULT_ACCESS.to_string(),
        status: DEFAULT_STATUS.to_string(),
        description: format!("\"Alert {title} defined new.\""),
        oid_suffix,
        oid_path: format!("{OBJECT_OID_PARENT}.{oid_suffix}"),
    })
}

/// Build the notification-type raised by an alerting check.
///
/// Every object already in the registry is listed as a member. Titles that
/// would produce a name over the length limit fall back to the alert id, or
/// to the check name when the alert has no id.
pub fn trap_from_alert(check: &CheckSchema, alert: &AlertConfig, registry: &Registry) -> TrapRecord {
    let mut name = format!("{TRAP_NAME_PREFIX}{}", title_case(&alert.alert_title));
    if name.len() > MAX_NAME_LEN {
        match &alert.alert_id {
            Some(alert_id) => {
                tracing::debug!(title = %alert.alert_title, %alert_id, "Trap name too long, using alert id");
                name = format!("{TRAP_NAME_PREFIX}{alert_id}");
            }
            None => {
                tracing::warn!(
                    title = %alert.alert_title,
                    check = %check.name,
                    "Trap name too long and no alert id, using check name"
                );
                name = format!("{TRAP_NAME_PREFIX}{}", title_case(&check.name.replace('_', " ")));
            }
        }
    }

    let text = match &check.description {
        Some(description) => description.clone(),
        None => check.name.replace('_', " "),
    };

    let oid_suffix = registry.next_trap_oid();
    TrapRecord {
        name,
        members: registry.objects().iter().map(|o| o.name.clone()).collect(),
        status: DEFAULT_STATUS.to_string(),
        description: format!("\" {text} .\""),
        oid_suffix,
        oid_path: format!("{TRAP_OID_PARENT}.{oid_suffix}"),
    }
}
