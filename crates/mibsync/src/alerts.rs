//! Loading alert plugin schemas and turning them into traps.

use std::path::Path;

use mibsync_core::schema::PluginSchemaList;

use crate::builder::trap_from_alert;
use crate::error::Result;
use crate::registry::Registry;

/// Read and decode one alert file.
///
/// A file that cannot be decoded is reported and yields `None`; read
/// failures are returned as errors.
pub fn load_alert_file(path: &Path) -> Result<Option<PluginSchemaList>> {
    let text = std::fs::read_to_string(path)?;
    match serde_json::from_str::<PluginSchemaList>(&text) {
        Ok(list) => Ok(Some(list)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Skipping malformed alert file");
            Ok(None)
        }
    }
}

/// Register a trap for every alerting check in `list`.
///
/// Returns the number of traps actually inserted.
pub fn add_traps_from_list(list: &PluginSchemaList, registry: &mut Registry) -> usize {
    let mut added = 0;

    for plugin in &list.plugin_schema_list {
        for check in &plugin.check_schema_list {
            let Some(alert) = &check.alert_config else {
                continue;
            };
            let trap = trap_from_alert(check, alert, registry);
            let name = trap.name.clone();
            if registry.insert_trap(trap) {
                tracing::debug!(trap = %name, check = %check.name, "Trap registered");
                added += 1;
            }
        }
    }

    added
}

/// Load `path` and register its traps. Malformed files add nothing.
pub fn add_traps_from_file(path: &Path, registry: &mut Registry) -> Result<usize> {
    let Some(list) = load_alert_file(path)? else {
        return Ok(0);
    };
    Ok(add_traps_from_list(&list, registry))
}
