//! End-to-end MIB generation.
//!
//! parse existing MIB → register configured attributes → register a trap
//! per alerting check → rewrite the MIB. Objects are registered before any
//! trap so every new trap carries them.

use std::path::{Path, PathBuf};

use mibsync_core::schema::MessageDescriptor;

use crate::alerts::add_traps_from_file;
use crate::builder::object_from_attribute;
use crate::catalog::AttributeCatalog;
use crate::config::SyncConfig;
use crate::emit::render_registry;
use crate::error::Result;
use crate::parser::parse_file;
use crate::registry::Registry;
use crate::rewrite::rewrite_file;
use crate::walk::find_alert_files;

/// Counts describing one sync run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    pub existing_objects: usize,
    pub existing_traps: usize,
    pub objects_added: usize,
    pub traps_added: usize,
    pub alert_files: usize,
    /// Whether the MIB file was rewritten.
    pub spliced: bool,
}

/// Registry contents after all additions, not yet written.
#[derive(Debug)]
pub struct SyncPlan {
    pub registry: Registry,
    pub summary: SyncSummary,
}

impl SyncPlan {
    /// Text that will follow the marker line.
    pub fn rendered(&self) -> String {
        render_registry(&self.registry)
    }
}

/// Build the attribute catalog from the configured or built-in descriptor.
pub fn load_catalog(config: &SyncConfig) -> Result<AttributeCatalog> {
    match &config.descriptor_path {
        Some(path) => AttributeCatalog::from_descriptor_file(Path::new(path)),
        None => AttributeCatalog::from_descriptor(&MessageDescriptor::check_schema()),
    }
}

/// Parse the MIB and register every configured attribute and alert.
pub fn plan_sync(config: &SyncConfig, alert_files: &[PathBuf]) -> Result<SyncPlan> {
    let catalog = load_catalog(config)?;
    let mut registry = parse_file(Path::new(&config.mib_path))?;

    let mut summary = SyncSummary {
        existing_objects: registry.objects().len(),
        existing_traps: registry.traps().len(),
        alert_files: alert_files.len(),
        ..Default::default()
    };

    for attribute in &config.attributes {
        let object = object_from_attribute(attribute, &catalog, &registry)?;
        if registry.insert_object(object) {
            summary.objects_added += 1;
        }
    }

    for path in alert_files {
        summary.traps_added += add_traps_from_file(path, &mut registry)?;
    }

    tracing::info!(
        objects_added = summary.objects_added,
        traps_added = summary.traps_added,
        alert_files = summary.alert_files,
        "Sync planned"
    );

    Ok(SyncPlan { registry, summary })
}

/// Write a plan back to the configured MIB.
pub fn apply_plan(config: &SyncConfig, plan: SyncPlan) -> Result<SyncSummary> {
    let outcome = rewrite_file(Path::new(&config.mib_path), &plan.rendered())?;
    Ok(SyncSummary {
        spliced: outcome.spliced,
        ..plan.summary
    })
}

/// Full run over every alert file under `config.alert_dir`.
pub fn run_sync(config: &SyncConfig) -> Result<SyncSummary> {
    let files = find_alert_files(Path::new(&config.alert_dir), &config.alert_extension)?;
    let plan = plan_sync(config, &files)?;
    apply_plan(config, plan)
}
