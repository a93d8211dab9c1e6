//! De-duplicating registry of object and trap records.
//!
//! Records keep insertion order, which is also the order they are written
//! back to the MIB. Each kind carries its own OID counter: the next counter
//! is always one past the largest counter ever inserted.

use mibsync_core::types::{FIRST_OBJECT_OID, FIRST_TRAP_OID, TRAP_NAME_PREFIX};
use mibsync_core::{ObjectRecord, TrapRecord};

use crate::builder::title_case;

#[derive(Debug, Clone)]
pub struct Registry {
    objects: Vec<ObjectRecord>,
    traps: Vec<TrapRecord>,
    next_object_oid: u32,
    next_trap_oid: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            traps: Vec::new(),
            next_object_oid: FIRST_OBJECT_OID,
            next_trap_oid: FIRST_TRAP_OID,
        }
    }

    /// Insert an object unless an equal one is already present.
    ///
    /// Returns `true` when the object was added.
    pub fn insert_object(&mut self, object: ObjectRecord) -> bool {
        if self.objects.iter().any(|o| o.same_entity(&object)) {
            tracing::debug!(name = %object.name, "Duplicate object ignored");
            return false;
        }
        self.next_object_oid = self.next_object_oid.max(object.oid_suffix.saturating_add(1));
        self.objects.push(object);
        true
    }

    /// Insert a trap unless one with the same name and status exists.
    ///
    /// Returns `true` when the trap was added.
    pub fn insert_trap(&mut self, trap: TrapRecord) -> bool {
        if self.traps.iter().any(|t| t.same_entity(&trap)) {
            tracing::debug!(name = %trap.name, "Duplicate trap ignored");
            return false;
        }
        self.next_trap_oid = self.next_trap_oid.max(trap.oid_suffix.saturating_add(1));
        self.traps.push(trap);
        true
    }

    /// Remove an object exactly equal to `object`. Counters are not rewound.
    pub fn remove_object(&mut self, object: &ObjectRecord) -> bool {
        match self.objects.iter().position(|o| o == object) {
            Some(idx) => {
                self.objects.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove a trap exactly equal to `trap`. Counters are not rewound.
    pub fn remove_trap(&mut self, trap: &TrapRecord) -> bool {
        match self.traps.iter().position(|t| t == trap) {
            Some(idx) => {
                self.traps.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Find the trap generated for an alert title.
    pub fn find_trap_for_alert(&self, alert_title: &str) -> Option<&TrapRecord> {
        let name = format!("{TRAP_NAME_PREFIX}{}", title_case(alert_title));
        self.traps.iter().find(|t| t.name == name)
    }

    pub fn objects(&self) -> &[ObjectRecord] {
        &self.objects
    }

    pub fn traps(&self) -> &[TrapRecord] {
        &self.traps
    }

    pub fn next_object_oid(&self) -> u32 {
        self.next_object_oid
    }

    pub fn next_trap_oid(&self) -> u32 {
        self.next_trap_oid
    }
}

#[cfg(test)]
mod tests {
    use mibsync_core::Syntax;

    use super::*;

    fn object(name: &str, oid: u32) -> ObjectRecord {
        ObjectRecord {
            name: name.to_string(),
            syntax: Syntax::DisplayString,
            access: "read-only".to_string(),
            status: "current".to_string(),
            description: format!("\"{name}\""),
            oid_suffix: oid,
            oid_path: format!("ntxAlert.{oid}"),
        }
    }

    fn trap(name: &str, oid: u32) -> TrapRecord {
        TrapRecord {
            name: name.to_string(),
            members: Vec::new(),
            status: "current".to_string(),
            description: "\" test .\"".to_string(),
            oid_suffix: oid,
            oid_path: format!("nutanix.{oid}"),
        }
    }

    #[test]
    fn test_counters_start_at_defaults() {
        let registry = Registry::new();
        assert_eq!(registry.next_object_oid(), 1);
        assert_eq!(registry.next_trap_oid(), 1000);
    }

    #[test]
    fn test_duplicate_object_ignored() {
        let mut registry = Registry::new();
        assert!(registry.insert_object(object("ntxAlertTitle", 1)));

        let mut dup = object("ntxAlertTitle", 5);
        dup.description = "\"other text\"".to_string();
        assert!(!registry.insert_object(dup));

        assert_eq!(registry.objects().len(), 1);
        assert_eq!(registry.next_object_oid(), 2);
    }

    #[test]
    fn test_duplicate_trap_ignored() {
        let mut registry = Registry::new();
        assert!(registry.insert_trap(trap("ntxTrapDiskFull", 1000)));
        assert!(!registry.insert_trap(trap("ntxTrapDiskFull", 1001)));
        assert_eq!(registry.traps().len(), 1);
        assert_eq!(registry.next_trap_oid(), 1001);
    }

    #[test]
    fn test_counter_tracks_maximum() {
        let mut registry = Registry::new();
        registry.insert_object(object("ntxAlertA", 7));
        registry.insert_object(object("ntxAlertB", 3));
        assert_eq!(registry.next_object_oid(), 8);

        registry.insert_trap(trap("ntxTrapA", 1040));
        registry.insert_trap(trap("ntxTrapB", 1002));
        assert_eq!(registry.next_trap_oid(), 1041);
    }

    #[test]
    fn test_low_trap_counter_does_not_lower_start() {
        let mut registry = Registry::new();
        registry.insert_trap(trap("ntxTrapLegacy", 12));
        assert_eq!(registry.next_trap_oid(), 1000);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut registry = Registry::new();
        registry.insert_object(object("ntxAlertZ", 2));
        registry.insert_object(object("ntxAlertA", 1));
        let names: Vec<_> = registry.objects().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["ntxAlertZ", "ntxAlertA"]);
    }

    #[test]
    fn test_remove_keeps_counters() {
        let mut registry = Registry::new();
        let obj = object("ntxAlertTitle", 4);
        registry.insert_object(obj.clone());
        assert!(registry.remove_object(&obj));
        assert!(!registry.remove_object(&obj));
        assert!(registry.objects().is_empty());
        assert_eq!(registry.next_object_oid(), 5);

        let t = trap("ntxTrapX", 1003);
        registry.insert_trap(t.clone());
        assert!(registry.remove_trap(&t));
        assert!(registry.traps().is_empty());
        assert_eq!(registry.next_trap_oid(), 1004);
    }

    #[test]
    fn test_find_trap_for_alert() {
        let mut registry = Registry::new();
        registry.insert_trap(trap("ntxTrapDiskSpaceLow", 1000));
        assert!(registry.find_trap_for_alert("disk space low").is_some());
        assert!(registry.find_trap_for_alert("Disk Space Low").is_some());
        assert!(registry.find_trap_for_alert("disk full").is_none());
    }
}
