//! Render records back into MIB text.
//!
//! The layout (leading blank line, indentation, column padding) matches the
//! hand-maintained file so regenerated sections diff cleanly.

use std::fmt::Write;

use mibsync_core::{ObjectRecord, TrapRecord};

use crate::registry::Registry;

pub fn render_object(object: &ObjectRecord) -> String {
    format!(
        "\n  {name}    OBJECT-TYPE\n    SYNTAX               {syntax}\n    MAX-ACCESS           {access}\n    STATUS               {status}\n    DESCRIPTION          {description}\n    ::= {{{oid}}}\n",
        name = object.name,
        syntax = object.syntax,
        access = object.access,
        status = object.status,
        description = object.description,
        oid = object.oid_path.replace('.', " "),
    )
}

pub fn render_trap(trap: &TrapRecord) -> String {
    format!(
        "\n  {name}   NOTIFICATION-TYPE\n     OBJECTS             {{ {members} }}\n     STATUS                {status}\n     DESCRIPTION           {description}\n     ::= {{ nutanix {counter}}}\n",
        name = trap.name,
        members = trap.members.join(", "),
        status = trap.status,
        description = trap.description,
        counter = trap.oid_suffix,
    )
}

/// All objects, then all traps, in insertion order.
pub fn render_registry(registry: &Registry) -> String {
    let mut out = String::new();
    for object in registry.objects() {
        out.push_str(&render_object(object));
    }
    for trap in registry.traps() {
        out.push_str(&render_trap(trap));
    }
    out
}

/// One-line-per-record listing of the registry contents.
pub fn render_listing(registry: &Registry) -> String {
    let mut out = String::new();
    for object in registry.objects() {
        let _ = writeln!(
            out,
            "object {:<40} {:<16} {}",
            object.name, object.oid_path, object.syntax
        );
    }
    for trap in registry.traps() {
        let _ = writeln!(
            out,
            "trap   {:<40} {:<16} {} objects",
            trap.name,
            trap.oid_path,
            trap.members.len()
        );
    }
    out
}
