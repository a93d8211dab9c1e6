//! Core record types for the managed section of a MIB file.
//!
//! Every definition below the `ntxAlert` marker line is either an
//! object-type (a scalar value carried in traps) or a notification-type
//! (the trap itself). Both kinds are plain values: the registry owns them
//! and never edits them after insertion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── Dialect constants ─────────────────────────────────────────────

/// Marker line after which the managed definitions live.
pub const MARKER_LINE: &str = "  ntxAlert OBJECT IDENTIFIER ::= {nutanix 999}";

/// Longest name accepted for an object or trap.
pub const MAX_NAME_LEN: usize = 64;

/// First OID counter handed out to objects.
pub const FIRST_OBJECT_OID: u32 = 1;

/// First OID counter handed out to traps.
pub const FIRST_TRAP_OID: u32 = 1000;

pub const DEFAULT_ACCESS: &str = "read-only";
pub const DEFAULT_STATUS: &str = "current";

pub const OBJECT_NAME_PREFIX: &str = "ntxAlert";
pub const TRAP_NAME_PREFIX: &str = "ntxTrap";

/// Parent of every generated object OID.
pub const OBJECT_OID_PARENT: &str = "ntxAlert";

/// Parent of every generated trap OID.
pub const TRAP_OID_PARENT: &str = "nutanix";

// ── Syntax ────────────────────────────────────────────────────────

/// SYNTAX clause of an object-type.
///
/// Generated objects only ever use the four named variants. Objects read
/// from an existing file may carry any clause; those are kept verbatim in
/// `Other` so rewriting the file does not lose them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Syntax {
    Integer32,
    Counter64,
    Unsigned32,
    DisplayString,
    Other(String),
}

impl Syntax {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Integer32 => "Integer32",
            Self::Counter64 => "Counter64",
            Self::Unsigned32 => "Unsigned32",
            Self::DisplayString => "DisplayString",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Syntax {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Integer32" => Self::Integer32,
            "Counter64" => Self::Counter64,
            "Unsigned32" => Self::Unsigned32,
            "DisplayString" => Self::DisplayString,
            other => Self::Other(other.to_string()),
        })
    }
}

// ── Records ───────────────────────────────────────────────────────

/// An `OBJECT-TYPE` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub name: String,
    pub syntax: Syntax,
    pub access: String,
    pub status: String,
    /// Description text including its surrounding double quotes.
    pub description: String,
    /// Trailing OID component.
    pub oid_suffix: u32,
    /// Dotted OID path, e.g. `ntxAlert.3`.
    pub oid_path: String,
}

impl ObjectRecord {
    /// Whether two records describe the same object.
    ///
    /// Description and OID are not part of an object's identity.
    pub fn same_entity(&self, other: &Self) -> bool {
        self.name == other.name
            && self.syntax == other.syntax
            && self.access == other.access
            && self.status == other.status
    }
}

/// A `NOTIFICATION-TYPE` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapRecord {
    pub name: String,
    /// Names of the objects carried by this trap, in declaration order.
    pub members: Vec<String>,
    pub status: String,
    /// Description text including its surrounding double quotes.
    pub description: String,
    pub oid_suffix: u32,
    pub oid_path: String,
}

impl TrapRecord {
    /// Whether two records describe the same trap (name and status).
    pub fn same_entity(&self, other: &Self) -> bool {
        self.name == other.name && self.status == other.status
    }
}
