//! Line-oriented parser for the managed section of the MIB.
//!
//! Everything before the `ntxAlert` marker line is ignored. After it the
//! parser walks the file one line at a time:
//!
//! ```text
//! BeforeMarker --marker--> TopLevel --DESCRIPTION--> InsideDescription
//!                             ^                            |
//!                             +-------- second `"` --------+
//! ```
//!
//! A header line (`name OBJECT-TYPE` / `name NOTIFICATION-TYPE`) opens a
//! draft; clause lines fill it; the `::=` line closes it and hands the
//! finished record to the registry. A trap's `OBJECTS` clause opens a scan
//! that keeps collecting lines until two `}` have been seen; unlike a
//! description, those lines are still dispatched as clauses.

use std::path::Path;
use std::sync::LazyLock;

use mibsync_core::types::{DEFAULT_ACCESS, DEFAULT_STATUS, MARKER_LINE};
use mibsync_core::{ObjectRecord, Syntax, TrapRecord};
use regex::Regex;

use crate::error::Result;
use crate::registry::Registry;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid number pattern"));

static OID_BRACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{([^"]*)\}"#).expect("valid OID pattern"));

/// Parse the MIB file at `path`.
pub fn parse_file(path: &Path) -> Result<Registry> {
    let text = std::fs::read_to_string(path)?;
    let registry = parse_str(&text);

    tracing::info!(
        path = %path.display(),
        objects = registry.objects().len(),
        traps = registry.traps().len(),
        "Parsed MIB"
    );

    Ok(registry)
}

/// Parse MIB text held in memory.
pub fn parse_str(text: &str) -> Registry {
    let mut parser = MibParser::new();
    for line in text.lines() {
        parser.feed(line);
    }
    parser.finish()
}

/// Incremental parser. Feed lines in file order, then call [`finish`].
///
/// [`finish`]: MibParser::finish
#[derive(Debug)]
pub struct MibParser {
    state: State,
    draft: Option<Draft>,
    registry: Registry,
}

#[derive(Debug)]
enum State {
    BeforeMarker,
    TopLevel,
    InsideDescription(Block),
}

/// Text collected until a terminator character has been seen twice.
#[derive(Debug)]
struct Block {
    terminator: char,
    seen: usize,
    text: String,
}

impl Block {
    fn open(terminator: char, line: &str) -> Self {
        let mut block = Self {
            terminator,
            seen: 0,
            text: String::new(),
        };
        block.push(line);
        block
    }

    fn push(&mut self, line: &str) {
        self.seen += line.matches(self.terminator).count();
        self.text.push_str(line);
        self.text.push('\n');
    }

    fn is_closed(&self) -> bool {
        self.seen >= 2
    }

    /// Text between the first and second `"`, quotes restored.
    fn quoted(&self) -> String {
        let inner = self.text.split('"').nth(1).unwrap_or_default();
        format!("\"{inner}\"")
    }

    /// Comma-separated names inside the first `{ … }` group.
    fn member_list(&self) -> Vec<String> {
        let Some((_, rest)) = self.text.split_once('{') else {
            return Vec::new();
        };
        let group = rest.split('}').next().unwrap_or_default();
        let compact: String = group.chars().filter(|c| !c.is_whitespace()).collect();
        compact
            .split(',')
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }
}

#[derive(Debug)]
enum Draft {
    Object(ObjectDraft),
    Trap(TrapDraft),
}

impl Draft {
    fn name(&self) -> &str {
        match self {
            Self::Object(o) => &o.name,
            Self::Trap(t) => &t.name,
        }
    }

    fn set_status(&mut self, status: String) {
        match self {
            Self::Object(o) => o.status = Some(status),
            Self::Trap(t) => t.status = Some(status),
        }
    }

    fn set_description(&mut self, description: String) {
        match self {
            Self::Object(o) => o.description = Some(description),
            Self::Trap(t) => t.description = Some(description),
        }
    }
}

#[derive(Debug)]
struct ObjectDraft {
    name: String,
    syntax: Option<Syntax>,
    access: Option<String>,
    status: Option<String>,
    description: Option<String>,
}

#[derive(Debug)]
struct TrapDraft {
    name: String,
    members: Vec<String>,
    objects_scan: Option<Block>,
    status: Option<String>,
    description: Option<String>,
}

impl TrapDraft {
    fn resolve_members(&mut self) {
        if let Some(scan) = self.objects_scan.take() {
            self.members = scan.member_list();
        }
    }
}

impl Default for MibParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MibParser {
    pub fn new() -> Self {
        Self {
            state: State::BeforeMarker,
            draft: None,
            registry: Registry::new(),
        }
    }

    /// Whether the marker line has been seen.
    pub fn marker_seen(&self) -> bool {
        !matches!(self.state, State::BeforeMarker)
    }

    pub fn feed(&mut self, line: &str) {
        match &mut self.state {
            State::BeforeMarker => {
                if line.trim_end() == MARKER_LINE {
                    self.state = State::TopLevel;
                }
            }
            State::InsideDescription(block) => {
                block.push(line);
                let closed = block.is_closed().then(|| block.quoted());
                self.push_objects_scan(line);
                if let Some(description) = closed {
                    if let Some(draft) = self.draft.as_mut() {
                        draft.set_description(description);
                    }
                    self.state = State::TopLevel;
                }
            }
            State::TopLevel => {
                self.push_objects_scan(line);
                self.dispatch(line);
            }
        }
    }

    /// Drop any unfinished draft and return the collected records.
    pub fn finish(mut self) -> Registry {
        if let Some(draft) = self.draft.take() {
            tracing::debug!(name = draft.name(), "Definition without ::= dropped");
        }
        if !self.marker_seen() {
            tracing::warn!("Marker line not found, no definitions parsed");
        }
        self.registry
    }

    fn push_objects_scan(&mut self, line: &str) {
        if let Some(Draft::Trap(trap)) = self.draft.as_mut() {
            if let Some(scan) = trap.objects_scan.as_mut() {
                scan.push(line);
                if scan.is_closed() {
                    trap.resolve_members();
                }
            }
        }
    }

    fn dispatch(&mut self, line: &str) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (Some(&first), Some(&last)) = (tokens.first(), tokens.last()) else {
            return;
        };

        match last {
            "OBJECT-TYPE" => {
                self.open_draft(Draft::Object(ObjectDraft {
                    name: first.to_string(),
                    syntax: None,
                    access: None,
                    status: None,
                    description: None,
                }));
                return;
            }
            "NOTIFICATION-TYPE" => {
                self.open_draft(Draft::Trap(TrapDraft {
                    name: first.to_string(),
                    members: Vec::new(),
                    objects_scan: None,
                    status: None,
                    description: None,
                }));
                return;
            }
            _ => {}
        }

        if first == "::=" {
            self.close_draft(line);
            return;
        }

        let Some(draft) = self.draft.as_mut() else {
            return;
        };

        match (first, draft) {
            ("SYNTAX", Draft::Object(object)) => {
                let clause = line.trim().trim_start_matches("SYNTAX").trim();
                if !clause.is_empty() {
                    object.syntax = clause.parse().ok();
                }
            }
            ("MAX-ACCESS", Draft::Object(object)) => {
                object.access = Some(last.to_string());
            }
            ("OBJECTS", Draft::Trap(trap)) => {
                trap.objects_scan = Some(Block::open('}', line));
                if trap.objects_scan.as_ref().is_some_and(Block::is_closed) {
                    trap.resolve_members();
                }
            }
            ("STATUS", draft) => draft.set_status(last.to_string()),
            ("DESCRIPTION", _) if !line.contains('"') => {}
            ("DESCRIPTION", draft) => {
                let block = Block::open('"', line);
                if block.is_closed() {
                    draft.set_description(block.quoted());
                } else {
                    self.state = State::InsideDescription(block);
                }
            }
            _ => {}
        }
    }

    fn open_draft(&mut self, draft: Draft) {
        if let Some(previous) = self.draft.replace(draft) {
            tracing::debug!(name = previous.name(), "Definition without ::= dropped");
        }
    }

    fn close_draft(&mut self, line: &str) {
        let Some(draft) = self.draft.take() else {
            return;
        };

        let counter = FIRST_NUMBER
            .find(line)
            .and_then(|m| m.as_str().parse::<u32>().ok());
        let oid_path = OID_BRACES.captures(line).map(|caps| {
            caps[1]
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(".")
        });

        let (Some(oid_suffix), Some(oid_path)) = (counter, oid_path) else {
            tracing::warn!(name = draft.name(), line = %line.trim(), "Unreadable OID, definition dropped");
            return;
        };

        match draft {
            Draft::Object(object) => {
                let syntax = object.syntax.unwrap_or_else(|| {
                    tracing::debug!(name = %object.name, "Object without SYNTAX");
                    Syntax::Other(String::new())
                });
                self.registry.insert_object(ObjectRecord {
                    name: object.name,
                    syntax,
                    access: object.access.unwrap_or_else(|| DEFAULT_ACCESS.to_string()),
                    status: object.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
                    description: object.description.unwrap_or_default(),
                    oid_suffix,
                    oid_path,
                });
            }
            Draft::Trap(mut trap) => {
                trap.resolve_members();
                self.registry.insert_trap(TrapRecord {
                    name: trap.name,
                    members: trap.members,
                    status: trap.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
                    description: trap.description.unwrap_or_default(),
                    oid_suffix,
                    oid_path,
                });
            }
        }
    }
}
