//! Reference edit records
//!
//! Structured view of the opaque edit strings the host reports for a reference.
//! Every raw string becomes an [`EditRecord`]; strings the parser does not
//! understand are kept as [`CommandType::Unsupported`] so they can still be shown.

mod parser;

pub use parser::{join_plug, parse_edit, plug_attribute_label, root_namespace, short_name, split_plug};

use serde::{Deserialize, Serialize};

/// Kind of command an edit string records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandType {
    SetAttr,
    ConnectAttr,
    Parent,
    Unsupported,
}

impl CommandType {
    /// Map the leading token of an edit string to a command type
    pub fn from_command_name(name: &str) -> Self {
        match name {
            "setAttr" => CommandType::SetAttr,
            "connectAttr" => CommandType::ConnectAttr,
            "parent" => CommandType::Parent,
            _ => CommandType::Unsupported,
        }
    }

    /// Host command name, `None` for unsupported edits
    pub fn command_name(&self) -> Option<&'static str> {
        match self {
            CommandType::SetAttr => Some("setAttr"),
            CommandType::ConnectAttr => Some("connectAttr"),
            CommandType::Parent => Some("parent"),
            CommandType::Unsupported => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, CommandType::Unsupported)
    }
}

/// One edit string plus the fields derived from it
///
/// `target` is `None` only for unsupported edits. A target containing a `.`
/// is a plug, anything else is a bare node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    pub raw: String,
    pub command: CommandType,
    pub target: Option<String>,
    pub failed: bool,
}

impl EditRecord {
    /// Parse a raw edit string. Never fails.
    pub fn parse(raw: &str, failed: bool) -> Self {
        let (command, target) = parse_edit(raw);
        Self {
            raw: raw.to_string(),
            command,
            target,
            failed,
        }
    }

    /// True when the target addresses an attribute rather than a node
    pub fn is_plug(&self) -> bool {
        self.target.as_deref().map_or(false, |t| t.contains('.'))
    }

    /// Node the edit touches (the node half of a plug, or the bare node)
    pub fn node(&self) -> Option<&str> {
        let target = self.target.as_deref()?;
        Some(split_plug(target).map_or(target, |(node, _)| node))
    }

    /// Attribute chain of a plug target
    pub fn attribute(&self) -> Option<&str> {
        split_plug(self.target.as_deref()?).map(|(_, attr)| attr)
    }
}
