//! Plain-data export of the current tree

use super::{EditCounts, ReferenceTree};
use crate::edits::EditRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditReport {
    pub generated_at: DateTime<Utc>,
    pub references: Vec<ReferenceSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSection {
    pub reference_node: String,
    pub loaded: bool,
    pub counts: EditCounts,
    pub edits: Vec<EditRecord>,
}

impl ReferenceTree {
    pub fn report(&self) -> EditReport {
        let references = self
            .references
            .iter()
            .map(|reference| {
                let mut edits = Vec::new();
                reference.walk(&mut |entry| {
                    if let Some(record) = entry.record() {
                        edits.push(record.clone());
                    }
                });
                ReferenceSection {
                    reference_node: reference.reference_node.clone(),
                    loaded: matches!(reference.kind, super::EntryKind::Reference { loaded: true }),
                    counts: reference.edit_counts(),
                    edits,
                }
            })
            .collect();

        EditReport {
            generated_at: Utc::now(),
            references,
        }
    }
}

impl EditReport {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize edit report: {}", e))
    }
}
