//! The field update applier — validates and merges a batch of
//! (field name, value) pairs into a day record.
//!
//! Pure: the caller owns the single store write. All accepted pairs land
//! on one in-memory copy, so a failed write leaves no partial state.

use daybook_core::record::{DayRecord, NOTES_SENTINEL, slot};
use tracing::warn;

/// The fixed message returned when no pair was accepted.
pub const NO_FIELDS_UPDATED: &str = "No fields were updated.";

/// The outcome of applying a batch of field updates.
#[derive(Debug)]
pub struct Applied {
    /// The record with all accepted pairs merged in
    pub record: DayRecord,

    /// One line per accepted pair, for the model and the human
    pub summary: String,

    /// How many pairs were accepted; 0 means the caller must not write
    pub accepted: usize,
}

/// Apply field updates to a copy of `record`, in the order given.
///
/// Per pair: empty values are skipped silently; unknown field names are
/// skipped with a warning and never abort the batch. Every slot is a
/// plain replace except Notes, which accumulates bullet lines:
/// unset or sentinel notes become `- <value>`, anything else gets
/// `\n- <value>` appended.
pub fn apply(record: &DayRecord, pairs: &[(String, String)]) -> Applied {
    let mut updated = record.clone();
    let mut lines = Vec::new();

    for (name, value) in pairs {
        if value.is_empty() {
            continue;
        }

        let Some(accessor) = slot(name) else {
            warn!(field = %name, "Skipping unknown record field");
            continue;
        };

        if name == "Notes" {
            let bullet = format!("- {value}");
            let merged = match (accessor.get)(&updated) {
                None => bullet.clone(),
                Some(NOTES_SENTINEL) => bullet.clone(),
                Some(existing) => format!("{existing}\n{bullet}"),
            };
            (accessor.set)(&mut updated, merged);
            lines.push(format!("Notes appended: '{bullet}'"));
        } else {
            (accessor.set)(&mut updated, value.clone());
            lines.push(format!("{name} = '{value}'"));
        }
    }

    let accepted = lines.len();
    let summary = if accepted == 0 {
        NO_FIELDS_UPDATED.to_string()
    } else {
        lines.join("\n")
    };

    Applied {
        record: updated,
        summary,
        accepted,
    }
}
