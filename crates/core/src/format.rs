//! Record formatting — pure, deterministic rendering of day records.
//!
//! Two views with intentionally different coverage:
//! - `format_single` is exhaustive: every slot, fixed order, with
//!   "Not recorded" for unset slots. Used for today's log in the system
//!   context, where the model needs to see what is still missing.
//! - `format_range` is summary-oriented: only recorded slots, whole
//!   groups dropped when empty, notes dropped when unset or equal to
//!   the "None" sentinel. Used for history tool results.

use crate::record::{DayRecord, NOTES_SENTINEL, SLOTS, SlotAccessor, display_date};

/// The fixed reply when a history query matches nothing.
pub const NO_DATA_FOUND: &str = "No data found for the requested date range.";

/// Human label for a slot's wire name.
fn label(name: &str) -> String {
    match name {
        "WakeUp" => "Wake up".into(),
        "BedtimeInCrib" => "Bedtime - In crib".into(),
        "BedtimeAsleep" => "Bedtime - Fell asleep".into(),
        "Feed" => "Feed".into(),
        "Notes" => "Notes".into(),
        n if n.starts_with("Nap") => {
            let nap = &n[3..4];
            let event = match &n[4..] {
                "InCrib" => "In crib",
                "Asleep" => "Fell asleep",
                _ => "Woke up",
            };
            format!("Nap {nap} - {event}")
        }
        n if n.starts_with("NightWaking") => format!("Night waking {}", &n[11..]),
        n => n.into(),
    }
}

/// Render one record exhaustively, every slot in canonical order.
///
/// Pure function of its input; always succeeds.
pub fn format_single(record: &DayRecord, display: &str) -> String {
    let mut out = format!("Log for {display}:\n");
    for accessor in SLOTS {
        let value = (accessor.get)(record).unwrap_or("Not recorded");
        out.push_str(&format!("{}: {}\n", label(accessor.name), value));
    }
    out
}

/// Render one record for today using its own day key as the display date.
pub fn format_today(record: &DayRecord) -> String {
    format_single(record, &display_date(&record.day_key))
}

fn group(prefix: &str) -> Vec<&'static SlotAccessor> {
    SLOTS.iter().filter(|s| s.name.starts_with(prefix)).collect()
}

/// Append a group's recorded slots to `out`; an all-unset group writes nothing.
fn push_group(out: &mut String, record: &DayRecord, slots: &[&SlotAccessor]) {
    for accessor in slots {
        if let Some(value) = (accessor.get)(record) {
            out.push_str(&format!("{}: {}\n", label(accessor.name), value));
        }
    }
}

/// Render a list of records as one section per day, ascending by day key.
///
/// Empty input yields the fixed no-data message. Groups with nothing
/// recorded are omitted; notes are omitted when unset or equal to the
/// "None" sentinel (the single-day view shows them regardless — that
/// asymmetry is deliberate).
pub fn format_range(records: &[DayRecord]) -> String {
    if records.is_empty() {
        return NO_DATA_FOUND.to_string();
    }

    let mut sorted: Vec<&DayRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.day_key.cmp(&b.day_key));

    let mut out = String::new();
    for record in sorted {
        out.push_str(&format!("=== {} ===\n", display_date(&record.day_key)));

        push_group(&mut out, record, &group("WakeUp"));
        push_group(&mut out, record, &group("Nap1"));
        push_group(&mut out, record, &group("Nap2"));
        push_group(&mut out, record, &group("Nap3"));
        push_group(&mut out, record, &group("Bedtime"));
        push_group(&mut out, record, &group("NightWaking"));
        push_group(&mut out, record, &group("Feed"));

        if let Some(notes) = record.notes.as_deref() {
            if notes != NOTES_SENTINEL {
                out.push_str(&format!("Notes:\n{notes}\n"));
            }
        }

        out.push('\n');
    }
    out.trim_end().to_string()
}
