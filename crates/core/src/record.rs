//! The day record — the structured per-day state object.
//!
//! One record exists per (subject, day key). Every slot is an optional
//! short string (`None` = not recorded); no temporal validation is done
//! on slot values, they are opaque text like "7:00 AM".
//!
//! Slots are addressed by wire name through a static accessor table
//! rather than runtime field lookup, so an unknown field name is a
//! table miss, never a panic.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// The reserved notes value meaning "explicitly empty", distinct from unset.
pub const NOTES_SENTINEL: &str = "None";

/// A single day's structured log for one tracked subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Logical partition — the tracked subject's name
    pub subject: String,

    /// Calendar day, canonical `YYYYMMDD` (string-sortable)
    pub day_key: String,

    // --- Morning ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wake_up: Option<String>,

    // --- Naps (up to three, each: into crib / fell asleep / woke up) ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nap1_in_crib: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nap1_asleep: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nap1_awake: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nap2_in_crib: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nap2_asleep: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nap2_awake: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nap3_in_crib: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nap3_asleep: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nap3_awake: Option<String>,

    // --- Bedtime ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedtime_in_crib: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedtime_asleep: Option<String>,

    // --- Night wakings (up to six intervals) ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_waking1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_waking2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_waking3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_waking4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_waking5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_waking6: Option<String>,

    // --- Feeding ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed: Option<String>,

    // --- Free-text notes (bullet-accumulated, see the applier) ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DayRecord {
    /// Create an empty record for a (subject, day key) pair.
    pub fn empty(subject: impl Into<String>, day_key: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            day_key: day_key.into(),
            ..Self::default()
        }
    }
}

/// A typed accessor pair for one named slot, built once at compile time.
pub struct SlotAccessor {
    /// The wire name used in tool arguments and formatted output
    pub name: &'static str,

    /// Read the slot value
    pub get: fn(&DayRecord) -> Option<&str>,

    /// Overwrite the slot value
    pub set: fn(&mut DayRecord, String),
}

macro_rules! slot {
    ($name:literal, $field:ident) => {
        SlotAccessor {
            name: $name,
            get: |r| r.$field.as_deref(),
            set: |r, v| r.$field = Some(v),
        }
    };
}

/// All slots in canonical display order.
pub const SLOTS: &[SlotAccessor] = &[
    slot!("WakeUp", wake_up),
    slot!("Nap1InCrib", nap1_in_crib),
    slot!("Nap1Asleep", nap1_asleep),
    slot!("Nap1Awake", nap1_awake),
    slot!("Nap2InCrib", nap2_in_crib),
    slot!("Nap2Asleep", nap2_asleep),
    slot!("Nap2Awake", nap2_awake),
    slot!("Nap3InCrib", nap3_in_crib),
    slot!("Nap3Asleep", nap3_asleep),
    slot!("Nap3Awake", nap3_awake),
    slot!("BedtimeInCrib", bedtime_in_crib),
    slot!("BedtimeAsleep", bedtime_asleep),
    slot!("NightWaking1", night_waking1),
    slot!("NightWaking2", night_waking2),
    slot!("NightWaking3", night_waking3),
    slot!("NightWaking4", night_waking4),
    slot!("NightWaking5", night_waking5),
    slot!("NightWaking6", night_waking6),
    slot!("Feed", feed),
    slot!("Notes", notes),
];

/// Look up a slot accessor by wire name. `None` means the field is not
/// part of the record schema.
pub fn slot(name: &str) -> Option<&'static SlotAccessor> {
    SLOTS.iter().find(|s| s.name == name)
}

/// Today's day key in the local timezone, `YYYYMMDD`.
pub fn local_day_key() -> String {
    Local::now().format("%Y%m%d").to_string()
}

/// Render a day key as a human-readable date (e.g. "July 4, 2025").
///
/// A key that isn't a parseable date is shown as-is; day keys are never
/// validated elsewhere, so display must not fail either.
pub fn display_date(day_key: &str) -> String {
    chrono::NaiveDate::parse_from_str(day_key, "%Y%m%d")
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| day_key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_has_no_slots_set() {
        let record = DayRecord::empty("Aria", "20250101");
        assert_eq!(record.subject, "Aria");
        assert_eq!(record.day_key, "20250101");
        for accessor in SLOTS {
            assert!((accessor.get)(&record).is_none(), "{} should be unset", accessor.name);
        }
    }

    #[test]
    fn slot_table_covers_every_field() {
        assert_eq!(SLOTS.len(), 20);
    }

    #[test]
    fn slot_lookup_by_name() {
        let accessor = slot("WakeUp").unwrap();
        let mut record = DayRecord::empty("Aria", "20250101");
        (accessor.set)(&mut record, "7:00 AM".into());
        assert_eq!((accessor.get)(&record), Some("7:00 AM"));
        assert_eq!(record.wake_up.as_deref(), Some("7:00 AM"));
    }

    #[test]
    fn unknown_slot_is_a_table_miss() {
        assert!(slot("FavoriteColor").is_none());
        assert!(slot("wakeup").is_none()); // names are case-sensitive
    }

    #[test]
    fn local_day_key_is_eight_digits() {
        let key = local_day_key();
        assert_eq!(key.len(), 8);
        assert!(key.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn display_date_renders_parseable_keys() {
        assert_eq!(display_date("20250704"), "July 4, 2025");
    }

    #[test]
    fn display_date_passes_malformed_keys_through() {
        assert_eq!(display_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn record_serialization_skips_unset_slots() {
        let mut record = DayRecord::empty("Aria", "20250101");
        record.wake_up = Some("7:00 AM".into());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("wake_up"));
        assert!(!json.contains("nap1_in_crib"));
    }
}
