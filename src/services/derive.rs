//! Status derivation (the "status engine")
//!
//! Pure functions computing the canonical lifecycle status and tag compliance
//! state of an equipment record at a given instant. The stored status is only
//! a hint: an item checked out with a return date in the past is Overdue on
//! read, without anyone having written that back. Repair, Expired and Overdue
//! stored values are sticky — an operator's explicit judgement is never
//! downgraded by date math.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    enums::{CanonicalStatus, TagState},
    equipment::{EnrichedEquipment, Equipment},
};

/// Whole days from `now` until midnight UTC of `due`, rounded up.
///
/// Partial days round toward the future boundary, so a due date later today
/// yields 0, tomorrow yields 1, yesterday yields a negative count.
fn days_until(due: NaiveDate, now: DateTime<Utc>) -> i64 {
    let due_start = due
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc();
    let secs = (due_start - now).num_seconds();
    secs.div_euclid(86_400) + i64::from(secs.rem_euclid(86_400) > 0)
}

/// Compute the canonical lifecycle status of an equipment record.
pub fn compute_status(equipment: &Equipment, now: DateTime<Utc>) -> CanonicalStatus {
    let base = CanonicalStatus::parse_stored(&equipment.current_status);

    match base {
        Some(
            status @ (CanonicalStatus::Repair | CanonicalStatus::Expired | CanonicalStatus::Overdue),
        ) => status,
        Some(CanonicalStatus::InUse) => {
            match equipment.expected_return_date {
                Some(due) if due.and_hms_opt(0, 0, 0).expect("valid time").and_utc() < now => {
                    CanonicalStatus::Overdue
                }
                _ => CanonicalStatus::InUse,
            }
        }
        // Available, or an unrecognized stored value
        _ => CanonicalStatus::Available,
    }
}

/// Compute the compliance tag state of an equipment record.
pub fn compute_tag_state(equipment: &Equipment, now: DateTime<Utc>) -> TagState {
    let Some(due) = equipment.test_tag_next_due else {
        return TagState::NoTag;
    };
    let diff_days = days_until(due, now);
    if diff_days < 0 {
        TagState::Expired
    } else if diff_days <= i64::from(equipment.tag_threshold_days) {
        TagState::DueSoon
    } else {
        TagState::Ok
    }
}

/// Enrich one record, deriving both values exactly once.
pub fn enrich_one(record: Equipment, now: DateTime<Utc>) -> EnrichedEquipment {
    let derived_status = compute_status(&record, now);
    let derived_tag = compute_tag_state(&record, now);
    EnrichedEquipment {
        record,
        derived_status,
        derived_tag,
    }
}

/// Enrich a collection of records.
pub fn enrich(records: Vec<Equipment>, now: DateTime<Utc>) -> Vec<EnrichedEquipment> {
    records
        .into_iter()
        .map(|record| enrich_one(record, now))
        .collect()
}
