//! Shared domain enums
//!
//! Stored rows keep their raw status/condition strings (legacy values exist
//! in the data); these enums are the closed vocabulary everything downstream
//! works with. `CanonicalStatus::parse_stored` is the single place the legacy
//! aliases are normalized.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// CanonicalStatus
// ---------------------------------------------------------------------------

/// Canonical equipment lifecycle status, derived at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CanonicalStatus {
    Available,
    #[serde(rename = "In Use")]
    InUse,
    Overdue,
    Expired,
    Repair,
}

impl CanonicalStatus {
    /// Parse a stored status string, folding legacy aliases.
    ///
    /// "Maintenance" is a legacy synonym of "Repair". Unrecognized values
    /// return `None`; callers treat those as Available.
    pub fn parse_stored(raw: &str) -> Option<Self> {
        match raw {
            "Available" => Some(CanonicalStatus::Available),
            "In Use" => Some(CanonicalStatus::InUse),
            "Overdue" => Some(CanonicalStatus::Overdue),
            "Expired" => Some(CanonicalStatus::Expired),
            "Repair" | "Maintenance" => Some(CanonicalStatus::Repair),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalStatus::Available => "Available",
            CanonicalStatus::InUse => "In Use",
            CanonicalStatus::Overdue => "Overdue",
            CanonicalStatus::Expired => "Expired",
            CanonicalStatus::Repair => "Repair",
        }
    }
}

impl std::fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TagState
// ---------------------------------------------------------------------------

/// Compliance state of the periodic test tag relative to its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TagState {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Due Soon")]
    DueSoon,
    Expired,
    #[serde(rename = "No Tag")]
    NoTag,
}

impl std::fmt::Display for TagState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TagState::Ok => "OK",
            TagState::DueSoon => "Due Soon",
            TagState::Expired => "Expired",
            TagState::NoTag => "No Tag",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// Physical condition of an equipment item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Condition {
    New,
    Good,
    Fair,
    Poor,
    Damaged,
    /// Legacy value still present in old rows.
    #[serde(rename = "Not Working")]
    NotWorking,
}

impl Condition {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "New" => Some(Condition::New),
            "Good" => Some(Condition::Good),
            "Fair" => Some(Condition::Fair),
            "Poor" => Some(Condition::Poor),
            "Damaged" => Some(Condition::Damaged),
            "Not Working" => Some(Condition::NotWorking),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Poor => "Poor",
            Condition::Damaged => "Damaged",
            Condition::NotWorking => "Not Working",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EventType
// ---------------------------------------------------------------------------

/// Movement event type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    CheckOut,
    Return,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::CheckOut => "check_out",
            EventType::Return => "return",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FilterBucket
// ---------------------------------------------------------------------------

/// Named filter buckets exposed to list views.
///
/// "Maintenance" is accepted as an alias of Repair for old bookmarked links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FilterBucket {
    All,
    Available,
    #[serde(rename = "In Use")]
    InUse,
    Overdue,
    #[serde(alias = "Maintenance")]
    Repair,
    #[serde(rename = "Expired Tags")]
    ExpiredTags,
    #[serde(rename = "Due Soon")]
    DueSoon,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maintenance_is_a_repair_alias() {
        assert_eq!(
            CanonicalStatus::parse_stored("Maintenance"),
            Some(CanonicalStatus::Repair)
        );
        assert_eq!(
            CanonicalStatus::parse_stored("Repair"),
            Some(CanonicalStatus::Repair)
        );
    }

    #[test]
    fn unknown_status_is_unrecognized() {
        assert_eq!(CanonicalStatus::parse_stored("Lost"), None);
        assert_eq!(CanonicalStatus::parse_stored(""), None);
    }

    #[test]
    fn filter_bucket_accepts_maintenance_alias() {
        let bucket: FilterBucket = serde_json::from_str("\"Maintenance\"").unwrap();
        assert_eq!(bucket, FilterBucket::Repair);
        let bucket: FilterBucket = serde_json::from_str("\"Due Soon\"").unwrap();
        assert_eq!(bucket, FilterBucket::DueSoon);
    }
}
