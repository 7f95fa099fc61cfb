//! Inventory snapshot, aggregation and filtering
//!
//! A snapshot is one consistent in-memory read of the registry: equipment and
//! movements fetched concurrently under a single deadline, equipment enriched
//! with derived status/tag once. Stats, filters and search all operate on the
//! enriched snapshot and never re-derive.

use std::time::Duration;

use chrono::Utc;

use crate::{
    api::stats::DashboardStats,
    error::{AppError, AppResult},
    models::{
        enums::{CanonicalStatus, FilterBucket, TagState},
        equipment::EnrichedEquipment,
        movement::Movement,
    },
    repository::Repository,
    services::derive,
};

/// One consistent read of the whole registry.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub equipment: Vec<EnrichedEquipment>,
    pub movements: Vec<Movement>,
}

#[derive(Clone)]
pub struct InventoryService {
    repository: Repository,
    read_timeout: Duration,
}

impl InventoryService {
    pub fn new(repository: Repository, read_timeout: Duration) -> Self {
        Self {
            repository,
            read_timeout,
        }
    }

    /// Load equipment and movements concurrently under one shared deadline.
    ///
    /// Either both collections load or the read as a whole fails; there is no
    /// partial-result handling.
    pub async fn snapshot(&self) -> AppResult<Snapshot> {
        let fetch = async {
            tokio::try_join!(self.repository.equipment.list(), self.repository.movements.list())
        };

        let (equipment, movements) = tokio::time::timeout(self.read_timeout, fetch)
            .await
            .map_err(|_| {
                AppError::Timeout("Registry read timed out. Please try again.".to_string())
            })??;

        Ok(Snapshot {
            equipment: derive::enrich(equipment, Utc::now()),
            movements,
        })
    }

    /// Verify the registry database is reachable.
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.repository.pool)
            .await?;
        Ok(())
    }

    /// Load and enrich the equipment registry under the shared read deadline.
    pub async fn equipment(&self) -> AppResult<Vec<EnrichedEquipment>> {
        let records = tokio::time::timeout(self.read_timeout, self.repository.equipment.list())
            .await
            .map_err(|_| {
                AppError::Timeout("Registry read timed out. Please try again.".to_string())
            })??;
        Ok(derive::enrich(records, Utc::now()))
    }
}

/// Roll the snapshot up into dashboard counters.
///
/// Status buckets are mutually exclusive and sum to `total`; tag counters are
/// independent (an item can be both In Use and Due Soon).
pub fn compute_stats(records: &[EnrichedEquipment]) -> DashboardStats {
    let mut stats = DashboardStats {
        total: records.len() as i64,
        available: 0,
        in_use: 0,
        overdue: 0,
        repair: 0,
        expired_tags: 0,
        due_soon: 0,
    };
    for item in records {
        match item.derived_status {
            // Expired folds into available so the four counters sum to total
            CanonicalStatus::Available | CanonicalStatus::Expired => stats.available += 1,
            CanonicalStatus::InUse => stats.in_use += 1,
            CanonicalStatus::Overdue => stats.overdue += 1,
            CanonicalStatus::Repair => stats.repair += 1,
        }
        match item.derived_tag {
            TagState::Expired => stats.expired_tags += 1,
            TagState::DueSoon => stats.due_soon += 1,
            TagState::Ok | TagState::NoTag => {}
        }
    }
    stats
}

/// Narrow the snapshot to one named bucket, reusing the precomputed values.
pub fn filter_by_bucket(
    records: &[EnrichedEquipment],
    bucket: FilterBucket,
) -> Vec<EnrichedEquipment> {
    records
        .iter()
        .filter(|item| match bucket {
            FilterBucket::All => true,
            FilterBucket::Available => item.derived_status == CanonicalStatus::Available,
            FilterBucket::InUse => item.derived_status == CanonicalStatus::InUse,
            FilterBucket::Overdue => item.derived_status == CanonicalStatus::Overdue,
            FilterBucket::Repair => item.derived_status == CanonicalStatus::Repair,
            FilterBucket::ExpiredTags => item.derived_tag == TagState::Expired,
            FilterBucket::DueSoon => item.derived_tag == TagState::DueSoon,
        })
        .cloned()
        .collect()
}

/// Free-text search across name, asset id, category, assignee and site.
///
/// A blank query is the identity. The subsequence fallback deliberately
/// over-matches on very short queries; that tradeoff is kept as-is.
pub fn search_records(records: &[EnrichedEquipment], query: &str) -> Vec<EnrichedEquipment> {
    let query = query.trim();
    if query.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|item| {
            let eq = &item.record;
            fuzzy_match(&eq.name, query)
                || fuzzy_match(&eq.asset_id, query)
                || fuzzy_match(&eq.category, query)
                || fuzzy_match(&eq.assigned_to, query)
                || fuzzy_match(&eq.assigned_site, query)
        })
        .cloned()
        .collect()
}

/// Two-tier match: case-insensitive substring, then in-order subsequence.
fn fuzzy_match(text: &str, query: &str) -> bool {
    let text = text.to_lowercase();
    let query = query.to_lowercase();
    if text.contains(&query) {
        return true;
    }
    // Subsequence fallback: every query char appears in order
    let mut query_chars = query.chars().peekable();
    for c in text.chars() {
        if query_chars.peek() == Some(&c) {
            query_chars.next();
        }
    }
    query_chars.peek().is_none()
}
