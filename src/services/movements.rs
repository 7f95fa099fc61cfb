//! Movement recording and application
//!
//! Recording a movement is a two-part operation: a pure projection of the
//! equipment field updates the movement implies (`apply_movement`), then one
//! transactional write of the movement row plus those updates. Validation
//! happens entirely before the write, so a rejected movement has no effect.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{CanonicalStatus, EventType},
        equipment::EquipmentUpdate,
        movement::{CreateMovement, Movement},
    },
    repository::Repository,
};

/// Compute the equipment field updates a movement implies.
///
/// check_out requires a non-empty assignee and site; the error names every
/// missing field. return has no required fields beyond the equipment id.
pub fn apply_movement(data: &CreateMovement) -> AppResult<EquipmentUpdate> {
    match data.event_type {
        EventType::CheckOut => {
            let mut missing = Vec::new();
            if data.assigned_to.trim().is_empty() {
                missing.push("assigned_to");
            }
            if data.site.trim().is_empty() {
                missing.push("site");
            }
            if !missing.is_empty() {
                return Err(AppError::Validation(format!(
                    "Missing required field(s) for check-out: {}",
                    missing.join(", ")
                )));
            }
            Ok(EquipmentUpdate {
                current_status: CanonicalStatus::InUse,
                assigned_to: data.assigned_to.clone(),
                assigned_site: data.site.clone(),
                assigned_job: data.job_reference.clone(),
                expected_return_date: data.expected_return_date,
            })
        }
        EventType::Return => {
            let status = if data.requires_service || data.requires_repair {
                CanonicalStatus::Repair
            } else {
                CanonicalStatus::Available
            };
            Ok(EquipmentUpdate {
                current_status: status,
                assigned_to: String::new(),
                assigned_site: String::new(),
                assigned_job: String::new(),
                expected_return_date: None,
            })
        }
    }
}

#[derive(Clone)]
pub struct MovementsService {
    repository: Repository,
}

impl MovementsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get the full movement log, newest first
    pub async fn list(&self) -> AppResult<Vec<Movement>> {
        self.repository.movements.list().await
    }

    /// Get the movement history of one equipment item
    pub async fn list_for_equipment(&self, equipment_id: uuid::Uuid) -> AppResult<Vec<Movement>> {
        // Verify the equipment exists so an empty history is distinguishable
        // from a bad id
        self.repository.equipment.get_by_id(equipment_id).await?;
        self.repository.movements.list_for_equipment(equipment_id).await
    }

    /// Record a movement and apply the equipment transition it implies.
    pub async fn record(&self, data: CreateMovement) -> AppResult<Movement> {
        let update = apply_movement(&data)?;
        let event_timestamp = data.event_timestamp.unwrap_or_else(Utc::now);
        self.repository
            .movements
            .create_applied(&data, event_timestamp, &update)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn movement(event_type: EventType) -> CreateMovement {
        CreateMovement {
            equipment_id: Uuid::new_v4(),
            event_type,
            event_timestamp: None,
            assigned_to: String::new(),
            site: String::new(),
            job_reference: String::new(),
            notes: String::new(),
            pickup_photo_url: String::new(),
            return_photo_url: String::new(),
            expected_return_date: None,
            return_condition: None,
            has_new_issues: false,
            issue_description: String::new(),
            requires_service: false,
            requires_repair: false,
            created_by: "ops@example.com".to_string(),
        }
    }

    #[test]
    fn check_out_requires_assignee_and_site() {
        let mut data = movement(EventType::CheckOut);
        data.assigned_to = "Sam Kerr".to_string();

        let err = apply_movement(&data).unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("site"), "error should name the field: {}", msg);
                assert!(!msg.contains("assigned_to"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn check_out_names_every_missing_field() {
        let data = movement(EventType::CheckOut);
        let err = apply_movement(&data).unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("assigned_to"));
                assert!(msg.contains("site"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn whitespace_only_fields_fail_check_out() {
        let mut data = movement(EventType::CheckOut);
        data.assigned_to = "  ".to_string();
        data.site = "Depot".to_string();
        assert!(matches!(
            apply_movement(&data),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn check_out_assigns_and_sets_in_use() {
        let mut data = movement(EventType::CheckOut);
        data.assigned_to = "Sam Kerr".to_string();
        data.site = "North Yard".to_string();
        data.job_reference = "JOB-118".to_string();
        data.expected_return_date = NaiveDate::from_ymd_opt(2025, 7, 1);

        let update = apply_movement(&data).unwrap();
        assert_eq!(update.current_status, CanonicalStatus::InUse);
        assert_eq!(update.assigned_to, "Sam Kerr");
        assert_eq!(update.assigned_site, "North Yard");
        assert_eq!(update.assigned_job, "JOB-118");
        assert_eq!(
            update.expected_return_date,
            NaiveDate::from_ymd_opt(2025, 7, 1)
        );
    }

    #[test]
    fn plain_return_clears_assignment_and_frees_the_item() {
        let data = movement(EventType::Return);
        let update = apply_movement(&data).unwrap();
        assert_eq!(update.current_status, CanonicalStatus::Available);
        assert_eq!(update.assigned_to, "");
        assert_eq!(update.assigned_site, "");
        assert_eq!(update.assigned_job, "");
        assert_eq!(update.expected_return_date, None);
    }

    #[test]
    fn return_requiring_repair_routes_to_repair() {
        let mut data = movement(EventType::Return);
        data.requires_repair = true;
        let update = apply_movement(&data).unwrap();
        assert_eq!(update.current_status, CanonicalStatus::Repair);
        assert_eq!(update.assigned_to, "");

        let mut data = movement(EventType::Return);
        data.requires_service = true;
        let update = apply_movement(&data).unwrap();
        assert_eq!(update.current_status, CanonicalStatus::Repair);
    }
}
