//! Movements repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::EquipmentUpdate,
        movement::{CreateMovement, Movement},
    },
};

#[derive(Clone)]
pub struct MovementsRepository {
    pool: Pool<Postgres>,
}

impl MovementsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all movements, newest first
    pub async fn list(&self) -> AppResult<Vec<Movement>> {
        let rows = sqlx::query_as::<_, Movement>(
            "SELECT * FROM movements ORDER BY event_timestamp DESC"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List movements for one equipment item, newest first
    pub async fn list_for_equipment(&self, equipment_id: Uuid) -> AppResult<Vec<Movement>> {
        let rows = sqlx::query_as::<_, Movement>(
            "SELECT * FROM movements WHERE equipment_id = $1 ORDER BY event_timestamp DESC"
        )
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Record a movement and apply its equipment update in one transaction.
    ///
    /// The equipment row is locked for the duration so the movement history
    /// and the current assignment snapshot cannot diverge.
    pub async fn create_applied(
        &self,
        data: &CreateMovement,
        event_timestamp: DateTime<Utc>,
        update: &EquipmentUpdate,
    ) -> AppResult<Movement> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM equipment WHERE id = $1 FOR UPDATE"
        )
        .bind(data.equipment_id)
        .fetch_optional(&mut *tx)
        .await?;

        if exists.is_none() {
            return Err(AppError::NotFound(format!(
                "Equipment {} not found",
                data.equipment_id
            )));
        }

        let movement = sqlx::query_as::<_, Movement>(
            r#"
            INSERT INTO movements (
                equipment_id, event_type, event_timestamp,
                assigned_to, site, job_reference, notes,
                pickup_photo_url, return_photo_url, expected_return_date,
                return_condition, has_new_issues, issue_description,
                requires_service, requires_repair, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.event_type.as_str())
        .bind(event_timestamp)
        .bind(&data.assigned_to)
        .bind(&data.site)
        .bind(&data.job_reference)
        .bind(&data.notes)
        .bind(&data.pickup_photo_url)
        .bind(&data.return_photo_url)
        .bind(data.expected_return_date)
        .bind(data.return_condition.as_ref().map(|c| c.as_str()))
        .bind(data.has_new_issues)
        .bind(&data.issue_description)
        .bind(data.requires_service)
        .bind(data.requires_repair)
        .bind(&data.created_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE equipment
            SET current_status = $1, assigned_to = $2, assigned_site = $3,
                assigned_job = $4, expected_return_date = $5, updated_at = $6
            WHERE id = $7
            "#,
        )
        .bind(update.current_status.as_str())
        .bind(&update.assigned_to)
        .bind(&update.assigned_site)
        .bind(&update.assigned_job)
        .bind(update.expected_return_date)
        .bind(Utc::now())
        .bind(data.equipment_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(movement)
    }
}
