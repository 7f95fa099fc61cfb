//! Equipment repository for database operations

use std::collections::HashSet;

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::Condition,
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment, ordered by asset id
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment ORDER BY asset_id"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment. New items start Available and unassigned.
    pub async fn create(
        &self,
        data: &CreateEquipment,
        default_tag_threshold_days: i32,
    ) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                asset_id, qr_code, name, category, condition, notes, photo_url,
                test_tag_done_date, test_tag_next_due, tag_threshold_days,
                current_status, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'Available', $11)
            RETURNING *
            "#,
        )
        .bind(&data.asset_id)
        .bind(data.qr_code.as_deref().unwrap_or(""))
        .bind(&data.name)
        .bind(data.category.as_deref().unwrap_or("General"))
        .bind(data.condition.unwrap_or(Condition::Good).as_str())
        .bind(data.notes.as_deref().unwrap_or(""))
        .bind(data.photo_url.as_deref().unwrap_or(""))
        .bind(data.test_tag_done_date)
        .bind(data.test_tag_next_due)
        .bind(data.tag_threshold_days.unwrap_or(default_tag_threshold_days))
        .bind(&data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(
                format!("Equipment with asset_id '{}' already exists", data.asset_id),
            ),
            _ => AppError::from(e),
        })?;
        Ok(row)
    }

    /// Update equipment
    pub async fn update(&self, id: Uuid, data: &UpdateEquipment) -> AppResult<Equipment> {
        let now = Utc::now();
        let condition = data.condition.as_ref().map(|c| c.as_str());
        let current_status = data.current_status.as_ref().map(|s| s.as_str());

        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.qr_code, "qr_code");
        add_field!(data.category, "category");
        add_field!(condition, "condition");
        add_field!(data.notes, "notes");
        add_field!(data.photo_url, "photo_url");
        add_field!(data.test_tag_done_date, "test_tag_done_date");
        add_field!(data.test_tag_next_due, "test_tag_next_due");
        add_field!(data.tag_threshold_days, "tag_threshold_days");
        add_field!(current_status, "current_status");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.qr_code);
        bind_field!(data.category);
        bind_field!(condition);
        bind_field!(data.notes);
        bind_field!(data.photo_url);
        bind_field!(data.test_tag_done_date);
        bind_field!(data.test_tag_next_due);
        bind_field!(data.tag_threshold_days);
        bind_field!(current_status);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// All existing asset ids, lowercased (duplicate detection on import)
    pub async fn asset_ids(&self) -> AppResult<HashSet<String>> {
        let ids: Vec<String> = sqlx::query_scalar("SELECT asset_id FROM equipment")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids.into_iter().map(|s| s.to_lowercase()).collect())
    }
}
