//! Equipment service: CRUD plus CSV bulk import

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::Condition,
        equipment::{CreateEquipment, EnrichedEquipment, UpdateEquipment},
        import_report::{ImportAction, ImportReport, ImportRowResult},
    },
    repository::Repository,
    services::derive,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    default_tag_threshold_days: i32,
}

impl EquipmentService {
    pub fn new(repository: Repository, default_tag_threshold_days: i32) -> Self {
        Self {
            repository,
            default_tag_threshold_days,
        }
    }

    /// Get one equipment record with its derived status and tag state.
    pub async fn get_by_id(&self, id: uuid::Uuid) -> AppResult<EnrichedEquipment> {
        let record = self.repository.equipment.get_by_id(id).await?;
        Ok(derive::enrich_one(record, Utc::now()))
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<EnrichedEquipment> {
        let record = self
            .repository
            .equipment
            .create(data, self.default_tag_threshold_days)
            .await?;
        Ok(derive::enrich_one(record, Utc::now()))
    }

    pub async fn update(&self, id: uuid::Uuid, data: &UpdateEquipment) -> AppResult<EnrichedEquipment> {
        let record = self.repository.equipment.update(id, data).await?;
        Ok(derive::enrich_one(record, Utc::now()))
    }

    /// Bulk import from CSV text.
    ///
    /// Rows that fail validation or clash with an existing asset id are
    /// skipped and reported; valid rows are created individually.
    pub async fn import_csv(&self, body: &str) -> AppResult<ImportReport> {
        let existing = self.repository.equipment.asset_ids().await?;
        let rows = parse_import(body, &existing)?;

        let mut report = ImportReport {
            total_rows: rows.len(),
            created: 0,
            skipped: 0,
            rows: Vec::with_capacity(rows.len()),
        };

        for row in rows {
            match row.record {
                Some(record) => match self.create(&record).await {
                    Ok(_) => {
                        report.created += 1;
                        report.rows.push(ImportRowResult {
                            row: row.row,
                            asset_id: row.asset_id,
                            name: row.name,
                            action: ImportAction::Created,
                            errors: Vec::new(),
                        });
                    }
                    Err(e) => {
                        report.skipped += 1;
                        report.rows.push(ImportRowResult {
                            row: row.row,
                            asset_id: row.asset_id,
                            name: row.name,
                            action: ImportAction::Skipped,
                            errors: vec![e.to_string()],
                        });
                    }
                },
                None => {
                    report.skipped += 1;
                    report.rows.push(ImportRowResult {
                        row: row.row,
                        asset_id: row.asset_id,
                        name: row.name,
                        action: ImportAction::Skipped,
                        errors: row.errors,
                    });
                }
            }
        }

        Ok(report)
    }
}

/// One parsed CSV data row; `record` is set only when the row is importable.
#[derive(Debug)]
struct ImportRow {
    row: usize,
    asset_id: String,
    name: String,
    record: Option<CreateEquipment>,
    errors: Vec<String>,
}

fn strip_quotes(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// Pick the first non-empty value among the header aliases for a column.
fn field(row: &HashMap<String, String>, aliases: &[&str]) -> String {
    aliases
        .iter()
        .find_map(|key| row.get(*key).filter(|v| !v.is_empty()))
        .cloned()
        .unwrap_or_default()
}

fn parse_date(row: &HashMap<String, String>, aliases: &[&str]) -> Result<Option<NaiveDate>, String> {
    let raw = field(row, aliases);
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("Invalid date '{}' (expected YYYY-MM-DD)", raw))
}

/// Parse CSV text into candidate rows, validating against the existing
/// asset-id set and against duplicates within the file itself.
///
/// Column splitting is the simple comma split the spreadsheet exports of the
/// field crews use; embedded commas inside quoted cells are not supported.
fn parse_import(body: &str, existing_ids: &HashSet<String>) -> AppResult<Vec<ImportRow>> {
    let mut lines = body.trim().lines().filter(|l| !l.trim().is_empty());

    let header_line = lines
        .next()
        .ok_or_else(|| AppError::Validation("CSV body is empty".to_string()))?;
    let headers: Vec<String> = header_line
        .split(',')
        .map(|h| strip_quotes(h).to_lowercase())
        .collect();

    let mut seen_in_file: HashSet<String> = HashSet::new();
    let mut rows = Vec::new();

    for (index, line) in lines.enumerate() {
        let values: Vec<&str> = line.split(',').map(strip_quotes).collect();
        let row: HashMap<String, String> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), values.get(i).copied().unwrap_or("").to_string()))
            .collect();

        let asset_id = field(&row, &["asset_id", "asset id", "id"]);
        let name = field(&row, &["name", "equipment name", "equipment"]);

        let mut errors = Vec::new();
        if asset_id.is_empty() {
            errors.push("Missing Asset ID".to_string());
        }
        if name.is_empty() {
            errors.push("Missing Name".to_string());
        }

        let key = asset_id.to_lowercase();
        if !asset_id.is_empty() {
            if existing_ids.contains(&key) {
                errors.push("Duplicate Asset ID".to_string());
            } else if !seen_in_file.insert(key) {
                errors.push("Duplicate Asset ID within file".to_string());
            }
        }

        let test_tag_done_date =
            parse_date(&row, &["test_tag_done_date", "last_test", "last test"])
                .unwrap_or_else(|e| {
                    errors.push(e);
                    None
                });
        let test_tag_next_due =
            parse_date(&row, &["test_tag_next_due", "next_test", "next test"])
                .unwrap_or_else(|e| {
                    errors.push(e);
                    None
                });

        let record = if errors.is_empty() {
            let category = field(&row, &["category", "type"]);
            let condition_raw = field(&row, &["condition"]);
            Some(CreateEquipment {
                asset_id: asset_id.clone(),
                name: name.clone(),
                qr_code: Some(field(&row, &["qr_code", "qr"])),
                category: Some(if category.is_empty() {
                    "General".to_string()
                } else {
                    category
                }),
                condition: Some(Condition::parse(&condition_raw).unwrap_or(Condition::Good)),
                notes: Some(field(&row, &["notes", "description"])),
                photo_url: None,
                test_tag_done_date,
                test_tag_next_due,
                tag_threshold_days: None,
                created_by: None,
            })
        } else {
            None
        };

        rows.push(ImportRow {
            row: index + 1,
            asset_id,
            name,
            record,
            errors,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_existing() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn parses_rows_with_header_aliases() {
        let csv = "Asset ID,Equipment Name,Type,Condition\nGL-0100,Impact Driver,Power Tools,Good\n";
        let rows = parse_import(csv, &no_existing()).unwrap();
        assert_eq!(rows.len(), 1);
        let record = rows[0].record.as_ref().unwrap();
        assert_eq!(record.asset_id, "GL-0100");
        assert_eq!(record.name, "Impact Driver");
        assert_eq!(record.category.as_deref(), Some("Power Tools"));
    }

    #[test]
    fn flags_missing_asset_id_and_name() {
        let csv = "asset_id,name\n,\n";
        let rows = parse_import(csv, &no_existing()).unwrap();
        assert!(rows[0].record.is_none());
        assert!(rows[0].errors.iter().any(|e| e.contains("Asset ID")));
        assert!(rows[0].errors.iter().any(|e| e.contains("Name")));
    }

    #[test]
    fn detects_duplicates_against_store_and_within_file() {
        let mut existing = HashSet::new();
        existing.insert("gl-0001".to_string());

        let csv = "asset_id,name\nGL-0001,Old Drill\nGL-0200,Saw\ngl-0200,Saw Again\n";
        let rows = parse_import(csv, &existing).unwrap();

        assert!(rows[0].errors.iter().any(|e| e == "Duplicate Asset ID"));
        assert!(rows[1].errors.is_empty());
        assert!(rows[2]
            .errors
            .iter()
            .any(|e| e == "Duplicate Asset ID within file"));
    }

    #[test]
    fn rejects_malformed_dates_at_the_boundary() {
        let csv = "asset_id,name,next_test\nGL-0300,Ladder,not-a-date\n";
        let rows = parse_import(csv, &no_existing()).unwrap();
        assert!(rows[0].record.is_none());
        assert!(rows[0].errors.iter().any(|e| e.contains("Invalid date")));
    }

    #[test]
    fn accepts_quoted_cells_and_defaults() {
        let csv = "asset_id,name,condition\n\"GL-0400\",\"Heat Gun\",\n";
        let rows = parse_import(csv, &no_existing()).unwrap();
        let record = rows[0].record.as_ref().unwrap();
        assert_eq!(record.asset_id, "GL-0400");
        assert_eq!(record.condition, Some(Condition::Good));
        assert_eq!(record.category.as_deref(), Some("General"));
    }

    #[test]
    fn empty_body_is_a_validation_error() {
        assert!(matches!(
            parse_import("  \n ", &no_existing()),
            Err(AppError::Validation(_))
        ));
    }
}
