use crate::{
    db::DbPool,
    entities::center::{self, ActiveModel as CenterActiveModel, Entity as CenterEntity},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// One record of a center import payload. Field shapes are loose on purpose:
/// bulk imports come from external spreadsheets and registries with uneven
/// columns.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportCenterRecord {
    pub name: Option<String>,
    pub location: Option<String>,
    pub subdistrict: Option<String>,
    pub district: Option<String>,
    pub shelter_type: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub phone_numbers: PhoneNumbers,
    pub population: Option<i32>,
    pub capacity: Option<i32>,
}

/// Imports carry contacts either as a list or a single string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PhoneNumbers {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

/// Import payloads arrive as a bare array, a `{ "data": [...] }` wrapper, or
/// a single record.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ImportCentersRequest {
    Wrapped { data: Vec<ImportCenterRecord> },
    List(Vec<ImportCenterRecord>),
    Single(ImportCenterRecord),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatePopulationRequest {
    pub center_id: Uuid,
    pub population: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CenterResponse {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub center_type: String,
    pub status: String,
    pub contact: String,
    pub population: i32,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Service for shelter centers.
#[derive(Clone)]
pub struct CenterService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl CenterService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Lists all centers sorted by name.
    #[instrument(skip(self))]
    pub async fn list_centers(&self) -> Result<Vec<CenterResponse>, ServiceError> {
        let db = &*self.db_pool;
        let centers = CenterEntity::find()
            .order_by_asc(center::Column::Name)
            .all(db)
            .await?;
        Ok(centers.into_iter().map(model_to_response).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_center(&self, id: Uuid) -> Result<CenterResponse, ServiceError> {
        let db = &*self.db_pool;
        let model = CenterEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Center {} not found", id)))?;
        Ok(model_to_response(model))
    }

    /// Imports center records, normalizing the loose payload shapes.
    /// Records without a name are skipped rather than failing the batch.
    #[instrument(skip(self, request))]
    pub async fn import_centers(
        &self,
        request: ImportCentersRequest,
    ) -> Result<ImportSummary, ServiceError> {
        let records = match request {
            ImportCentersRequest::Wrapped { data } => data,
            ImportCentersRequest::List(list) => list,
            ImportCentersRequest::Single(record) => vec![record],
        };

        let total = records.len();
        let normalized: Vec<CenterActiveModel> = records
            .into_iter()
            .filter_map(normalize_record)
            .collect();

        if normalized.is_empty() {
            return Err(ServiceError::ValidationError(
                "No usable center records in payload".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let mut imported = 0usize;
        for model in normalized {
            match model.insert(db).await {
                Ok(saved) => {
                    imported += 1;
                    self.emit(Event::CenterCreated(saved.id)).await;
                }
                // Duplicates in re-imported batches are tolerated.
                Err(e) => warn!(error = %e, "Skipping center record that failed to insert"),
            }
        }

        info!(imported, skipped = total - imported, "Imported centers");
        Ok(ImportSummary {
            imported,
            skipped: total - imported,
        })
    }

    /// Sets the current head count and derives the status: at or over
    /// capacity means `full`, otherwise `active`.
    #[instrument(skip(self), fields(center_id = %request.center_id))]
    pub async fn update_population(
        &self,
        request: UpdatePopulationRequest,
    ) -> Result<CenterResponse, ServiceError> {
        if request.population < 0 {
            return Err(ServiceError::ValidationError(
                "Population cannot be negative".to_string(),
            ));
        }

        let db = &*self.db_pool;
        let model = CenterEntity::find_by_id(request.center_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Center {} not found", request.center_id))
            })?;

        let new_status = if request.population >= model.capacity {
            "full"
        } else {
            "active"
        };

        let mut active: center::ActiveModel = model.into();
        active.population = Set(request.population);
        active.status = Set(new_status.to_string());
        active.updated_at = Set(Some(Utc::now()));
        let updated = active.update(db).await?;

        info!(
            center_id = %updated.id,
            population = updated.population,
            status = %updated.status,
            "Updated center population"
        );
        Ok(model_to_response(updated))
    }

    /// Deletes a center and returns its name for the audit trail.
    #[instrument(skip(self), fields(center_id = %id))]
    pub async fn delete_center(&self, id: Uuid) -> Result<String, ServiceError> {
        let db = &*self.db_pool;
        let model = CenterEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Center {} not found", id)))?;

        let name = model.name.clone();
        model.delete(db).await?;
        self.emit(Event::CenterDeleted(id)).await;
        info!(center_id = %id, name = %name, "Deleted center");
        Ok(name)
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                error!(error = %e, "Failed to emit center event");
            }
        }
    }
}

/// Maps a raw import record onto a center row. Returns `None` for unnamed
/// records.
fn normalize_record(record: ImportCenterRecord) -> Option<CenterActiveModel> {
    let name = record.name.filter(|n| !n.trim().is_empty())?;

    let location = record
        .location
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| {
            let joined = format!(
                "{} {}",
                record.subdistrict.as_deref().unwrap_or(""),
                record.district.as_deref().unwrap_or("")
            );
            let trimmed = joined.trim().to_string();
            if trimmed.is_empty() {
                "-".to_string()
            } else {
                trimmed
            }
        });

    let center_type = record
        .shelter_type
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "shelter".to_string());

    let status = match record.status.as_deref() {
        Some("active") => "active",
        _ => "inactive",
    };

    let contact = match record.phone_numbers {
        PhoneNumbers::Many(numbers) if !numbers.is_empty() => numbers.join(", "),
        PhoneNumbers::One(number) if !number.trim().is_empty() => number,
        _ => "-".to_string(),
    };

    Some(CenterActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        location: Set(location),
        center_type: Set(center_type),
        status: Set(status.to_string()),
        contact: Set(contact),
        population: Set(record.population.unwrap_or(0)),
        capacity: Set(record.capacity.unwrap_or(0)),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    })
}

fn model_to_response(model: center::Model) -> CenterResponse {
    CenterResponse {
        id: model.id,
        name: model.name,
        location: model.location,
        center_type: model.center_type,
        status: model.status,
        contact: model.contact,
        population: model.population,
        capacity: model.capacity,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: Option<&str>) -> ImportCenterRecord {
        ImportCenterRecord {
            name: name.map(str::to_string),
            location: None,
            subdistrict: None,
            district: None,
            shelter_type: None,
            status: None,
            phone_numbers: PhoneNumbers::None,
            population: None,
            capacity: None,
        }
    }

    #[test]
    fn unnamed_records_are_skipped() {
        assert!(normalize_record(record(None)).is_none());
        assert!(normalize_record(record(Some("   "))).is_none());
        assert!(normalize_record(record(Some("North School"))).is_some());
    }

    #[test]
    fn phone_number_list_joins_into_contact() {
        let mut rec = record(Some("North School"));
        rec.phone_numbers = PhoneNumbers::Many(vec!["111".into(), "222".into()]);
        let model = normalize_record(rec).unwrap();
        assert_eq!(model.contact, Set("111, 222".to_string()));
    }

    #[test]
    fn location_falls_back_to_district_fields() {
        let mut rec = record(Some("North School"));
        rec.subdistrict = Some("Maple".into());
        rec.district = Some("Riverside".into());
        let model = normalize_record(rec).unwrap();
        assert_eq!(model.location, Set("Maple Riverside".to_string()));
    }

    #[test]
    fn non_active_status_normalizes_to_inactive() {
        let mut rec = record(Some("North School"));
        rec.status = Some("open".into());
        let model = normalize_record(rec).unwrap();
        assert_eq!(model.status, Set("inactive".to_string()));

        let mut rec = record(Some("North School"));
        rec.status = Some("active".into());
        let model = normalize_record(rec).unwrap();
        assert_eq!(model.status, Set("active".to_string()));
    }

    #[test]
    fn import_request_accepts_all_three_shapes() {
        let bare: ImportCentersRequest =
            serde_json::from_str(r#"[{"name": "A"}]"#).unwrap();
        assert!(matches!(bare, ImportCentersRequest::List(_)));

        let wrapped: ImportCentersRequest =
            serde_json::from_str(r#"{"data": [{"name": "A"}]}"#).unwrap();
        assert!(matches!(wrapped, ImportCentersRequest::Wrapped { .. }));

        let single: ImportCentersRequest =
            serde_json::from_str(r#"{"name": "A"}"#).unwrap();
        assert!(matches!(single, ImportCentersRequest::Single(_)));
    }
}
