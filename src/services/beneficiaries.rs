use crate::{
    db::DbPool,
    entities::beneficiary::{self, ActiveModel as BeneficiaryActiveModel, Entity as BeneficiaryEntity},
    entities::center,
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterBeneficiaryRequest {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[validate(range(min = 0, max = 150, message = "Age is out of range"))]
    pub age: i32,
    pub gender: Option<String>,
    pub center_id: Option<Uuid>,
    pub status: Option<String>,
    pub chronic_disease: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BeneficiaryResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub gender: String,
    pub center_id: Option<Uuid>,
    pub center_name: Option<String>,
    pub status: String,
    pub chronic_disease: String,
    pub registered_at: DateTime<Utc>,
}

/// Service for beneficiary registration.
#[derive(Clone)]
pub struct BeneficiaryService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl BeneficiaryService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Lists beneficiaries, most recently registered first.
    #[instrument(skip(self))]
    pub async fn list_beneficiaries(&self) -> Result<Vec<BeneficiaryResponse>, ServiceError> {
        let db = &*self.db_pool;
        let people = BeneficiaryEntity::find()
            .order_by_desc(beneficiary::Column::RegisteredAt)
            .all(db)
            .await?;
        Ok(people.into_iter().map(model_to_response).collect())
    }

    /// Registers a beneficiary. If a center is given its name is copied onto
    /// the record so listings stay join-free.
    #[instrument(skip(self, request), fields(first_name = %request.first_name))]
    pub async fn register_beneficiary(
        &self,
        request: RegisterBeneficiaryRequest,
    ) -> Result<BeneficiaryResponse, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = &*self.db_pool;

        let center_name = match request.center_id {
            Some(center_id) => {
                let found = center::Entity::find_by_id(center_id)
                    .one(db)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Center {} not found", center_id))
                    })?;
                Some(found.name)
            }
            None => None,
        };

        let model = BeneficiaryActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            age: Set(request.age),
            gender: Set(request.gender.unwrap_or_else(|| "unspecified".to_string())),
            center_id: Set(request.center_id),
            center_name: Set(center_name),
            status: Set(request.status.unwrap_or_else(|| "normal".to_string())),
            chronic_disease: Set(request.chronic_disease.unwrap_or_default()),
            registered_at: Set(Utc::now()),
        };

        let saved = model.insert(db).await?;
        info!(beneficiary_id = %saved.id, "Registered beneficiary");
        self.emit(Event::BeneficiaryRegistered(saved.id)).await;
        Ok(model_to_response(saved))
    }

    #[instrument(skip(self), fields(beneficiary_id = %id))]
    pub async fn delete_beneficiary(&self, id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let model = BeneficiaryEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Beneficiary {} not found", id)))?;
        model.delete(db).await?;
        info!(beneficiary_id = %id, "Deleted beneficiary");
        Ok(())
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                error!(error = %e, "Failed to emit beneficiary event");
            }
        }
    }
}

fn model_to_response(model: beneficiary::Model) -> BeneficiaryResponse {
    BeneficiaryResponse {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        age: model.age,
        gender: model.gender,
        center_id: model.center_id,
        center_name: model.center_name,
        status: model.status,
        chronic_disease: model.chronic_disease,
        registered_at: model.registered_at,
    }
}
