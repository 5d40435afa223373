use crate::{
    db::DbPool,
    entities::notification::{self, ActiveModel as NotificationActiveModel, Entity as NotificationEntity},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

const RECENT_LIMIT: u64 = 20;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateNotificationRequest {
    /// emergency | request | stock | system | info
    #[validate(length(min = 1, message = "Kind is required"))]
    pub kind: String,
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct NotificationService {
    db_pool: Arc<DbPool>,
}

impl NotificationService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// The 20 most recent notifications, newest first.
    #[instrument(skip(self))]
    pub async fn recent_notifications(&self) -> Result<Vec<NotificationResponse>, ServiceError> {
        let db = &*self.db_pool;
        let rows = NotificationEntity::find()
            .order_by_desc(notification::Column::CreatedAt)
            .limit(RECENT_LIMIT)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(model_to_response).collect())
    }

    #[instrument(skip(self, request), fields(kind = %request.kind))]
    pub async fn create_notification(
        &self,
        request: CreateNotificationRequest,
    ) -> Result<NotificationResponse, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = &*self.db_pool;
        let model = NotificationActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(request.kind),
            title: Set(request.title),
            message: Set(request.message),
            read: Set(false),
            created_at: Set(Utc::now()),
        };

        let saved = model.insert(db).await?;
        Ok(model_to_response(saved))
    }

    #[instrument(skip(self), fields(notification_id = %id))]
    pub async fn mark_read(&self, id: Uuid) -> Result<NotificationResponse, ServiceError> {
        let db = &*self.db_pool;
        let model = NotificationEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Notification {} not found", id)))?;

        let mut active: notification::ActiveModel = model.into();
        active.read = Set(true);
        let updated = active.update(db).await?;
        info!(notification_id = %id, "Marked notification as read");
        Ok(model_to_response(updated))
    }
}

fn model_to_response(model: notification::Model) -> NotificationResponse {
    NotificationResponse {
        id: model.id,
        kind: model.kind,
        title: model.title,
        message: model.message,
        read: model.read,
        created_at: model.created_at,
    }
}
