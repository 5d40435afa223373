use crate::{
    db::DbPool,
    entities::activity_log::{self, ActiveModel as LogActiveModel, Entity as LogEntity},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

const RECENT_LIMIT: u64 = 100;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActivityLogResponse {
    pub id: Uuid,
    pub action: String,
    pub description: String,
    pub actor: String,
    pub ip_address: String,
    pub timestamp: DateTime<Utc>,
}

/// Best-effort audit trail. A failed write is logged and swallowed so the
/// operation that produced it still succeeds.
#[derive(Clone)]
pub struct ActivityLogService {
    db_pool: Arc<DbPool>,
}

impl ActivityLogService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// The 100 most recent entries, newest first.
    #[instrument(skip(self))]
    pub async fn recent_logs(&self) -> Result<Vec<ActivityLogResponse>, ServiceError> {
        let db = &*self.db_pool;
        let rows = LogEntity::find()
            .order_by_desc(activity_log::Column::Timestamp)
            .limit(RECENT_LIMIT)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(model_to_response).collect())
    }

    /// Records an action. Never returns an error.
    #[instrument(skip(self, description))]
    pub async fn record(&self, action: &str, description: &str, actor: &str, ip_address: &str) {
        let db = &*self.db_pool;
        let model = LogActiveModel {
            id: Set(Uuid::new_v4()),
            action: Set(action.to_string()),
            description: Set(description.to_string()),
            actor: Set(actor.to_string()),
            ip_address: Set(ip_address.to_string()),
            timestamp: Set(Utc::now()),
        };

        match model.insert(db).await {
            Ok(_) => info!(action, actor, "Recorded activity"),
            Err(e) => warn!(action, error = %e, "Failed to record activity"),
        }
    }
}

fn model_to_response(model: activity_log::Model) -> ActivityLogResponse {
    ActivityLogResponse {
        id: model.id,
        action: model.action,
        description: model.description,
        actor: model.actor,
        ip_address: model.ip_address,
        timestamp: model.timestamp,
    }
}
