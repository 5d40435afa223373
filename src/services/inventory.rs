use crate::{
    db::DbPool,
    entities::notification,
    entities::product::{self, ActiveModel as ProductActiveModel, Entity as ProductEntity},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Product name is required"))]
    pub name: String,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: String,
    pub min_level: Option<i32>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SetQuantityRequest {
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub unit: String,
    pub min_level: i32,
    pub location: String,
    pub low_stock: bool,
    pub updated_at: DateTime<Utc>,
}

/// Service for the relief supply inventory.
#[derive(Clone)]
pub struct InventoryService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl InventoryService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Lists all products, lowest quantity first so shortages surface at the
    /// top.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let db = &*self.db_pool;
        let products = ProductEntity::find()
            .order_by_asc(product::Column::Quantity)
            .all(db)
            .await?;

        Ok(products.into_iter().map(model_to_response).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> Result<ProductResponse, ServiceError> {
        let db = &*self.db_pool;
        let product = ProductEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;
        Ok(model_to_response(product))
    }

    /// Products at or below their minimum level.
    #[instrument(skip(self))]
    pub async fn low_stock_products(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let db = &*self.db_pool;
        use sea_orm::sea_query::Expr;
        let products = ProductEntity::find()
            .filter(
                Expr::col(product::Column::Quantity).lte(Expr::col(product::Column::MinLevel)),
            )
            .order_by_asc(product::Column::Quantity)
            .all(db)
            .await?;

        Ok(products.into_iter().map(model_to_response).collect())
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = &*self.db_pool;
        let model = ProductActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            category: Set(request.category.unwrap_or_else(|| "other".to_string())),
            quantity: Set(request.quantity),
            unit: Set(request.unit),
            min_level: Set(request.min_level.unwrap_or(10)),
            location: Set(request
                .location
                .unwrap_or_else(|| "Central warehouse".to_string())),
            updated_at: Set(Utc::now()),
        };

        let saved = model.insert(db).await?;
        info!(product_id = %saved.id, name = %saved.name, "Created product");
        Ok(model_to_response(saved))
    }

    /// Sets a product's quantity outright (restock or manual correction).
    /// Crossing the minimum level raises a `stock` notification.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn set_quantity(
        &self,
        id: Uuid,
        request: SetQuantityRequest,
    ) -> Result<ProductResponse, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = &*self.db_pool;
        let now = Utc::now();

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for quantity update");
            ServiceError::DatabaseError(e)
        })?;

        let product = ProductEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;

        let mut active: product::ActiveModel = product.into();
        active.quantity = Set(request.quantity);
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        if updated.is_low_stock() {
            notification::ActiveModel {
                id: Set(Uuid::new_v4()),
                kind: Set("stock".to_string()),
                title: Set(format!("Low stock: {}", updated.name)),
                message: Set(format!(
                    "Only {} {} left (minimum level {})",
                    updated.quantity, updated.unit, updated.min_level
                )),
                read: Set(false),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        if updated.is_low_stock() {
            self.emit(Event::LowStock {
                product_id: updated.id,
                name: updated.name.clone(),
                quantity: updated.quantity,
                min_level: updated.min_level,
            })
            .await;
        }

        info!(product_id = %id, quantity = updated.quantity, "Updated product quantity");
        Ok(model_to_response(updated))
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let product = ProductEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;

        let name = product.name.clone();
        product.delete(db).await?;
        info!(product_id = %id, name = %name, "Deleted product");
        Ok(())
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                error!(error = %e, "Failed to emit inventory event");
            }
        }
    }
}

fn model_to_response(model: product::Model) -> ProductResponse {
    let low_stock = model.is_low_stock();
    ProductResponse {
        id: model.id,
        name: model.name,
        category: model.category,
        quantity: model.quantity,
        unit: model.unit,
        min_level: model.min_level,
        location: model.location,
        low_stock,
        updated_at: model.updated_at,
    }
}
