use crate::{
    db::DbPool,
    entities::product::{self, Entity as ProductEntity},
    entities::transfer::{self, ActiveModel as TransferActiveModel, Entity as TransferEntity},
    entities::transfer_item::{self, Entity as TransferItemEntity},
    entities::{center, notification},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{DateTime, Datelike, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, LoaderTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Transfer request lifecycle. `Completed` is accepted when parsing stored
/// data but the service never produces it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Completed,
}

/// Optional filters for the transfer list.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct TransferListQuery {
    /// Filter by lifecycle status (pending, approved, rejected, cancelled)
    pub status: Option<String>,
    /// Maximum number of transfers to return
    pub limit: Option<u64>,
    /// Number of transfers to skip
    pub offset: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTransferRequest {
    pub destination_center_id: Uuid,
    #[validate(length(min = 1, message = "At least one item is required"))]
    pub items: Vec<TransferItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransferItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransferItemResponse {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransferResponse {
    pub id: Uuid,
    pub doc_no: String,
    pub destination_center_id: Uuid,
    pub destination_name: String,
    pub status: String,
    pub requested_by: String,
    pub approved_by: Option<String>,
    pub items: Vec<TransferItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Service for the supply transfer request workflow.
#[derive(Clone)]
pub struct TransferService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl TransferService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Lists transfer requests, newest first, with their line items.
    #[instrument(skip(self, query))]
    pub async fn list_transfers(
        &self,
        query: TransferListQuery,
    ) -> Result<Vec<TransferResponse>, ServiceError> {
        let db = &*self.db_pool;

        let mut finder = TransferEntity::find().order_by_desc(transfer::Column::CreatedAt);
        if let Some(raw) = &query.status {
            let status: TransferStatus = raw.parse().map_err(|_| {
                ServiceError::ValidationError(format!("Unknown transfer status '{}'", raw))
            })?;
            finder = finder.filter(transfer::Column::Status.eq(status.to_string()));
        }
        if let Some(limit) = query.limit {
            finder = finder.limit(limit);
        }
        if let Some(offset) = query.offset {
            finder = finder.offset(offset);
        }

        let transfers = finder.all(db).await?;
        let items = transfers.load_many(TransferItemEntity, db).await?;

        Ok(transfers
            .into_iter()
            .zip(items)
            .map(|(model, items)| model_to_response(model, items))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_transfer(&self, id: Uuid) -> Result<TransferResponse, ServiceError> {
        let db = &*self.db_pool;
        let transfer = TransferEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Transfer {} not found", id)))?;

        let items = TransferItemEntity::find()
            .filter(transfer_item::Column::TransferId.eq(id))
            .all(db)
            .await?;

        Ok(model_to_response(transfer, items))
    }

    /// Opens a new transfer request in `pending` status. No stock moves here;
    /// quantities are only deducted on approval.
    #[instrument(skip(self, request), fields(destination = %request.destination_center_id))]
    pub async fn create_transfer(
        &self,
        request: CreateTransferRequest,
        requested_by: &str,
    ) -> Result<TransferResponse, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;
        for item in &request.items {
            if item.quantity < 1 {
                return Err(ServiceError::ValidationError(
                    "Item quantity must be at least 1".to_string(),
                ));
            }
        }

        let db = &*self.db_pool;
        let now = Utc::now();
        let transfer_id = Uuid::new_v4();

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for transfer creation");
            ServiceError::DatabaseError(e)
        })?;

        let destination = center::Entity::find_by_id(request.destination_center_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Center {} not found",
                    request.destination_center_id
                ))
            })?;

        // Snapshot product name and unit so the document stays readable even
        // if the product record changes later.
        let mut item_models = Vec::with_capacity(request.items.len());
        for item in &request.items {
            let product = ProductEntity::find_by_id(item.product_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Product {} not found", item.product_id))
                })?;

            item_models.push(transfer_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                transfer_id: Set(transfer_id),
                product_id: Set(product.id),
                product_name: Set(product.name),
                quantity: Set(item.quantity),
                unit: Set(product.unit),
            });
        }

        let doc_no = next_doc_no(&txn, now).await?;

        let transfer_model = TransferActiveModel {
            id: Set(transfer_id),
            doc_no: Set(doc_no.clone()),
            destination_center_id: Set(destination.id),
            destination_name: Set(destination.name),
            status: Set(TransferStatus::Pending.to_string()),
            requested_by: Set(requested_by.to_string()),
            approved_by: Set(None),
            created_at: Set(now),
            updated_at: Set(None),
        };

        let saved = transfer_model.insert(&txn).await?;
        let mut saved_items = Vec::with_capacity(item_models.len());
        for item in item_models {
            saved_items.push(item.insert(&txn).await?);
        }

        txn.commit().await?;
        info!(%transfer_id, %doc_no, "Created transfer request");

        self.emit(Event::TransferCreated {
            transfer_id,
            doc_no,
        })
        .await;

        Ok(model_to_response(saved, saved_items))
    }

    /// Approves a pending transfer and deducts stock.
    ///
    /// Every line is checked before any quantity changes; a single short item
    /// fails the whole approval and leaves both the stock and the request
    /// untouched.
    #[instrument(skip(self), fields(transfer_id = %id))]
    pub async fn approve_transfer(
        &self,
        id: Uuid,
        approved_by: &str,
    ) -> Result<TransferResponse, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for transfer approval");
            ServiceError::DatabaseError(e)
        })?;

        let transfer = TransferEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Transfer {} not found", id)))?;

        if transfer.status != TransferStatus::Pending.to_string() {
            return Err(ServiceError::InvalidStatus(format!(
                "Transfer {} is '{}', only pending transfers can be approved",
                transfer.doc_no, transfer.status
            )));
        }

        let items = TransferItemEntity::find()
            .filter(transfer_item::Column::TransferId.eq(id))
            .all(&txn)
            .await?;

        // Check everything first. A missing product counts as zero on hand.
        let mut products = Vec::with_capacity(items.len());
        for item in &items {
            let product = ProductEntity::find_by_id(item.product_id).one(&txn).await?;
            match product {
                Some(p) if p.quantity >= item.quantity => products.push((p, item.quantity)),
                other => {
                    let on_hand = other.map(|p| p.quantity).unwrap_or(0);
                    return Err(ServiceError::InsufficientStock(format!(
                        "{} (have {}, requested {})",
                        item.product_name, on_hand, item.quantity
                    )));
                }
            }
        }

        // All lines are covered; deduct.
        for (product, quantity) in products {
            let new_quantity = product.quantity - quantity;
            let mut active: product::ActiveModel = product.into();
            active.quantity = Set(new_quantity);
            active.updated_at = Set(now);
            active.update(&txn).await?;
        }

        let doc_no = transfer.doc_no.clone();
        let destination = transfer.destination_name.clone();
        let mut active: transfer::ActiveModel = transfer.into();
        active.status = Set(TransferStatus::Approved.to_string());
        active.approved_by = Set(Some(approved_by.to_string()));
        active.updated_at = Set(Some(now));
        let updated = active.update(&txn).await?;

        notification::ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set("system".to_string()),
            title: Set("Transfer approved".to_string()),
            message: Set(format!("{} for {} has been approved", doc_no, destination)),
            read: Set(false),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        info!(transfer_id = %id, %doc_no, "Approved transfer and deducted stock");

        self.emit(Event::TransferApproved {
            transfer_id: id,
            doc_no,
        })
        .await;

        Ok(model_to_response(updated, items))
    }

    /// Rejects a pending transfer. Stock is never touched.
    #[instrument(skip(self), fields(transfer_id = %id))]
    pub async fn reject_transfer(
        &self,
        id: Uuid,
        rejected_by: &str,
    ) -> Result<TransferResponse, ServiceError> {
        let db = &*self.db_pool;

        let transfer = TransferEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Transfer {} not found", id)))?;

        if transfer.status != TransferStatus::Pending.to_string() {
            return Err(ServiceError::InvalidStatus(format!(
                "Transfer {} is '{}', only pending transfers can be rejected",
                transfer.doc_no, transfer.status
            )));
        }

        let doc_no = transfer.doc_no.clone();
        let mut active: transfer::ActiveModel = transfer.into();
        active.status = Set(TransferStatus::Rejected.to_string());
        active.approved_by = Set(Some(rejected_by.to_string()));
        active.updated_at = Set(Some(Utc::now()));
        let updated = active.update(db).await?;

        let items = TransferItemEntity::find()
            .filter(transfer_item::Column::TransferId.eq(id))
            .all(db)
            .await?;

        info!(transfer_id = %id, %doc_no, "Rejected transfer");

        self.emit(Event::TransferRejected {
            transfer_id: id,
            doc_no,
        })
        .await;

        Ok(model_to_response(updated, items))
    }

    /// Cancels an approved transfer and returns the deducted quantities to
    /// stock. Products deleted since approval are skipped.
    #[instrument(skip(self), fields(transfer_id = %id))]
    pub async fn cancel_transfer(&self, id: Uuid) -> Result<TransferResponse, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for transfer cancellation");
            ServiceError::DatabaseError(e)
        })?;

        let transfer = TransferEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Transfer {} not found", id)))?;

        if transfer.status != TransferStatus::Approved.to_string() {
            return Err(ServiceError::InvalidStatus(format!(
                "Transfer {} is '{}', only approved transfers can be cancelled",
                transfer.doc_no, transfer.status
            )));
        }

        let items = TransferItemEntity::find()
            .filter(transfer_item::Column::TransferId.eq(id))
            .all(&txn)
            .await?;

        for item in &items {
            match ProductEntity::find_by_id(item.product_id).one(&txn).await? {
                Some(product) => {
                    let new_quantity = product.quantity + item.quantity;
                    let mut active: product::ActiveModel = product.into();
                    active.quantity = Set(new_quantity);
                    active.updated_at = Set(now);
                    active.update(&txn).await?;
                }
                None => {
                    warn!(
                        product_id = %item.product_id,
                        product_name = %item.product_name,
                        "Product no longer exists, skipping stock return"
                    );
                }
            }
        }

        let doc_no = transfer.doc_no.clone();
        let mut active: transfer::ActiveModel = transfer.into();
        active.status = Set(TransferStatus::Cancelled.to_string());
        active.updated_at = Set(Some(now));
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        info!(transfer_id = %id, %doc_no, "Cancelled transfer and returned stock");

        self.emit(Event::TransferCancelled {
            transfer_id: id,
            doc_no,
        })
        .await;

        Ok(model_to_response(updated, items))
    }

    async fn emit(&self, event: Event) {
        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(event).await {
                error!(error = %e, "Failed to emit transfer event");
            }
        }
    }
}

/// Next document number for the current year, `TR-{year}-{seq:04}`.
///
/// Counted inside the caller's transaction; the unique index on `doc_no`
/// turns a lost race into a constraint error rather than a duplicate.
async fn next_doc_no<C: ConnectionTrait>(
    conn: &C,
    now: DateTime<Utc>,
) -> Result<String, ServiceError> {
    let year = now.year();
    let prefix = format!("TR-{}-", year);
    let count = TransferEntity::find()
        .filter(transfer::Column::DocNo.starts_with(&prefix))
        .count(conn)
        .await?;
    Ok(format!("{}{:04}", prefix, count + 1))
}

fn model_to_response(
    model: transfer::Model,
    items: Vec<transfer_item::Model>,
) -> TransferResponse {
    TransferResponse {
        id: model.id,
        doc_no: model.doc_no,
        destination_center_id: model.destination_center_id,
        destination_name: model.destination_name,
        status: model.status,
        requested_by: model.requested_by,
        approved_by: model.approved_by,
        items: items
            .into_iter()
            .map(|item| TransferItemResponse {
                product_id: item.product_id,
                product_name: item.product_name,
                quantity: item.quantity,
                unit: item.unit,
            })
            .collect(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            TransferStatus::Pending,
            TransferStatus::Approved,
            TransferStatus::Rejected,
            TransferStatus::Cancelled,
            TransferStatus::Completed,
        ] {
            let text = status.to_string();
            assert_eq!(text.parse::<TransferStatus>().unwrap(), status);
        }
    }

    #[test]
    fn doc_no_format_is_zero_padded() {
        // next_doc_no needs a live connection; the format itself is fixed here.
        let formatted = format!("TR-{}-{:04}", 2026, 7u64);
        assert_eq!(formatted, "TR-2026-0007");
    }
}
