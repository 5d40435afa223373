use crate::{
    db::DbPool,
    entities::center::{self, Entity as CenterEntity},
    entities::transfer::{self, Entity as TransferEntity},
    entities::transfer_item::Entity as TransferItemEntity,
    errors::ServiceError,
    services::transfers::TransferStatus,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    /// Centers currently marked active
    pub centers: u64,
    /// Total sheltered population across all centers
    pub population: i64,
    /// Transfer requests awaiting a decision
    pub pending: u64,
    /// Approved transfer requests
    pub completed: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopCenter {
    pub name: String,
    /// Number of transfer requests for this destination
    pub count: u64,
    /// Total line items across those requests
    pub total_items: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChartData {
    pub pending: u64,
    pub approved: u64,
    pub total: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub top_centers: Vec<TopCenter>,
    pub chart_data: ChartData,
}

/// Read-only aggregates for the overview screen.
#[derive(Clone)]
pub struct DashboardService {
    db_pool: Arc<DbPool>,
}

impl DashboardService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn overview(&self) -> Result<DashboardResponse, ServiceError> {
        let db = &*self.db_pool;

        let centers = CenterEntity::find()
            .filter(center::Column::Status.eq("active"))
            .count(db)
            .await?;

        let population: i64 = CenterEntity::find()
            .select_only()
            .column_as(center::Column::Population.sum(), "total")
            .into_tuple::<Option<i64>>()
            .one(db)
            .await?
            .flatten()
            .unwrap_or(0);

        let pending = TransferEntity::find()
            .filter(transfer::Column::Status.eq(TransferStatus::Pending.to_string()))
            .count(db)
            .await?;

        let approved = TransferEntity::find()
            .filter(transfer::Column::Status.eq(TransferStatus::Approved.to_string()))
            .count(db)
            .await?;

        let top_centers = self.top_destinations(5).await?;

        Ok(DashboardResponse {
            stats: DashboardStats {
                centers,
                population,
                pending,
                completed: approved,
            },
            top_centers,
            chart_data: ChartData {
                pending,
                approved,
                total: pending + approved,
            },
        })
    }

    /// Destinations ranked by number of transfer requests. Ties keep an
    /// arbitrary but stable order by name.
    async fn top_destinations(&self, limit: usize) -> Result<Vec<TopCenter>, ServiceError> {
        let db = &*self.db_pool;
        let transfers = TransferEntity::find()
            .find_with_related(TransferItemEntity)
            .all(db)
            .await?;

        let mut grouped: HashMap<String, (u64, u64)> = HashMap::new();
        for (model, items) in transfers {
            let entry = grouped.entry(model.destination_name).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += items.len() as u64;
        }

        let mut ranked: Vec<TopCenter> = grouped
            .into_iter()
            .map(|(name, (count, total_items))| TopCenter {
                name,
                count,
                total_items,
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        ranked.truncate(limit);
        Ok(ranked)
    }
}
