use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A stock-keeping unit in the shared supply inventory.
///
/// `quantity` is mutated only by direct stock adjustments and by transfer
/// approve/cancel transitions; it must never go negative through approval.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Product name is required"))]
    pub name: String,

    /// One of: food, medicine, equipment, clothing, other
    pub category: String,

    pub quantity: i32,

    #[validate(length(min = 1, max = 50, message = "Unit label is required"))]
    pub unit: String,

    /// Alert threshold: quantity at or below this level is "low stock"
    pub min_level: i32,

    pub location: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transfer_item::Entity")]
    TransferItems,
}

impl Related<super::transfer_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransferItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Low-stock check used by inventory alerts and the dashboard.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_level
    }
}
