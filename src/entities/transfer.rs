use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An inter-center transfer request.
///
/// `doc_no` is the human-readable document number (`TR-<year>-<NNNN>`),
/// unique across all transfers. `destination_name` is a denormalized copy of
/// the center name taken at creation time, kept for the audit trail even if
/// the center is later renamed or removed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transfers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub doc_no: String,

    pub destination_center_id: Uuid,
    pub destination_name: String,

    /// pending | approved | rejected | cancelled (completed is reserved)
    pub status: String,

    pub requested_by: String,
    pub approved_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transfer_item::Entity")]
    Items,
    #[sea_orm(
        belongs_to = "super::center::Entity",
        from = "Column::DestinationCenterId",
        to = "super::center::Column::Id"
    )]
    DestinationCenter,
}

impl Related<super::transfer_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DestinationCenter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
