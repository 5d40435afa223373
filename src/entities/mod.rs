//! SeaORM entities for the shelter management schema.

pub mod activity_log;
pub mod beneficiary;
pub mod center;
pub mod notification;
pub mod product;
pub mod transfer;
pub mod transfer_item;
pub mod user;
