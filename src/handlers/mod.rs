pub mod beneficiaries;
pub mod centers;
pub mod dashboard;
pub mod inventory;
pub mod logs;
pub mod notifications;
pub mod transfers;

use crate::db::DbPool;
use crate::events::EventSender;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub transfers: Arc<crate::services::transfers::TransferService>,
    pub inventory: Arc<crate::services::inventory::InventoryService>,
    pub centers: Arc<crate::services::centers::CenterService>,
    pub beneficiaries: Arc<crate::services::beneficiaries::BeneficiaryService>,
    pub notifications: Arc<crate::services::notifications::NotificationService>,
    pub activity_log: Arc<crate::services::activity_log::ActivityLogService>,
    pub dashboard: Arc<crate::services::dashboard::DashboardService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            transfers: Arc::new(crate::services::transfers::TransferService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            inventory: Arc::new(crate::services::inventory::InventoryService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            centers: Arc::new(crate::services::centers::CenterService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            beneficiaries: Arc::new(crate::services::beneficiaries::BeneficiaryService::new(
                db_pool.clone(),
                event_sender,
            )),
            notifications: Arc::new(crate::services::notifications::NotificationService::new(
                db_pool.clone(),
            )),
            activity_log: Arc::new(crate::services::activity_log::ActivityLogService::new(
                db_pool.clone(),
            )),
            dashboard: Arc::new(crate::services::dashboard::DashboardService::new(db_pool)),
        }
    }
}
