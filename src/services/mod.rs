pub mod activity_log;
pub mod beneficiaries;
pub mod centers;
pub mod dashboard;
pub mod inventory;
pub mod notifications;
pub mod transfers;
