pub mod auth_service;
pub mod item_service;
pub mod report_service;
