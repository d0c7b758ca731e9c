pub mod db_init;

pub mod auth_service;
pub mod dashboard_service;
pub mod seller_service;
pub mod user_service;
