pub mod auth_controller;
pub mod home_controller;
pub mod seller_controller;
pub mod user_controller;
