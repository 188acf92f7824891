pub mod article_service;
pub mod auth_service;
pub mod category_service;
pub mod interaction_service;
pub mod user_service;
