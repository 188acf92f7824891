pub mod admin;
pub mod articles;
pub mod auth_routes;
pub mod categories;
pub mod users;
