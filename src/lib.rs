pub mod backend;
pub mod config;
pub mod entities;
pub mod init;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;
