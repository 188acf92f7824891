pub mod client;
pub mod query_builder;
pub mod repository_impl;
pub mod repository_traits;
pub mod resource_paths;
