pub mod hash;
pub mod jwt;
pub mod pagination;
pub mod validate_utils;
