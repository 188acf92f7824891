pub mod article;
pub mod category;
pub mod comment;
pub mod like;
pub mod reply;
pub mod user;
