pub const USERS_PATH: &str = "users";
pub const ARTICLES_PATH: &str = "articles";
pub const CATEGORIES_PATH: &str = "categories";
pub const COMMENTS_PATH: &str = "comments";
pub const REPLIES_PATH: &str = "replies";
pub const LIKES_PATH: &str = "likes";
