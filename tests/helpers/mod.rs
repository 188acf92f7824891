pub mod article_helpers;
pub mod mock_backend;
pub mod test_with_server;
pub mod user_helpers;

pub use user_helpers::{create_fake_login_test_user, create_login_admin};
