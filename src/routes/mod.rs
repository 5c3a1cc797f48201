pub mod auth;
pub mod mock_email;
pub mod proxy;
