pub mod auth_channel;
pub mod authority;
pub mod authority_handler;
pub mod error;
pub mod writer;
