mod auth_service;
mod token_codec;
mod user_service;

pub use auth_service::*;
pub use token_codec::*;
pub use user_service::*;
