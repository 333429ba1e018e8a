// store

mod refresh_token_store;
mod secret_provider;

pub use refresh_token_store::*;
pub use secret_provider::*;

// repo

mod user_repo;

pub use user_repo::*;
