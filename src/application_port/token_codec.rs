use super::AuthError;
use crate::domain_model::{AccessToken, Claims, RefreshToken, TokenId, UserId};
use chrono::{DateTime, Utc};

/// Creates and parses signed tokens. `decode` verifies signature and signing
/// algorithm only; kind and expiry are policy and belong to the validator.
pub trait TokenCodec: Send + Sync {
    fn encode_access(&self, user_id: UserId, now: DateTime<Utc>) -> Result<AccessToken, AuthError>;
    fn encode_refresh(&self, now: DateTime<Utc>) -> Result<(TokenId, RefreshToken), AuthError>;
    fn decode(&self, token: &str) -> Result<Claims, AuthError>;
}
