use crate::application_port::{AuthError, TokenCodec};
use crate::domain_model::{Claims, TokenId, UserId};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Policy layer over the codec: kind match, then expiry. The two failure
/// modes stay distinct so callers can tell a cross-used token (`WrongType`)
/// from one that simply aged out (`Expired`).
pub struct TokenValidator {
    codec: Arc<dyn TokenCodec>,
}

impl TokenValidator {
    pub fn new(codec: Arc<dyn TokenCodec>) -> Self {
        TokenValidator { codec }
    }

    pub fn validate_access(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, AuthError> {
        match self.codec.decode(token)? {
            Claims::Access {
                subject_user_id,
                expires_at,
                ..
            } => {
                if expires_at <= now.timestamp() {
                    return Err(AuthError::Expired);
                }
                subject_user_id.parse().map_err(|_| AuthError::Malformed)
            }
            Claims::Refresh { .. } => Err(AuthError::WrongType),
        }
    }

    pub fn validate_refresh(&self, token: &str, now: DateTime<Utc>) -> Result<TokenId, AuthError> {
        match self.codec.decode(token)? {
            Claims::Refresh {
                token_id,
                expires_at,
            } => {
                if expires_at <= now.timestamp() {
                    return Err(AuthError::Expired);
                }
                token_id.parse().map_err(|_| AuthError::Malformed)
            }
            Claims::Access { .. } => Err(AuthError::WrongType),
        }
    }
}
