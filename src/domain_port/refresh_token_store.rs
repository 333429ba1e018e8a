use crate::application_port::AuthError;
use crate::domain_model::{TokenId, UserId};
use chrono::{DateTime, Utc};

/// Owns the one live refresh-token record per user.
///
/// Per-user lifecycle: no record, then active after first login, then a new
/// active record on each rotation. `replace` retires the previous id in the
/// same step, so a superseded id is rejected by `lookup_user` even while its
/// token string is unexpired.
#[async_trait::async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Reverse lookup: which user currently owns this token id, if any.
    async fn lookup_user(&self, token_id: &TokenId) -> Result<Option<UserId>, AuthError>;
    /// Atomic upsert keyed by user. Must not leave a window where the user
    /// has two records or none; the store-level atomicity is what makes
    /// concurrent rotations for one user safe without app-level locks.
    async fn replace(
        &self,
        user_id: UserId,
        token_id: &TokenId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError>;
}
