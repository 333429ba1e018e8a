use super::AuthError;
use crate::domain_model::{UserId, UserProfile};

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    async fn profile(&self, user_id: UserId) -> Result<UserProfile, AuthError>;
}
