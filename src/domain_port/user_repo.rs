use crate::application_port::AuthError;
use crate::domain_model::{UserId, UserRecord};

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert(&self, record: &UserRecord) -> Result<(), AuthError>;
    async fn find_by_login(&self, login: &str) -> Result<Option<UserRecord>, AuthError>;
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>, AuthError>;
    async fn login_or_email_taken(&self, login: &str, email: &str) -> Result<bool, AuthError>;
}
