use crate::application_port::AuthError;
use crate::domain_model::{UserId, UserRecord};
use crate::domain_port::UserRepo;
use dashmap::DashMap;

/// DashMap-backed user store for the `memory` backend and tests.
pub struct MemoryUserRepo {
    users: DashMap<UserId, UserRecord>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        MemoryUserRepo {
            users: DashMap::new(),
        }
    }
}

impl Default for MemoryUserRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UserRepo for MemoryUserRepo {
    async fn insert(&self, record: &UserRecord) -> Result<(), AuthError> {
        self.users.insert(record.user_id, record.clone());
        Ok(())
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<UserRecord>, AuthError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().login == login)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>, AuthError> {
        Ok(self.users.get(&user_id).map(|entry| entry.value().clone()))
    }

    async fn login_or_email_taken(&self, login: &str, email: &str) -> Result<bool, AuthError> {
        Ok(self
            .users
            .iter()
            .any(|entry| entry.value().login == login || entry.value().email == email))
    }
}
