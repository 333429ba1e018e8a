use crate::application_port::AuthError;
use crate::domain_model::{TokenId, UserId};
use crate::domain_port::RefreshTokenStore;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct Records {
    by_user: HashMap<UserId, TokenId>,
    by_token: HashMap<TokenId, (UserId, DateTime<Utc>)>,
}

/// In-process refresh store for the `memory` backend and tests. One mutex
/// over both maps keeps `replace` atomic; the forward and reverse entries
/// can never disagree.
pub struct MemoryRefreshTokenStore {
    records: Mutex<Records>,
}

impl MemoryRefreshTokenStore {
    pub fn new() -> Self {
        MemoryRefreshTokenStore {
            records: Mutex::new(Records::default()),
        }
    }
}

impl Default for MemoryRefreshTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn lookup_user(&self, token_id: &TokenId) -> Result<Option<UserId>, AuthError> {
        let records = self
            .records
            .lock()
            .map_err(|_| AuthError::StoreFailure("refresh store lock poisoned".into()))?;

        Ok(records
            .by_token
            .get(token_id)
            .and_then(|(user_id, expires_at)| (Utc::now() < *expires_at).then_some(*user_id)))
    }

    async fn replace(
        &self,
        user_id: UserId,
        token_id: &TokenId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| AuthError::StoreFailure("refresh store lock poisoned".into()))?;

        if let Some(old) = records.by_user.insert(user_id, *token_id) {
            records.by_token.remove(&old);
        }
        records.by_token.insert(*token_id, (user_id, expires_at));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn replace_retires_the_previous_id() {
        let store = MemoryRefreshTokenStore::new();
        let user_id = UserId(uuid::Uuid::new_v4());
        let expires = Utc::now() + Duration::hours(1);

        let first = TokenId::random();
        store.replace(user_id, &first, expires).await.unwrap();
        assert_eq!(store.lookup_user(&first).await.unwrap(), Some(user_id));

        let second = TokenId::random();
        store.replace(user_id, &second, expires).await.unwrap();
        assert_eq!(store.lookup_user(&first).await.unwrap(), None);
        assert_eq!(store.lookup_user(&second).await.unwrap(), Some(user_id));
    }

    #[tokio::test]
    async fn users_do_not_interfere() {
        let store = MemoryRefreshTokenStore::new();
        let expires = Utc::now() + Duration::hours(1);

        let (user_a, user_b) = (UserId(uuid::Uuid::new_v4()), UserId(uuid::Uuid::new_v4()));
        let (id_a, id_b) = (TokenId::random(), TokenId::random());
        store.replace(user_a, &id_a, expires).await.unwrap();
        store.replace(user_b, &id_b, expires).await.unwrap();

        assert_eq!(store.lookup_user(&id_a).await.unwrap(), Some(user_a));
        assert_eq!(store.lookup_user(&id_b).await.unwrap(), Some(user_b));
    }

    #[tokio::test]
    async fn expired_records_are_invisible() {
        let store = MemoryRefreshTokenStore::new();
        let user_id = UserId(uuid::Uuid::new_v4());
        let token_id = TokenId::random();

        store
            .replace(user_id, &token_id, Utc::now() - Duration::seconds(1))
            .await
            .unwrap();
        assert_eq!(store.lookup_user(&token_id).await.unwrap(), None);
    }
}
