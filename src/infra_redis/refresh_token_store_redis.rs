use crate::application_port::AuthError;
use crate::domain_model::{TokenId, UserId};
use crate::domain_port::RefreshTokenStore;
use chrono::{DateTime, Utc};
use redis::aio::ConnectionManager;
use redis::{
    AsyncCommands, FromRedisValue, RedisError, RedisResult, RedisWrite, Script, ToRedisArgs, Value,
};

const REFRESH_REPLACE: &str = include_str!("refresh_replace.lua");

/// Two keys per record: `{prefix}:user:{uid}` holds the user's current
/// token id, `{prefix}:token:{tid}` holds the reverse lookup. The replace
/// script swaps both in one atomic step so concurrent rotations for the
/// same user cannot leave a superseded id alive. Key TTLs track the token
/// expiry, so dead records evict themselves.
pub struct RedisRefreshTokenStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisRefreshTokenStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        RedisRefreshTokenStore {
            conn,
            prefix: prefix.into(),
        }
    }

    fn user_key(&self, user_id: &UserId) -> String {
        format!("{}:user:{}", self.prefix, user_id)
    }

    fn token_key(&self, token_id: &TokenId) -> String {
        format!("{}:{}", self.token_key_prefix(), token_id)
    }

    fn token_key_prefix(&self) -> String {
        format!("{}:token", self.prefix)
    }

    fn ttl_secs(expires_at: DateTime<Utc>) -> u64 {
        let secs = (expires_at - Utc::now()).num_seconds();
        if secs <= 0 { 1 } else { secs as u64 }
    }
}

impl ToRedisArgs for UserId {
    fn write_redis_args<W>(&self, out: &mut W)
    where
        W: ?Sized + RedisWrite,
    {
        out.write_arg(self.to_string().as_bytes())
    }
}

impl FromRedisValue for UserId {
    fn from_redis_value(v: &Value) -> RedisResult<Self> {
        let s: String = redis::from_redis_value(v)?;
        let user_id = s.parse::<UserId>().map_err(|e| {
            RedisError::from((
                redis::ErrorKind::TypeError,
                "invalid UserId string",
                e.to_string(),
            ))
        })?;
        Ok(user_id)
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for RedisRefreshTokenStore {
    async fn lookup_user(&self, token_id: &TokenId) -> Result<Option<UserId>, AuthError> {
        let mut conn = self.conn.clone();
        let val: Option<UserId> = conn
            .get(self.token_key(token_id))
            .await
            .map_err(|e| AuthError::StoreFailure(e.to_string()))?;
        Ok(val)
    }

    async fn replace(
        &self,
        user_id: UserId,
        token_id: &TokenId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let mut conn = self.conn.clone();
        let script = Script::new(REFRESH_REPLACE);
        let _: () = script
            .key(self.user_key(&user_id))
            .key(self.token_key(token_id))
            .arg(user_id.to_string())
            .arg(token_id.to_string())
            .arg(Self::ttl_secs(expires_at))
            .arg(self.token_key_prefix())
            .invoke_async(&mut conn)
            .await
            .map_err(|e| AuthError::StoreFailure(e.to_string()))?;
        Ok(())
    }
}
