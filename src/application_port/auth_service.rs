use crate::domain_model::{TokenPair, UserId};

/// Failure taxonomy for the whole auth surface. Token-shaped errors stay
/// distinct on purpose: clients treat `Expired` (re-login) differently from
/// `BadSignature`/`WrongType` (reject) and from `StaleOrForgedToken`
/// (possible replay of a superseded refresh token).
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("signing secret unavailable")]
    SecretUnavailable,
    #[error("malformed token")]
    Malformed,
    #[error("bad token signature")]
    BadSignature,
    #[error("wrong token kind")]
    WrongType,
    #[error("token expired")]
    Expired,
    #[error("refresh token is stale or forged")]
    StaleOrForgedToken,
    #[error("store failure: {0}")]
    StoreFailure(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user already exists")]
    UserExists,
    #[error("user not found")]
    UserNotFound,
    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user_id: UserId,
    pub login: String,
    pub tokens: TokenPair,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, request: RegisterInput) -> Result<UserId, AuthError>;
    async fn login(&self, request: LoginInput) -> Result<LoginResult, AuthError>;
    /// Check an access token presented for a protected resource.
    async fn verify_access(&self, token: &str) -> Result<UserId, AuthError>;
    /// Exchange a refresh token for a fresh pair, retiring its identifier.
    async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;
}
