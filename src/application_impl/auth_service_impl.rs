use crate::application_impl::TokenValidator;
use crate::application_port::{
    AuthError, AuthService, LoginInput, LoginResult, RegisterInput, TokenCodec,
};
use crate::domain_model::{REFRESH_TOKEN_TTL, TokenPair, UserId, UserRecord};
use crate::domain_port::{RefreshTokenStore, UserRepo};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MAX_LEN: usize = 32;

/// Issues and rotates token pairs, and fronts registration/login. All
/// collaborators are constructor-injected; the service holds no state of
/// its own beyond them.
pub struct RealAuthService {
    user_repo: Arc<dyn UserRepo>,
    refresh_store: Arc<dyn RefreshTokenStore>,
    codec: Arc<dyn TokenCodec>,
    validator: TokenValidator,
}

impl RealAuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        refresh_store: Arc<dyn RefreshTokenStore>,
        codec: Arc<dyn TokenCodec>,
    ) -> Self {
        let validator = TokenValidator::new(codec.clone());
        Self {
            user_repo,
            refresh_store,
            codec,
            validator,
        }
    }

    fn validate_register(request: &RegisterInput) -> Result<(), AuthError> {
        if request.login.is_empty() {
            return Err(AuthError::InvalidInput("login must not be empty".into()));
        }
        if request.email.is_empty() || !request.email.contains('@') {
            return Err(AuthError::InvalidInput("email is not valid".into()));
        }
        validate_password(&request.password)
    }

    /// Mint access + refresh for an already-authenticated user and durably
    /// record the new refresh id. The pair is only handed out once the
    /// store write succeeded; on store failure the minted tokens are
    /// dropped on the floor.
    pub async fn issue_for_login(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AuthError> {
        let access_token = self.codec.encode_access(user_id, now)?;
        let (token_id, refresh_token) = self.codec.encode_refresh(now)?;

        self.refresh_store
            .replace(user_id, &token_id, now + REFRESH_TOKEN_TTL)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < PASSWORD_MIN_LEN || password.len() > PASSWORD_MAX_LEN {
        return Err(AuthError::InvalidInput(format!(
            "password must be {} to {} characters",
            PASSWORD_MIN_LEN, PASSWORD_MAX_LEN
        )));
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err(AuthError::InvalidInput(
            "password must contain a lowercase letter, an uppercase letter and a digit".into(),
        ));
    }

    Ok(())
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn register(&self, request: RegisterInput) -> Result<UserId, AuthError> {
        Self::validate_register(&request)?;

        if self
            .user_repo
            .login_or_email_taken(&request.login, &request.email)
            .await?
        {
            return Err(AuthError::UserExists);
        }

        let record = UserRecord {
            user_id: UserId(Uuid::new_v4()),
            email: request.email,
            login: request.login,
            password: request.password,
        };
        self.user_repo.insert(&record).await?;
        debug!(user_id = %record.user_id, "registered user");

        Ok(record.user_id)
    }

    async fn login(&self, request: LoginInput) -> Result<LoginResult, AuthError> {
        let record = self
            .user_repo
            .find_by_login(&request.login)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Opaque comparison; credential storage strategy is the user
        // store's concern, not ours.
        if record.password != request.password {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.issue_for_login(record.user_id, Utc::now()).await?;
        Ok(LoginResult {
            user_id: record.user_id,
            login: record.login,
            tokens,
        })
    }

    async fn verify_access(&self, token: &str) -> Result<UserId, AuthError> {
        self.validator.validate_access(token, Utc::now())
    }

    async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let now = Utc::now();
        let token_id = self.validator.validate_refresh(refresh_token, now)?;

        // A signed, unexpired token whose id is off the books was either
        // already rotated or never ours. Single-use refresh tokens make
        // this the theft/replay tripwire.
        let Some(user_id) = self.refresh_store.lookup_user(&token_id).await? else {
            warn!(%token_id, "refresh token id not on record, possible replay");
            return Err(AuthError::StaleOrForgedToken);
        };

        self.issue_for_login(user_id, now).await
    }
}
