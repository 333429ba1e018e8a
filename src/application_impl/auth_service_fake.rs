use crate::application_port::*;
use crate::domain_model::{AccessToken, RefreshToken, TokenPair, UserId};

#[derive(Debug)]
pub struct FakeAuthService;

impl FakeAuthService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FakeAuthService {
    fn default() -> Self {
        Self::new()
    }
}

// Minimal fake for wiring and manual poking: deterministic ids, prefix
// "tokens", no store behind it. Rotation here is NOT single-use.
#[async_trait::async_trait]
impl AuthService for FakeAuthService {
    async fn register(&self, request: RegisterInput) -> Result<UserId, AuthError> {
        Ok(fake_id(&request.login))
    }

    async fn login(&self, request: LoginInput) -> Result<LoginResult, AuthError> {
        Ok(LoginResult {
            user_id: fake_id(&request.login),
            login: request.login.clone(),
            tokens: fake_pair(&request.login),
        })
    }

    async fn verify_access(&self, token: &str) -> Result<UserId, AuthError> {
        if let Some(login) = token.strip_prefix("fake-access-token:") {
            Ok(fake_id(login))
        } else {
            Err(AuthError::Malformed)
        }
    }

    async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        if let Some(login) = refresh_token.strip_prefix("fake-refresh-token:") {
            Ok(fake_pair(login))
        } else {
            Err(AuthError::Malformed)
        }
    }
}

fn fake_id(login: &str) -> UserId {
    UserId(uuid::Uuid::new_v5(
        &uuid::Uuid::NAMESPACE_OID,
        login.as_bytes(),
    ))
}

fn fake_pair(login: &str) -> TokenPair {
    TokenPair {
        access_token: AccessToken(format!("fake-access-token:{}", login)),
        refresh_token: RefreshToken(format!("fake-refresh-token:{}", login)),
    }
}
