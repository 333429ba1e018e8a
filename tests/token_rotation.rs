use snipegate::application_impl::{JwtHs256Codec, RealAuthService, StaticSecretProvider};
use snipegate::application_port::{AuthError, AuthService, LoginInput, RegisterInput, TokenCodec};
use snipegate::infra_memory::{MemoryRefreshTokenStore, MemoryUserRepo};
use std::sync::Arc;

fn service() -> RealAuthService {
    let codec: Arc<dyn TokenCodec> = Arc::new(JwtHs256Codec::new(Arc::new(
        StaticSecretProvider::new("integration-secret"),
    )));
    RealAuthService::new(
        Arc::new(MemoryUserRepo::new()),
        Arc::new(MemoryRefreshTokenStore::new()),
        codec,
    )
}

async fn login(service: &RealAuthService, login: &str) -> snipegate::domain_model::TokenPair {
    service
        .register(RegisterInput {
            email: format!("{login}@example.com"),
            login: login.to_string(),
            password: "Sup3rSecret".to_string(),
        })
        .await
        .unwrap();
    service
        .login(LoginInput {
            login: login.to_string(),
            password: "Sup3rSecret".to_string(),
        })
        .await
        .unwrap()
        .tokens
}

/// The full credential lifecycle: login yields (A1, R1); rotating R1 yields
/// a distinct (A2, R2) and permanently retires R1; R2 keeps working.
#[tokio::test]
async fn refresh_tokens_are_single_use_across_the_chain() {
    let service = service();
    let first = login(&service, "u1").await;

    let second = service.rotate(&first.refresh_token.0).await.unwrap();
    assert_ne!(second.access_token.0, first.access_token.0);
    assert_ne!(second.refresh_token.0, first.refresh_token.0);

    assert!(matches!(
        service.rotate(&first.refresh_token.0).await,
        Err(AuthError::StaleOrForgedToken)
    ));

    let third = service.rotate(&second.refresh_token.0).await.unwrap();
    assert_ne!(third.refresh_token.0, second.refresh_token.0);
}

#[tokio::test]
async fn each_user_rotates_independently() {
    let service = service();
    let pair_a = login(&service, "u1").await;
    let pair_b = login(&service, "u2").await;

    // Rotating one user's chain leaves the other's intact.
    service.rotate(&pair_a.refresh_token.0).await.unwrap();
    assert!(service.rotate(&pair_b.refresh_token.0).await.is_ok());
}

#[tokio::test]
async fn a_second_login_retires_the_earlier_refresh_token() {
    let service = service();
    let first = login(&service, "u1").await;

    // One active refresh record per user: a fresh login replaces it.
    let second = service
        .login(LoginInput {
            login: "u1".to_string(),
            password: "Sup3rSecret".to_string(),
        })
        .await
        .unwrap()
        .tokens;

    assert!(matches!(
        service.rotate(&first.refresh_token.0).await,
        Err(AuthError::StaleOrForgedToken)
    ));
    assert!(service.rotate(&second.refresh_token.0).await.is_ok());
}
