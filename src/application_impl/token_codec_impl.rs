use crate::application_port::{AuthError, TokenCodec};
use crate::domain_model::{
    ACCESS_TOKEN_TTL, AccessToken, Claims, REFRESH_TOKEN_TTL, RefreshToken, TokenId, UserId,
};
use crate::domain_port::SecretProvider;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::sync::Arc;

/// HS256-only JWT codec. The secret is re-read per operation so a missing
/// `SECRET_KEY` surfaces as `SecretUnavailable` at the exact call that
/// needed it.
pub struct JwtHs256Codec {
    secrets: Arc<dyn SecretProvider>,
}

impl JwtHs256Codec {
    pub fn new(secrets: Arc<dyn SecretProvider>) -> Self {
        JwtHs256Codec { secrets }
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let secret = self.secrets.signing_secret()?;
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(&secret),
        )
        .map_err(|e| AuthError::InternalError(e.to_string()))
    }
}

impl TokenCodec for JwtHs256Codec {
    fn encode_access(&self, user_id: UserId, now: DateTime<Utc>) -> Result<AccessToken, AuthError> {
        // `expiresAt` has second precision, so the random id is what keeps
        // two mints for the same user within one second from colliding.
        let claims = Claims::Access {
            subject_user_id: user_id.to_string(),
            token_id: TokenId::random().to_string(),
            expires_at: (now + ACCESS_TOKEN_TTL).timestamp(),
        };
        Ok(AccessToken(self.sign(&claims)?))
    }

    fn encode_refresh(&self, now: DateTime<Utc>) -> Result<(TokenId, RefreshToken), AuthError> {
        let token_id = TokenId::random();
        let claims = Claims::Refresh {
            token_id: token_id.to_string(),
            expires_at: (now + REFRESH_TOKEN_TTL).timestamp(),
        };
        Ok((token_id, RefreshToken(self.sign(&claims)?)))
    }

    fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let secret = self.secrets.signing_secret()?;

        // Signature and algorithm only. A token whose header declares
        // anything but HS256 is rejected here, which closes the
        // algorithm-substitution hole. Expiry lives in our own `expiresAt`
        // claim and is the validator's job, so the library's `exp` handling
        // is switched off.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &DecodingKey::from_secret(&secret), &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName => AuthError::BadSignature,
                _ => AuthError::Malformed,
            })?;
        Ok(data.claims)
    }
}
