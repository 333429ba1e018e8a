use crate::application_port::AuthError;

/// Supplies the shared HS256 signing secret. Implementations must fail
/// closed: no secret means `SecretUnavailable`, never an empty key.
pub trait SecretProvider: Send + Sync {
    fn signing_secret(&self) -> Result<Vec<u8>, AuthError>;
}
