use crate::application_port::AuthError;
use crate::domain_port::SecretProvider;

pub const SECRET_KEY_VAR: &str = "SECRET_KEY";

/// Reads the signing secret from the process environment on every use. The
/// secret is assumed stable for the process lifetime, so no invalidation is
/// needed; an unset or empty variable fails every dependent operation.
pub struct EnvSecretProvider {
    var: String,
}

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self::with_var(SECRET_KEY_VAR)
    }

    pub fn with_var(var: impl Into<String>) -> Self {
        EnvSecretProvider { var: var.into() }
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretProvider for EnvSecretProvider {
    fn signing_secret(&self) -> Result<Vec<u8>, AuthError> {
        match std::env::var(&self.var) {
            Ok(secret) if !secret.is_empty() => Ok(secret.into_bytes()),
            _ => Err(AuthError::SecretUnavailable),
        }
    }
}

/// Fixed secret for tests and fake wiring.
pub struct StaticSecretProvider {
    secret: Vec<u8>,
}

impl StaticSecretProvider {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        StaticSecretProvider {
            secret: secret.into(),
        }
    }
}

impl SecretProvider for StaticSecretProvider {
    fn signing_secret(&self) -> Result<Vec<u8>, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::SecretUnavailable);
        }
        Ok(self.secret.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_provider_reads_configured_variable() {
        // SAFETY: var name is unique to this test, no concurrent reader.
        unsafe { std::env::set_var("SNIPEGATE_TEST_SECRET_SET", "s3cret") };
        let provider = EnvSecretProvider::with_var("SNIPEGATE_TEST_SECRET_SET");
        assert_eq!(provider.signing_secret().unwrap(), b"s3cret".to_vec());
    }

    #[test]
    fn missing_variable_fails_closed() {
        let provider = EnvSecretProvider::with_var("SNIPEGATE_TEST_SECRET_UNSET");
        assert!(matches!(
            provider.signing_secret(),
            Err(AuthError::SecretUnavailable)
        ));
    }

    #[test]
    fn empty_variable_is_not_a_secret() {
        unsafe { std::env::set_var("SNIPEGATE_TEST_SECRET_EMPTY", "") };
        let provider = EnvSecretProvider::with_var("SNIPEGATE_TEST_SECRET_EMPTY");
        assert!(matches!(
            provider.signing_secret(),
            Err(AuthError::SecretUnavailable)
        ));
    }
}
