use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Canonical lifetimes for the two token kinds. Fixed constants rather than
/// settings so every deployment agrees on what an issued token means.
pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);
pub const REFRESH_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Identifier embedded in every issued token. Random per issuance; `uuid`
/// v4 draws from the OS CSPRNG so ids are unguessable. Refresh ids are also
/// recorded server-side; access ids only make each mint distinct.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TokenId(pub uuid::Uuid);

impl TokenId {
    pub fn random() -> Self {
        TokenId(uuid::Uuid::new_v4())
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TokenId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(TokenId)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessToken(pub String);

#[derive(Debug, Clone, Serialize)]
pub struct RefreshToken(pub String);

/// What a successful login or rotation hands back to the client. Never
/// persisted; recomputed on every issuance.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

/// The one signed-claims schema, tagged by token kind. Claim names are wire
/// contract: changing them invalidates every token already in the wild.
///
/// `expiresAt` is epoch seconds. Expiry is checked by the validator, not the
/// JWT library, so both kinds carry it explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "tokenKind")]
pub enum Claims {
    #[serde(rename = "access")]
    Access {
        #[serde(rename = "subjectUserID")]
        subject_user_id: String,
        #[serde(rename = "tokenID")]
        token_id: String,
        #[serde(rename = "expiresAt")]
        expires_at: i64,
    },
    #[serde(rename = "refresh")]
    Refresh {
        #[serde(rename = "tokenID")]
        token_id: String,
        #[serde(rename = "expiresAt")]
        expires_at: i64,
    },
}
