//! ES256 JSON Web Token assembly.
//!
//! A developer token is a JWS compact serialization, produced by
//! `jsonwebtoken` once the key has passed the PKCS8 and curve checks:
//!
//! ```text
//! base64url(header) "." base64url(claims) "." base64url(r || s)
//! ```
//!
//! Header: `{ "typ": "JWT", "alg": "ES256", "kid": "<key id>" }`
//! Claims: `{ "iss": "<team id>", "iat": <unix>, "exp": <unix> }`

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenError};
use crate::key::load_encoding_key;

/// Upper bound on token lifetime accepted by the Apple Music API
/// (six months, in seconds).
pub const MAX_TTL_SECS: u64 = 15_777_000;

/// Registered claims carried by a developer token.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Team ID.
    pub iss: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Generator of Apple Music developer tokens.
///
/// Constructed fresh for each token; nothing here is persisted.
#[derive(Clone)]
pub struct Generator {
    /// 10-character key identifier (`kid`) from the developer account.
    pub key_id: String,
    /// 10-character Team ID, used as the `iss` claim.
    pub team_id: String,
    /// Token lifetime in seconds, at most [`MAX_TTL_SECS`].
    pub ttl: u64,
    /// PEM encoded PKCS8 MusicKit private key.
    pub secret: Vec<u8>,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("key_id", &self.key_id)
            .field("team_id", &self.team_id)
            .field("ttl", &self.ttl)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Generator {
    /// Generate a token issued now.
    pub fn generate(&self) -> Result<String> {
        self.generate_at(Utc::now())
    }

    /// Generate a token as if issued at `now`.
    pub fn generate_at(&self, now: DateTime<Utc>) -> Result<String> {
        let out_of_range = TokenError::TtlOutOfRange {
            ttl: self.ttl,
            max: MAX_TTL_SECS,
        };
        if self.ttl == 0 || self.ttl > MAX_TTL_SECS {
            return Err(out_of_range);
        }
        let ttl = i64::try_from(self.ttl).map_err(|_| out_of_range)?;
        let key = load_encoding_key(&self.secret)?;

        let iat = now.timestamp();
        let claims = Claims {
            iss: self.team_id.clone(),
            iat,
            exp: iat + ttl,
        };
        tracing::debug!(kid = %self.key_id, iss = %self.team_id, iat, exp = claims.exp, "signing developer token");
        sign(&key, &self.key_id, &claims)
    }
}

/// Sign `claims` with ES256 under key id `kid`, returning the compact token.
pub fn sign(key: &EncodingKey, kid: &str, claims: &Claims) -> Result<String> {
    let mut header = Header::new(Algorithm::ES256);
    header.kid = Some(kid.to_owned());
    Ok(jsonwebtoken::encode(&header, claims, key)?)
}
