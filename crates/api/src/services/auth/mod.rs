//! Bearer token verification.
//!
//! Tokens are issued elsewhere. This module only turns a presented token into
//! a caller identity. The default verifier accepts HS256 JWTs signed with the
//! shared `JWT_SECRET`.

mod error;

pub use error::AuthError;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use pet_adoption_core::{Role, UserId};

type HmacSha256 = Hmac<Sha256>;

/// Verified caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The authenticated user.
    pub user_id: UserId,
    /// Role asserted by the token, if any.
    ///
    /// Informational only. Access decisions re-read the role from the store.
    pub role: Option<Role>,
    /// Expiry as seconds since the Unix epoch.
    pub expires_at: Option<i64>,
}

/// Turns a raw bearer token into verified claims.
pub trait TokenVerifier: Send + Sync {
    /// Verify `token` and return the caller's claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the token is malformed, forged or expired.
    fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// HS256 JWT verifier.
pub struct Hs256Verifier {
    secret: SecretString,
}

impl Hs256Verifier {
    /// Create a verifier for tokens signed with `secret`.
    #[must_use]
    pub const fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    fn mac(&self) -> Result<HmacSha256, AuthError> {
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| AuthError::BadSignature)
    }

    /// Sign `claims` into a compact HS256 token.
    ///
    /// The API never issues tokens itself. This exists for tests and local
    /// tooling that need a token the verifier accepts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Malformed` if the claims cannot be encoded.
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let header = Header {
            alg: "HS256".to_owned(),
            typ: Some("JWT".to_owned()),
        };
        let payload = Payload {
            id: Some(claims.user_id.to_string()),
            sub: None,
            role: claims.role.map(|r| r.as_str().to_owned()),
            exp: claims.expires_at,
        };

        let header = serde_json::to_vec(&header).map_err(|_| AuthError::Malformed)?;
        let payload = serde_json::to_vec(&payload).map_err(|_| AuthError::Malformed)?;
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{signing_input}.{signature}"))
    }
}

impl TokenVerifier for Hs256Verifier {
    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let token = token.trim();
        let (signing_input, signature) = token.rsplit_once('.').ok_or(AuthError::Malformed)?;
        let (header, payload) = signing_input
            .split_once('.')
            .ok_or(AuthError::Malformed)?;
        if payload.contains('.') {
            return Err(AuthError::Malformed);
        }

        let header: Header = decode_segment(header)?;
        if header.alg != "HS256" {
            return Err(AuthError::UnsupportedAlgorithm(header.alg));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthError::Malformed)?;
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::BadSignature)?;

        let payload: Payload = decode_segment(payload)?;

        if let Some(exp) = payload.exp
            && exp <= Utc::now().timestamp()
        {
            return Err(AuthError::Expired);
        }

        let user_id = payload
            .id
            .or(payload.sub)
            .and_then(|raw| UserId::parse(&raw).ok())
            .ok_or(AuthError::InvalidSubject)?;

        // Unknown roles are treated as absent
        let role = payload.role.and_then(|r| r.parse::<Role>().ok());

        Ok(Claims {
            user_id,
            role,
            expires_at: payload.exp,
        })
    }
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| AuthError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| AuthError::Malformed)
}

/// Extract the token from an `Authorization` header value.
///
/// Returns `None` unless the value is `Bearer <token>` with a non-empty token.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
