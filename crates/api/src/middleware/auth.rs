//! Authentication extractors and the admin access policy.
//!
//! Callers authenticate with `Authorization: Bearer <token>`. The token is
//! checked by the [`TokenVerifier`](crate::services::auth::TokenVerifier) held
//! in [`AppState`].

use std::fmt;
use std::str::FromStr;

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use tracing::Span;

use crate::error::AppError;
use crate::services::auth::{AuthError, Claims, bearer_token};
use crate::state::AppState;

/// Who may list every adoption request and change request statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    /// Anyone who can reach the API, authenticated or not.
    #[default]
    Open,
    /// Authenticated callers whose stored role is admin or shelter staff.
    AdminOnly,
}

impl AccessPolicy {
    /// Configuration spelling of this policy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::AdminOnly => "admin",
        }
    }
}

impl fmt::Display for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "admin" | "admin_only" | "staff" => Ok(Self::AdminOnly),
            other => Err(format!("expected 'open' or 'admin', got '{other}'")),
        }
    }
}

/// Verify the bearer token on `parts`, if there is one.
fn claims_from_parts(parts: &Parts, state: &AppState) -> Result<Claims, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;
    let token = bearer_token(header).ok_or(AuthError::MissingToken)?;
    let claims = state.verifier().verify(token)?;

    Span::current().record("user_id", tracing::field::display(claims.user_id));
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(claims.user_id.to_string()),
            ..Default::default()
        }));
    });

    Ok(claims)
}

/// Extractor that requires a valid bearer token.
///
/// Rejects with 401 when the header is missing or the token does not verify.
///
/// # Example
///
/// ```rust,ignore
/// async fn my_requests(RequireAuth(claims): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", claims.user_id)
/// }
/// ```
pub struct RequireAuth(pub Claims);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        claims_from_parts(parts, state).map(Self).map_err(|e| {
            tracing::debug!(error = %e, path = %parts.uri.path(), "Rejected bearer token");
            AppError::Auth(e)
        })
    }
}

/// Extractor that optionally gets the caller.
///
/// A missing or invalid token yields `None` instead of a rejection.
pub struct OptionalAuth(pub Option<Claims>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(claims_from_parts(parts, state).ok()))
    }
}

/// Extractor enforcing the configured [`AccessPolicy`].
///
/// Under [`AccessPolicy::Open`] every request passes and the caller, if any,
/// is attached. Under [`AccessPolicy::AdminOnly`] the caller must hold a valid
/// token and their stored role must be staff; the role in the token is not
/// trusted.
pub struct AdminGate(pub Option<Claims>);

impl FromRequestParts<AppState> for AdminGate {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match state.admin_policy() {
            AccessPolicy::Open => {
                let Ok(OptionalAuth(claims)) = OptionalAuth::from_request_parts(parts, state).await;
                Ok(Self(claims))
            }
            AccessPolicy::AdminOnly => {
                let RequireAuth(claims) = RequireAuth::from_request_parts(parts, state).await?;

                let user = state
                    .repos()
                    .users
                    .get(claims.user_id)
                    .await?
                    .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

                if !user.role.is_staff() {
                    tracing::warn!(
                        user_id = %claims.user_id,
                        role = %user.role,
                        path = %parts.uri.path(),
                        "Non-staff caller denied"
                    );
                    return Err(AppError::Forbidden("Not authorized as an admin".to_string()));
                }

                Ok(Self(Some(claims)))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_access_policy_parse() {
        assert_eq!("open".parse::<AccessPolicy>().unwrap(), AccessPolicy::Open);
        assert_eq!("Admin".parse::<AccessPolicy>().unwrap(), AccessPolicy::AdminOnly);
        assert_eq!(" staff ".parse::<AccessPolicy>().unwrap(), AccessPolicy::AdminOnly);
        assert!("everyone".parse::<AccessPolicy>().is_err());
    }

    #[test]
    fn test_access_policy_round_trips_through_display() {
        for policy in [AccessPolicy::Open, AccessPolicy::AdminOnly] {
            assert_eq!(policy.to_string().parse::<AccessPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_default_policy_is_open() {
        assert_eq!(AccessPolicy::default(), AccessPolicy::Open);
    }
}
