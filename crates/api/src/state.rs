//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::Repositories;
use crate::middleware::AccessPolicy;
use crate::services::auth::TokenVerifier;
use crate::services::payments::PaymentGateway;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Storage, token verification
/// and the payment gateway are trait objects so tests can swap them out.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    repos: Repositories,
    verifier: Arc<dyn TokenVerifier>,
    payments: Arc<dyn PaymentGateway>,
    admin_policy: AccessPolicy,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        repos: Repositories,
        verifier: Arc<dyn TokenVerifier>,
        payments: Arc<dyn PaymentGateway>,
        admin_policy: AccessPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                repos,
                verifier,
                payments,
                admin_policy,
            }),
        }
    }

    /// Get a reference to the repositories.
    #[must_use]
    pub fn repos(&self) -> &Repositories {
        &self.inner.repos
    }

    /// Get a reference to the bearer token verifier.
    #[must_use]
    pub fn verifier(&self) -> &dyn TokenVerifier {
        self.inner.verifier.as_ref()
    }

    /// Get a reference to the payment gateway.
    #[must_use]
    pub fn payments(&self) -> &dyn PaymentGateway {
        self.inner.payments.as_ref()
    }

    /// Who may list and update every adoption request.
    #[must_use]
    pub fn admin_policy(&self) -> AccessPolicy {
        self.inner.admin_policy
    }
}
