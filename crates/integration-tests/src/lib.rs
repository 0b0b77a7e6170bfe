//! Integration tests for the pet adoption API.
//!
//! Tests drive the full axum router in-process with `tower::ServiceExt`,
//! backed by the in-memory store, HS256 tokens signed with a test secret and
//! the payment gateway in demo mode (or a test key for signature checks).
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pet-adoption-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use pet_adoption_api::config::PaymentConfig;
use pet_adoption_api::db::{MemoryStore, Repositories};
use pet_adoption_api::middleware::AccessPolicy;
use pet_adoption_api::models::{NewPet, NewUser, Pet, User};
use pet_adoption_api::services::auth::{Claims, Hs256Verifier};
use pet_adoption_api::services::payments::RazorpayGateway;
use pet_adoption_api::state::AppState;
use pet_adoption_core::{Email, Fee, Role, UserId};

/// Secret the test verifier signs and checks tokens with.
pub const TEST_JWT_SECRET: &str = "integration-k3y-9f8e7d6c5b4a3210";

/// Razorpay key secret used when signatures are checked.
pub const TEST_RAZORPAY_SECRET: &str = "rzp_test_s3cr3t";

/// An API instance with its backing store exposed for seeding and assertions.
pub struct TestContext {
    pub repos: Repositories,
    verifier: Arc<Hs256Verifier>,
    router: Router,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Open access policy, demo payments.
    #[must_use]
    pub fn new() -> Self {
        Self::with(AccessPolicy::Open, true)
    }

    /// Given access policy, demo payments.
    #[must_use]
    pub fn with_policy(policy: AccessPolicy) -> Self {
        Self::with(policy, true)
    }

    /// Full control over the access policy and payment demo mode.
    #[must_use]
    pub fn with(policy: AccessPolicy, payment_demo_mode: bool) -> Self {
        let repos = Repositories::in_memory(Arc::new(MemoryStore::new()));
        let verifier = Arc::new(Hs256Verifier::new(SecretString::from(TEST_JWT_SECRET)));
        let payments = Arc::new(
            RazorpayGateway::new(&PaymentConfig {
                key_id: "rzp_test_key".to_owned(),
                key_secret: SecretString::from(TEST_RAZORPAY_SECRET),
                demo_mode: payment_demo_mode,
            })
            .expect("payment client builds"),
        );

        let state = AppState::new(repos.clone(), verifier.clone(), payments, policy);

        Self {
            repos,
            verifier,
            router: pet_adoption_api::app(state),
        }
    }

    /// Seed an available pet.
    pub async fn pet(&self, name: &str, kind: &str, fee: u32) -> Pet {
        self.repos
            .pets
            .create(NewPet {
                name: name.to_owned(),
                kind: kind.to_owned(),
                adoption_fee: Fee::from_major(fee),
                ..NewPet::default()
            })
            .await
            .expect("pet is created")
    }

    /// Seed an account.
    pub async fn user(&self, name: &str, email: &str, role: Role) -> User {
        self.repos
            .users
            .create(NewUser {
                name: name.to_owned(),
                email: Email::parse(email).expect("valid email"),
                password_hash: "$argon2id$opaque".to_owned(),
                role,
            })
            .await
            .expect("user is created")
    }

    /// A valid bearer token for `user_id`, expiring in an hour.
    #[must_use]
    pub fn token(&self, user_id: UserId) -> String {
        self.verifier
            .sign(&Claims {
                user_id,
                role: None,
                expires_at: Some(Utc::now().timestamp() + 3600),
            })
            .expect("token signs")
    }

    /// Send a request and return the status with the body parsed as JSON.
    ///
    /// Non-JSON bodies come back as a JSON string.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request builds");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, value)
    }

    /// `GET` with an optional token.
    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    /// `POST` a JSON body with an optional token.
    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    /// `PATCH` a JSON body with an optional token.
    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }
}
