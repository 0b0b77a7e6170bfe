//! Integration tests for the admin access policy on request management routes.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use pet_adoption_api::middleware::AccessPolicy;
use pet_adoption_core::{AdoptionRequestId, Role};
use pet_adoption_integration_tests::TestContext;

#[tokio::test]
async fn test_open_policy_admits_anonymous_callers() {
    let ctx = TestContext::with_policy(AccessPolicy::Open);

    let (status, body) = ctx.get("/api/adoption-requests", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_admin_policy_requires_token() {
    let ctx = TestContext::with_policy(AccessPolicy::AdminOnly);

    let (status, _) = ctx.get("/api/adoption-requests", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_policy_rejects_regular_users() {
    let ctx = TestContext::with_policy(AccessPolicy::AdminOnly);
    let user = ctx.user("Uma", "uma@example.com", Role::User).await;
    let token = ctx.token(user.id);

    let (status, body) = ctx.get("/api/adoption-requests", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["msg"], "Not authorized as an admin");

    let (status, _) = ctx
        .patch(
            &format!("/api/adoption-requests/{}/status", AdoptionRequestId::generate()),
            Some(&token),
            json!({ "status": "approved" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_policy_admits_staff() {
    let ctx = TestContext::with_policy(AccessPolicy::AdminOnly);

    for (email, role) in [
        ("admin@example.com", Role::Admin),
        ("staff@example.com", Role::ShelterStaff),
    ] {
        let staff = ctx.user("Staff", email, role).await;
        let token = ctx.token(staff.id);
        let (status, _) = ctx.get("/api/adoption-requests", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_admin_policy_approves_through_gate() {
    let ctx = TestContext::with_policy(AccessPolicy::AdminOnly);
    let pet = ctx.pet("Bruno", "Dog", 250).await;
    let user = ctx.user("Uma", "uma@example.com", Role::User).await;
    let admin = ctx.user("Ada", "ada@example.com", Role::Admin).await;

    let (_, body) = ctx
        .post(
            "/api/adoption-requests",
            Some(&ctx.token(user.id)),
            json!({ "petId": pet.id.to_string(), "name": "Uma", "email": "uma@example.com" }),
        )
        .await;
    let uri = format!(
        "/api/adoption-requests/{}/status",
        body["request"]["_id"].as_str().unwrap()
    );

    let (status, body) = ctx
        .patch(&uri, Some(&ctx.token(admin.id)), json!({ "status": "approved" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
}
