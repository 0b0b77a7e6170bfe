//! Adoption request route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;

use pet_adoption_core::{AdoptionRequestId, UserId};

use crate::error::{AppError, Result};
use crate::middleware::{AdminGate, RequireAuth};
use crate::models::{AdoptionRequest, JoinedAdoptionRequest, UserSummary};
use crate::services::adoption::{AdoptionService, StatusUpdateForm, SubmitAdoption};
use crate::state::AppState;

/// Response body for a new submission.
#[derive(Debug, Serialize)]
pub struct SubmittedResponse {
    pub msg: &'static str,
    pub request: AdoptionRequest,
}

/// `POST /api/adoption-requests`
pub async fn submit(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    body: std::result::Result<Json<SubmitAdoption>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmittedResponse>)> {
    let Json(form) = body?;
    let request = AdoptionService::new(state.repos())
        .submit(claims.user_id, form)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmittedResponse {
            msg: "Adoption request submitted successfully",
            request,
        }),
    ))
}

/// `GET /api/adoption-requests/my-requests`
pub async fn my_requests(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
) -> Result<Json<Vec<JoinedAdoptionRequest<UserId>>>> {
    let requests = AdoptionService::new(state.repos())
        .list_for_user(claims.user_id)
        .await?;
    Ok(Json(requests))
}

/// `GET /api/adoption-requests`
pub async fn list_all(
    State(state): State<AppState>,
    AdminGate(_caller): AdminGate,
) -> Result<Json<Vec<JoinedAdoptionRequest<Option<UserSummary>>>>> {
    let requests = AdoptionService::new(state.repos()).list_all().await?;
    Ok(Json(requests))
}

/// `PATCH /api/adoption-requests/{id}/status`
pub async fn update_status(
    State(state): State<AppState>,
    AdminGate(caller): AdminGate,
    Path(id): Path<String>,
    body: std::result::Result<Json<StatusUpdateForm>, JsonRejection>,
) -> Result<Json<AdoptionRequest>> {
    let id = AdoptionRequestId::parse(&id)
        .map_err(|_| AppError::BadRequest("Invalid request id.".to_string()))?;
    let Json(form) = body?;
    let update = form.parse()?;

    tracing::debug!(
        request_id = %id,
        caller = ?caller.as_ref().map(|c| c.user_id),
        "Status update requested"
    );

    let request = AdoptionService::new(state.repos())
        .update_status(id, update)
        .await?;
    Ok(Json(request))
}
