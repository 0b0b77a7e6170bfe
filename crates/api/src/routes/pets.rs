//! Pet catalogue route handlers.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use pet_adoption_core::{AdoptionStatus, PetId};

use crate::error::{AppError, Result};
use crate::models::{Pet, PetFilter};
use crate::services::pets::PetService;
use crate::state::AppState;

/// Query parameters for the pet listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetQuery {
    pub adoption_status: Option<AdoptionStatus>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl From<PetQuery> for PetFilter {
    fn from(q: PetQuery) -> Self {
        Self {
            adoption_status: q.adoption_status,
            kind: q.kind.filter(|k| !k.trim().is_empty()),
        }
    }
}

/// `GET /api/pets`
pub async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<PetQuery>, QueryRejection>,
) -> Result<Json<Vec<Pet>>> {
    let Query(query) = query?;
    let pets = PetService::new(state.repos()).list(&query.into()).await?;
    Ok(Json(pets))
}

/// `GET /api/pets/{id}`
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Pet>> {
    let id = PetId::parse(&id).map_err(|_| AppError::BadRequest("Invalid pet id.".to_string()))?;
    let pet = PetService::new(state.repos()).get(id).await?;
    Ok(Json(pet))
}
