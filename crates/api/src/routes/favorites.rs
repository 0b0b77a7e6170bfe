//! Favorites route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use pet_adoption_core::PetId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Pet;
use crate::services::favorites::FavoritesService;
use crate::state::AppState;

/// Response body for a toggle.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub msg: &'static str,
    pub favorited: bool,
    pub favorites: Vec<PetId>,
}

/// `POST /api/user/favorites/{petId}`
pub async fn toggle(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Path(pet_id): Path<String>,
) -> Result<Json<ToggleResponse>> {
    let pet_id =
        PetId::parse(&pet_id).map_err(|_| AppError::BadRequest("Invalid pet id.".to_string()))?;

    let outcome = FavoritesService::new(state.repos())
        .toggle(claims.user_id, pet_id)
        .await?;

    Ok(Json(ToggleResponse {
        msg: outcome.message(),
        favorited: outcome.favorited,
        favorites: outcome.favorites,
    }))
}

/// `GET /api/user/favorites`
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
) -> Result<Json<Vec<Pet>>> {
    let pets = FavoritesService::new(state.repos())
        .list(claims.user_id)
        .await?;
    Ok(Json(pets))
}
