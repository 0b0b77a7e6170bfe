//! Read-only pet catalogue.

use pet_adoption_core::PetId;

use super::ServiceError;
use crate::db::Repositories;
use crate::models::{Pet, PetFilter};

/// Pet browsing service.
pub struct PetService<'a> {
    repos: &'a Repositories,
}

impl<'a> PetService<'a> {
    /// Create a new pet service.
    #[must_use]
    pub const fn new(repos: &'a Repositories) -> Self {
        Self { repos }
    }

    /// List pets matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store read fails.
    pub async fn list(&self, filter: &PetFilter) -> Result<Vec<Pet>, ServiceError> {
        Ok(self.repos.pets.list(filter).await?)
    }

    /// Get a single pet.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no pet has this ID.
    pub async fn get(&self, id: PetId) -> Result<Pet, ServiceError> {
        self.repos
            .pets
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Pet not found"))
    }
}
