//! Favorite pets.
//!
//! Favorites are an ordered list with set semantics. Toggling never touches
//! the pet itself. Concurrent toggles from the same user are
//! last-write-wins.

use serde::Serialize;

use pet_adoption_core::{PetId, UserId};

use super::ServiceError;
use crate::db::Repositories;
use crate::models::Pet;

/// Outcome of a toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteToggle {
    /// Whether the pet is a favorite after the call.
    pub favorited: bool,
    /// The full favorites list after the call.
    pub favorites: Vec<PetId>,
}

impl FavoriteToggle {
    /// Human-readable summary for the response body.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        if self.favorited {
            "Added to favorites"
        } else {
            "Removed from favorites"
        }
    }
}

/// Add `pet_id` if absent, otherwise remove its first occurrence.
///
/// Returns whether `pet_id` is present afterwards.
pub fn toggle_membership(favorites: &mut Vec<PetId>, pet_id: PetId) -> bool {
    if let Some(index) = favorites.iter().position(|id| *id == pet_id) {
        favorites.remove(index);
        false
    } else {
        favorites.push(pet_id);
        true
    }
}

/// Favorites service.
pub struct FavoritesService<'a> {
    repos: &'a Repositories,
}

impl<'a> FavoritesService<'a> {
    /// Create a new favorites service.
    #[must_use]
    pub const fn new(repos: &'a Repositories) -> Self {
        Self { repos }
    }

    /// Flip whether `pet_id` is one of the caller's favorites.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the caller has no account.
    pub async fn toggle(
        &self,
        caller: UserId,
        pet_id: PetId,
    ) -> Result<FavoriteToggle, ServiceError> {
        let mut user = self
            .repos
            .users
            .get(caller)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))?;

        let favorited = toggle_membership(&mut user.favorites, pet_id);

        if !self.repos.users.set_favorites(caller, &user.favorites).await? {
            return Err(ServiceError::not_found("User not found"));
        }

        tracing::debug!(user_id = %caller, pet_id = %pet_id, favorited, "Favorite toggled");

        Ok(FavoriteToggle {
            favorited,
            favorites: user.favorites,
        })
    }

    /// The caller's favorites as full pet records, in the order they were added.
    ///
    /// Favorites pointing at pets that no longer exist are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the caller has no account.
    pub async fn list(&self, caller: UserId) -> Result<Vec<Pet>, ServiceError> {
        let user = self
            .repos
            .users
            .get(caller)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))?;

        let mut pets = self.repos.pets.get_many(&user.favorites).await?;
        let mut ordered = Vec::with_capacity(pets.len());
        for id in &user.favorites {
            if let Some(index) = pets.iter().position(|p| p.id == *id) {
                ordered.push(pets.swap_remove(index));
            }
        }
        Ok(ordered)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use pet_adoption_core::{AdoptionStatus, Email, Fee, Role};

    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{NewPet, NewUser};

    #[test]
    fn test_toggle_membership_is_its_own_inverse() {
        let a = PetId::generate();
        let b = PetId::generate();
        let mut favorites = vec![a];
        let original = favorites.clone();

        assert!(toggle_membership(&mut favorites, b));
        assert_eq!(favorites, vec![a, b]);
        assert!(!toggle_membership(&mut favorites, b));
        assert_eq!(favorites, original);
    }

    #[test]
    fn test_toggle_membership_never_duplicates() {
        let ids: Vec<PetId> = (0..3).map(|_| PetId::generate()).collect();
        let mut favorites = Vec::new();
        // Arbitrary interleaving of toggles
        for i in [0, 1, 0, 2, 1, 1, 0, 2, 2, 0] {
            toggle_membership(&mut favorites, ids[i]);
            let mut deduped = favorites.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(deduped.len(), favorites.len());
        }
    }

    #[test]
    fn test_message() {
        let added = FavoriteToggle {
            favorited: true,
            favorites: vec![],
        };
        assert_eq!(added.message(), "Added to favorites");
        let removed = FavoriteToggle {
            favorited: false,
            favorites: vec![],
        };
        assert_eq!(removed.message(), "Removed from favorites");
    }

    #[tokio::test]
    async fn test_toggle_persists_and_leaves_pet_alone() {
        let repos = Repositories::in_memory(Arc::new(MemoryStore::new()));
        let pet = repos
            .pets
            .create(NewPet {
                name: "Mochi".to_owned(),
                kind: "Cat".to_owned(),
                adoption_fee: Fee::from_major(50),
                ..NewPet::default()
            })
            .await
            .unwrap();
        let user = repos
            .users
            .create(NewUser {
                name: "Ola".to_owned(),
                email: Email::parse("ola@example.com").unwrap(),
                password_hash: "hash".to_owned(),
                role: Role::User,
            })
            .await
            .unwrap();
        let service = FavoritesService::new(&repos);

        let first = service.toggle(user.id, pet.id).await.unwrap();
        assert!(first.favorited);
        assert_eq!(first.favorites, vec![pet.id]);

        let listed = service.list(user.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].adoption_status, AdoptionStatus::Available);

        let second = service.toggle(user.id, pet.id).await.unwrap();
        assert!(!second.favorited);
        assert!(second.favorites.is_empty());
        assert!(service.list(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let repos = Repositories::in_memory(Arc::new(MemoryStore::new()));
        let service = FavoritesService::new(&repos);
        let err = service
            .toggle(UserId::generate(), PetId::generate())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(matches!(
            service.list(UserId::generate()).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
