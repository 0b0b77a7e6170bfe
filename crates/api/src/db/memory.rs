//! In-memory store implementing every repository trait.
//!
//! Used for local development (`API_STORE=memory`) and by the test suites.
//! Contents are lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use pet_adoption_core::{AdoptionRequestId, AdoptionStatus, PaymentStatus, PetId, RequestStatus, UserId};

use super::{AdoptionRequestRepository, PetRepository, RepositoryError, UserRepository};
use crate::models::{
    AdoptionRequest, NewAdoptionRequest, NewPet, NewUser, Pet, PetFilter, StatusUpdate, User,
};

/// Process-local store for pets, users and adoption requests.
///
/// Records are kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pets: RwLock<Vec<Pet>>,
    users: RwLock<Vec<User>>,
    requests: RwLock<Vec<AdoptionRequest>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PetRepository for MemoryStore {
    async fn create(&self, pet: NewPet) -> Result<Pet, RepositoryError> {
        let now = Utc::now();
        let pet = Pet {
            id: PetId::generate(),
            name: pet.name,
            kind: pet.kind,
            breed: pet.breed,
            age: pet.age,
            size: pet.size,
            color: pet.color,
            weight: pet.weight,
            description: pet.description,
            image: pet.image,
            vaccinated: pet.vaccinated,
            neutered: pet.neutered,
            adoption_fee: pet.adoption_fee,
            adoption_status: AdoptionStatus::Available,
            shelter: pet.shelter,
            created_at: now,
            updated_at: now,
        };
        self.pets.write().await.push(pet.clone());
        Ok(pet)
    }

    async fn get(&self, id: PetId) -> Result<Option<Pet>, RepositoryError> {
        Ok(self.pets.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn get_many(&self, ids: &[PetId]) -> Result<Vec<Pet>, RepositoryError> {
        Ok(self
            .pets
            .read()
            .await
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn list(&self, filter: &PetFilter) -> Result<Vec<Pet>, RepositoryError> {
        let mut pets: Vec<Pet> = self
            .pets
            .read()
            .await
            .iter()
            .rev()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        pets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pets)
    }

    async fn set_adoption_status(
        &self,
        id: PetId,
        status: AdoptionStatus,
    ) -> Result<bool, RepositoryError> {
        let mut pets = self.pets.write().await;
        let Some(pet) = pets.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        pet.adoption_status = status;
        pet.updated_at = Utc::now();
        Ok(true)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }
        let now = Utc::now();
        let user = User {
            id: UserId::generate(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            favorites: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn get_many(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn set_favorites(&self, id: UserId, favorites: &[PetId]) -> Result<bool, RepositoryError> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(false);
        };
        user.favorites = favorites.to_vec();
        user.updated_at = Utc::now();
        Ok(true)
    }
}

#[async_trait]
impl AdoptionRequestRepository for MemoryStore {
    async fn create(
        &self,
        request: NewAdoptionRequest,
    ) -> Result<AdoptionRequest, RepositoryError> {
        let now = Utc::now();
        let request = AdoptionRequest {
            id: AdoptionRequestId::generate(),
            pet_id: request.pet_id,
            user_id: request.user_id,
            name: request.name,
            email: request.email,
            message: request.message,
            status: RequestStatus::Pending,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.requests.write().await.push(request.clone());
        Ok(request)
    }

    async fn list_all(&self) -> Result<Vec<AdoptionRequest>, RepositoryError> {
        Ok(self.requests.read().await.clone())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<AdoptionRequest>, RepositoryError> {
        // Reverse first so equal timestamps still come out newest-inserted first
        let mut requests: Vec<AdoptionRequest> = self
            .requests
            .read()
            .await
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    async fn update_status(
        &self,
        id: AdoptionRequestId,
        update: StatusUpdate,
    ) -> Result<Option<AdoptionRequest>, RepositoryError> {
        let mut requests = self.requests.write().await;
        let Some(request) = requests.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        update.apply_to(request);
        request.updated_at = Utc::now();
        Ok(Some(request.clone()))
    }
}
