//! Record stores for the adoption API.
//!
//! # Stores
//!
//! - `pets` - Adoptable pet listings
//! - `users` - Accounts and their favorite-pet lists
//! - `adoption_requests` - One record per submitted request
//!
//! Each store is a trait so handlers and services run unchanged against
//! `PostgreSQL` ([`pets::PgPetRepository`] and friends) or the in-memory
//! [`memory::MemoryStore`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p pet-adoption-cli -- migrate
//! ```

pub mod adoption_requests;
pub mod memory;
pub mod pets;
pub mod users;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use pet_adoption_core::{AdoptionRequestId, AdoptionStatus, PetId, UserId};

use crate::models::{
    AdoptionRequest, NewAdoptionRequest, NewPet, NewUser, Pet, PetFilter, StatusUpdate, User,
};

pub use adoption_requests::PgAdoptionRequestRepository;
pub use memory::MemoryStore;
pub use pets::PgPetRepository;
pub use users::PgUserRepository;

/// Errors that can occur in store operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Pet listing store.
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Insert a new listing with status `available`.
    async fn create(&self, pet: NewPet) -> Result<Pet, RepositoryError>;

    /// Get a pet by ID.
    async fn get(&self, id: PetId) -> Result<Option<Pet>, RepositoryError>;

    /// Get every pet whose ID is in `ids`. Missing IDs are skipped; order is unspecified.
    async fn get_many(&self, ids: &[PetId]) -> Result<Vec<Pet>, RepositoryError>;

    /// List pets matching `filter`, newest first.
    async fn list(&self, filter: &PetFilter) -> Result<Vec<Pet>, RepositoryError>;

    /// Set a pet's availability. Returns `false` if the pet does not exist.
    async fn set_adoption_status(
        &self,
        id: PetId,
        status: AdoptionStatus,
    ) -> Result<bool, RepositoryError>;
}

/// User account store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Fails with `RepositoryError::Conflict` if the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Get a user by ID.
    async fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Get every user whose ID is in `ids`. Missing IDs are skipped.
    async fn get_many(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError>;

    /// Overwrite a user's favorites list. Returns `false` if the user does not exist.
    async fn set_favorites(&self, id: UserId, favorites: &[PetId]) -> Result<bool, RepositoryError>;
}

/// Adoption request store.
#[async_trait]
pub trait AdoptionRequestRepository: Send + Sync {
    /// Insert a new request with both statuses `pending`.
    async fn create(&self, request: NewAdoptionRequest)
    -> Result<AdoptionRequest, RepositoryError>;

    /// Every request, oldest first.
    async fn list_all(&self) -> Result<Vec<AdoptionRequest>, RepositoryError>;

    /// Requests submitted by `user_id`, newest first.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<AdoptionRequest>, RepositoryError>;

    /// Apply a partial status update and return the updated record,
    /// or `None` if no request has this ID.
    async fn update_status(
        &self,
        id: AdoptionRequestId,
        update: StatusUpdate,
    ) -> Result<Option<AdoptionRequest>, RepositoryError>;
}

/// The three stores, shared by every handler.
#[derive(Clone)]
pub struct Repositories {
    pub pets: Arc<dyn PetRepository>,
    pub users: Arc<dyn UserRepository>,
    pub adoption_requests: Arc<dyn AdoptionRequestRepository>,
    pool: Option<PgPool>,
}

impl Repositories {
    /// Stores backed by a `PostgreSQL` pool.
    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            pets: Arc::new(PgPetRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            adoption_requests: Arc::new(PgAdoptionRequestRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Stores backed by a shared in-memory store.
    #[must_use]
    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            pets: store.clone(),
            users: store.clone(),
            adoption_requests: store,
            pool: None,
        }
    }

    /// Check that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the database does not answer.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-constraint violation to `RepositoryError::Conflict`.
pub(crate) fn map_unique_violation(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}
