//! `PostgreSQL` pet repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use pet_adoption_core::{AdoptionStatus, Fee, PetId, ShelterId};

use super::{PetRepository, RepositoryError};
use crate::models::{NewPet, Pet, PetFilter};

const PET_COLUMNS: &str = r"
    id, name, type AS kind, breed, age, size, color, weight, description, image,
    vaccinated, neutered, adoption_fee, adoption_status, shelter_id,
    created_at, updated_at
";

#[derive(sqlx::FromRow)]
struct PetRow {
    id: PetId,
    name: String,
    kind: String,
    breed: Option<String>,
    age: Option<String>,
    size: Option<String>,
    color: Option<String>,
    weight: Option<String>,
    description: Option<String>,
    image: Option<String>,
    vaccinated: bool,
    neutered: bool,
    adoption_fee: Fee,
    adoption_status: AdoptionStatus,
    shelter_id: Option<ShelterId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PetRow> for Pet {
    fn from(r: PetRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            kind: r.kind,
            breed: r.breed,
            age: r.age,
            size: r.size,
            color: r.color,
            weight: r.weight,
            description: r.description,
            image: r.image,
            vaccinated: r.vaccinated,
            neutered: r.neutered,
            adoption_fee: r.adoption_fee,
            adoption_status: r.adoption_status,
            shelter: r.shelter_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Pet repository over a `PostgreSQL` pool.
pub struct PgPetRepository {
    pool: PgPool,
}

impl PgPetRepository {
    /// Create a new pet repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetRepository for PgPetRepository {
    async fn create(&self, pet: NewPet) -> Result<Pet, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO pets (
                id, name, type, breed, age, size, color, weight, description, image,
                vaccinated, neutered, adoption_fee, shelter_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {PET_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, PetRow>(&sql)
            .bind(PetId::generate())
            .bind(pet.name)
            .bind(pet.kind)
            .bind(pet.breed)
            .bind(pet.age)
            .bind(pet.size)
            .bind(pet.color)
            .bind(pet.weight)
            .bind(pet.description)
            .bind(pet.image)
            .bind(pet.vaccinated)
            .bind(pet.neutered)
            .bind(pet.adoption_fee)
            .bind(pet.shelter)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn get(&self, id: PetId) -> Result<Option<Pet>, RepositoryError> {
        let sql = format!("SELECT {PET_COLUMNS} FROM pets WHERE id = $1");
        let row = sqlx::query_as::<_, PetRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Pet::from))
    }

    async fn get_many(&self, ids: &[PetId]) -> Result<Vec<Pet>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {PET_COLUMNS} FROM pets WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, PetRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Pet::from).collect())
    }

    async fn list(&self, filter: &PetFilter) -> Result<Vec<Pet>, RepositoryError> {
        let sql = format!(
            r"
            SELECT {PET_COLUMNS} FROM pets
            WHERE ($1::adoption_status IS NULL OR adoption_status = $1)
              AND ($2::text IS NULL OR lower(type) = lower($2))
            ORDER BY created_at DESC
            "
        );
        let rows = sqlx::query_as::<_, PetRow>(&sql)
            .bind(filter.adoption_status)
            .bind(filter.kind.as_deref())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Pet::from).collect())
    }

    async fn set_adoption_status(
        &self,
        id: PetId,
        status: AdoptionStatus,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE pets
            SET adoption_status = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
