//! `PostgreSQL` adoption request repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use pet_adoption_core::{AdoptionRequestId, Email, PaymentStatus, PetId, RequestStatus, UserId};

use super::{AdoptionRequestRepository, RepositoryError};
use crate::models::{AdoptionRequest, NewAdoptionRequest, StatusUpdate};

const REQUEST_COLUMNS: &str = r"
    id, pet_id, user_id, name, email, message, status, payment_status,
    created_at, updated_at
";

#[derive(sqlx::FromRow)]
struct AdoptionRequestRow {
    id: AdoptionRequestId,
    pet_id: PetId,
    user_id: UserId,
    name: String,
    email: String,
    message: Option<String>,
    status: RequestStatus,
    payment_status: PaymentStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AdoptionRequestRow> for AdoptionRequest {
    fn from(r: AdoptionRequestRow) -> Self {
        Self {
            id: r.id,
            pet_id: r.pet_id,
            user_id: r.user_id,
            name: r.name,
            // Snapshot text, validated when the request was submitted
            email: Email::from_trusted(r.email),
            message: r.message,
            status: r.status,
            payment_status: r.payment_status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Adoption request repository over a `PostgreSQL` pool.
pub struct PgAdoptionRequestRepository {
    pool: PgPool,
}

impl PgAdoptionRequestRepository {
    /// Create a new adoption request repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdoptionRequestRepository for PgAdoptionRequestRepository {
    async fn create(
        &self,
        request: NewAdoptionRequest,
    ) -> Result<AdoptionRequest, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO adoption_requests (id, pet_id, user_id, name, email, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {REQUEST_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, AdoptionRequestRow>(&sql)
            .bind(AdoptionRequestId::generate())
            .bind(request.pet_id)
            .bind(request.user_id)
            .bind(request.name)
            .bind(request.email)
            .bind(request.message)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn list_all(&self) -> Result<Vec<AdoptionRequest>, RepositoryError> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM adoption_requests ORDER BY created_at");
        let rows = sqlx::query_as::<_, AdoptionRequestRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(AdoptionRequest::from).collect())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<AdoptionRequest>, RepositoryError> {
        let sql = format!(
            r"
            SELECT {REQUEST_COLUMNS} FROM adoption_requests
            WHERE user_id = $1
            ORDER BY created_at DESC
            "
        );
        let rows = sqlx::query_as::<_, AdoptionRequestRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(AdoptionRequest::from).collect())
    }

    async fn update_status(
        &self,
        id: AdoptionRequestId,
        update: StatusUpdate,
    ) -> Result<Option<AdoptionRequest>, RepositoryError> {
        let sql = format!(
            r"
            UPDATE adoption_requests
            SET status = COALESCE($2, status),
                payment_status = COALESCE($3, payment_status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, AdoptionRequestRow>(&sql)
            .bind(id)
            .bind(update.status)
            .bind(update.payment_status)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(AdoptionRequest::from))
    }
}
