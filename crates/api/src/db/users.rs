//! `PostgreSQL` user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use pet_adoption_core::{Email, PetId, Role, UserId};

use super::{RepositoryError, UserRepository, map_unique_violation};
use crate::models::{NewUser, User};

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, favorites, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    email: String,
    password_hash: String,
    role: Role,
    favorites: Vec<PetId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        // Accounts are created by the auth service, which does not enforce an
        // address shape
        Self {
            id: r.id,
            name: r.name,
            email: Email::from_trusted(r.email),
            password_hash: r.password_hash,
            role: r.role,
            favorites: r.favorites,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// User repository over a `PostgreSQL` pool.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO users (id, name, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(UserId::generate())
            .bind(user.name)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.role)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "email"))?;

        Ok(row.into())
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    async fn get_many(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn set_favorites(&self, id: UserId, favorites: &[PetId]) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET favorites = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(favorites)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_email_is_not_revalidated() {
        let now = Utc::now();
        let user = User::from(UserRow {
            id: UserId::generate(),
            name: "Legacy".to_owned(),
            email: "legacy-account".to_owned(),
            password_hash: "$2a$10$hash".to_owned(),
            role: Role::User,
            favorites: vec![PetId::generate()],
            created_at: now,
            updated_at: now,
        });

        assert_eq!(user.email.as_str(), "legacy-account");
        assert_eq!(user.favorites.len(), 1);
    }
}
