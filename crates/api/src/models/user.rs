//! User account domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pet_adoption_core::{Email, PetId, Role, UserId};

/// A marketplace account.
///
/// Accounts are created at registration (handled outside this service) and
/// are never deleted here. Only the favorites list is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: Email,
    /// Opaque credential hash; never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    /// Favorite pets in the order they were added. Never holds duplicates.
    pub favorites: Vec<PetId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The display subset embedded in the admin request listing.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// User fields shown next to an adoption request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

/// Parameters for creating an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub role: Role,
}
