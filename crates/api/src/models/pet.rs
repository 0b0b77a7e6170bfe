//! Pet listing domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pet_adoption_core::{AdoptionStatus, Fee, PetId, ShelterId};

/// An adoptable pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(rename = "_id")]
    pub id: PetId,
    pub name: String,
    /// Species, e.g. "Dog" or "Cat".
    #[serde(rename = "type")]
    pub kind: String,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub weight: Option<String>,
    pub description: Option<String>,
    /// Image URL.
    pub image: Option<String>,
    pub vaccinated: bool,
    pub neutered: bool,
    pub adoption_fee: Fee,
    pub adoption_status: AdoptionStatus,
    /// Owning shelter, if the listing came from one.
    pub shelter: Option<ShelterId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// The display subset embedded in adoption request listings.
    #[must_use]
    pub fn summary(&self) -> PetSummary {
        PetSummary {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind.clone(),
            image: self.image.clone(),
            adoption_fee: self.adoption_fee,
        }
    }
}

/// Pet fields shown next to an adoption request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetSummary {
    #[serde(rename = "_id")]
    pub id: PetId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub image: Option<String>,
    pub adoption_fee: Fee,
}

/// Parameters for creating a pet listing.
#[derive(Debug, Clone, Default)]
pub struct NewPet {
    pub name: String,
    pub kind: String,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub weight: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub vaccinated: bool,
    pub neutered: bool,
    pub adoption_fee: Fee,
    pub shelter: Option<ShelterId>,
}

/// Optional filters for listing pets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetFilter {
    pub adoption_status: Option<AdoptionStatus>,
    /// Case-insensitive species match.
    pub kind: Option<String>,
}

impl PetFilter {
    /// Whether `pet` passes every filter that is set.
    #[must_use]
    pub fn matches(&self, pet: &Pet) -> bool {
        self.adoption_status
            .is_none_or(|status| pet.adoption_status == status)
            && self
                .kind
                .as_deref()
                .is_none_or(|kind| pet.kind.eq_ignore_ascii_case(kind))
    }
}
