//! Domain models for the adoption API.
//!
//! These are validated domain records, separate from database row types.
//! Their serde representation is the JSON contract the front end reads
//! (`_id`, camelCase field names, joined references in list views).

pub mod adoption_request;
pub mod pet;
pub mod user;

pub use adoption_request::{AdoptionRequest, JoinedAdoptionRequest, NewAdoptionRequest, StatusUpdate};
pub use pet::{NewPet, Pet, PetFilter, PetSummary};
pub use user::{NewUser, User, UserSummary};
