//! Business logic services for the adoption API.
//!
//! # Services
//!
//! - `adoption` - Adoption request lifecycle (submit, list, status transitions)
//! - `favorites` - Per-user favorite pet toggling
//! - `pets` - Read-only pet catalogue
//! - `auth` - Bearer token verification (caller identity)
//! - `payments` - Payment gateway bridge (orders, signature checks)

pub mod adoption;
pub mod auth;
mod error;
pub mod favorites;
pub mod payments;
pub mod pets;

pub use error::ServiceError;
