//! Pet Adoption Core - Shared domain types.
//!
//! This crate provides the types used across the pet adoption workspace:
//! - `api` - The REST backend consumed by the browser front end
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Database encoding is opt-in via the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, contact emails, adoption fees, and lifecycle enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
