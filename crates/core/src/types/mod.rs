//! Core types for the adoption domain.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod fee;
pub mod id;
pub mod status;

pub use email::{Email, EmailError};
pub use fee::{Fee, FeeError};
pub use id::*;
pub use status::*;
