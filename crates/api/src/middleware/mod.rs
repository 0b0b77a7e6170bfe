//! HTTP middleware and extractors for the API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS
//!
//! Authentication is not a layer: handlers opt in through the `RequireAuth`,
//! `OptionalAuth` and `AdminGate` extractors.

pub mod auth;
pub mod request_id;

pub use auth::{AccessPolicy, AdminGate, OptionalAuth, RequireAuth};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
