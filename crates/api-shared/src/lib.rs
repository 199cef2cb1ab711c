//! # API Shared
//!
//! Shared definitions for the Folio HTTP API.
//!
//! Contains:
//! - Request/response bodies (`dto` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the CLI for common functionality.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
