//! # Device Telemetry Core
//!
//! Core domain layer for the Device Telemetry API backend.
//! This crate contains the session token lifecycle (issuance, validation,
//! rotation and revocation of access/refresh pairs), the refresh token store
//! contract, the keyset pagination engine shared by every list endpoint,
//! and the error taxonomy tying them together.

pub mod domain;
pub mod errors;
pub mod pagination;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use pagination::*;
pub use repositories::*;
pub use services::*;
