//! # Device Telemetry API
//!
//! HTTP surface of the session token lifecycle: bearer authentication,
//! refresh-cookie rotation, logout and session listing.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use state::AppState;
