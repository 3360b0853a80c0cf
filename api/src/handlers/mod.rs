//! Request handling helpers shared by routes

pub mod error;

pub use error::ApiError;
