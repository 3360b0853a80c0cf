//! Domain entities representing core business objects.

pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use token::{
    hash_plaintext, AccessTokenClaims, IssuedRefreshToken, RefreshToken, RefreshTokenStatus,
    Session, SessionSummary, TokenScope,
};
pub use user::UserId;
