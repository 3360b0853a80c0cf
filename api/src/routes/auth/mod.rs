//! Session lifecycle endpoints
//!
//! - `refresh` - rotate the refresh cookie and mint a new access token
//! - `logout` - revoke the presented refresh cookie
//! - `logout_all` - revoke every session of the authenticated user

pub mod logout;
pub mod logout_all;
pub mod refresh;

pub use logout::logout;
pub use logout_all::logout_all;
pub use refresh::refresh;
