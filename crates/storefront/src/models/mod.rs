//! Domain models for storefront.

pub mod session;
pub mod user;

pub use session::{Flash, FlashLevel, Principal, keys as session_keys};
pub use user::UserRecord;
