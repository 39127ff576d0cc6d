//! User directory seam and its PostgreSQL implementation.

/// User resolution
pub mod directory;

pub use directory::{PgUserDirectory, UserDirectory, UserProfile};
