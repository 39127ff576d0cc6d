//! Route configuration.

/// Competition route table
pub mod competition_routes;

/// Router assembly
pub mod router;

pub use router::create_router;
