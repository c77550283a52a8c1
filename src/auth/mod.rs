//! Admin access for the list management endpoints.

pub mod middleware;

pub use middleware::AdminGuard;
