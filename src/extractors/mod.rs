//! Request extractors.

pub mod admin;
pub use admin::AdminGuard;
