//! HTTP handlers for contact submission and management.

pub mod contact;
pub use contact::*;
