//! Parameterized SQL for the contacts table.

mod builder;
mod params;

pub use builder::*;
pub use params::BindValue;
