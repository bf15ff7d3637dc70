//! Contact persistence behind one trait, with PostgreSQL and in-memory backends.

mod memory;
mod postgres;

pub use memory::InMemoryContactRepository;
pub use postgres::PgContactRepository;

use crate::error::AppError;
use crate::model::{Contact, ContactFilter, ContactUpdate, NewContact, PageWindow, SortBy};
use async_trait::async_trait;

/// Storage operations for contacts. Absence is reported as `Ok(None)`, never as an error.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Cheap round-trip to the store.
    async fn health_check(&self) -> Result<(), AppError>;

    async fn insert(&self, new: &NewContact) -> Result<Contact, AppError>;

    async fn find(
        &self,
        filter: &ContactFilter,
        sort: Option<&SortBy>,
        window: PageWindow,
    ) -> Result<Vec<Contact>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Contact>, AppError>;

    /// Apply `changes` and return the new row, or `None` if `id` does not exist.
    async fn update(&self, id: i32, changes: &ContactUpdate) -> Result<Option<Contact>, AppError>;

    /// Remove the row and return it as it was, or `None` if `id` does not exist.
    async fn delete(&self, id: i32) -> Result<Option<Contact>, AppError>;
}
