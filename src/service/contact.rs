//! Contact operations shared by the HTTP handlers and the tool layer.

use crate::config::OffsetMode;
use crate::error::AppError;
use crate::model::{Contact, ContactFilter, ContactUpdate, NewContact, PageWindow, QueryOptions};
use crate::repository::ContactRepository;
use std::sync::Arc;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 1000;
pub const DEFAULT_PAGE: u32 = 1;

#[derive(Clone)]
pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
    offset_mode: OffsetMode,
}

impl ContactService {
    pub fn new(repo: Arc<dyn ContactRepository>, offset_mode: OffsetMode) -> Self {
        ContactService { repo, offset_mode }
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repo.health_check().await
    }

    /// Insert a contact. Input is trusted; validation happens in the adapters.
    pub async fn create_contact(&self, new: NewContact) -> Result<Contact, AppError> {
        let contact = self.repo.insert(&new).await?;
        tracing::info!(contact_id = contact.id, "contact created");
        Ok(contact)
    }

    /// One page of contacts matching `filter` exactly on every provided field.
    pub async fn query_contacts(&self, filter: &ContactFilter, options: &QueryOptions) -> Result<Vec<Contact>, AppError> {
        let window = self.page_window(options);
        tracing::debug!(?filter, sort = ?options.sort_by, limit = window.limit, offset = window.offset, "query contacts");
        self.repo.find(filter, options.sort_by.as_ref(), window).await
    }

    pub async fn get_contact_by_id(&self, id: i32) -> Result<Option<Contact>, AppError> {
        self.repo.find_by_id(id).await
    }

    /// Like `get_contact_by_id`, but absence is a `NotFound` error.
    pub async fn require_contact(&self, id: i32) -> Result<Contact, AppError> {
        self.get_contact_by_id(id)
            .await?
            .ok_or_else(AppError::contact_not_found)
    }

    pub async fn update_contact_by_id(&self, id: i32, changes: &ContactUpdate) -> Result<Contact, AppError> {
        self.require_contact(id).await?;
        // The row can vanish between the check and the write.
        let updated = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(AppError::contact_not_found)?;
        tracing::info!(contact_id = id, "contact updated");
        Ok(updated)
    }

    /// Remove a contact and return it as it was just before deletion.
    pub async fn delete_contact_by_id(&self, id: i32) -> Result<Contact, AppError> {
        let existing = self.require_contact(id).await?;
        self.repo
            .delete(existing.id)
            .await?
            .ok_or_else(AppError::contact_not_found)?;
        tracing::info!(contact_id = id, "contact deleted");
        Ok(existing)
    }

    /// LIMIT/OFFSET for a listing after defaults, the limit cap, and the configured offset policy.
    pub fn page_window(&self, options: &QueryOptions) -> PageWindow {
        let limit = i64::from(options.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT));
        let page = i64::from(options.page.unwrap_or(DEFAULT_PAGE));
        let pages_skipped = match self.offset_mode {
            OffsetMode::PageTimesLimit => page,
            OffsetMode::OneBased => page.saturating_sub(1),
        };
        PageWindow {
            limit,
            offset: pages_skipped.saturating_mul(limit),
        }
    }
}
