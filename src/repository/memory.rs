//! In-memory contact store.
//!
//! Keeps rows in insertion order so that an unsorted listing is stable, the same
//! way a freshly filled heap table usually reads back. Suitable for tests and
//! local development; nothing survives a restart.

use crate::error::AppError;
use crate::model::{Contact, ContactFilter, ContactUpdate, NewContact, PageWindow, SortBy, SortField, SortOrder};
use crate::repository::ContactRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryContactRepository {
    data: Arc<RwLock<MemoryData>>,
}

#[derive(Default)]
struct MemoryData {
    rows: Vec<Contact>,
    last_id: i32,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn compare(a: &Contact, b: &Contact, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Subject => a.subject.cmp(&b.subject),
        SortField::Message => a.message.cmp(&b.message),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        // PostgreSQL puts NULLs last ascending and first descending; Option orders None first.
        SortField::UserId => match (a.user_id, b.user_id) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => x.cmp(&y),
        },
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn insert(&self, new: &NewContact) -> Result<Contact, AppError> {
        let mut data = self.data.write().await;
        data.last_id += 1;
        let contact = Contact {
            id: data.last_id,
            name: new.name.clone(),
            email: new.email.clone(),
            subject: new.subject.clone(),
            message: new.message.clone(),
            created_at: Utc::now(),
            user_id: new.user_id,
        };
        data.rows.push(contact.clone());
        Ok(contact)
    }

    async fn find(
        &self,
        filter: &ContactFilter,
        sort: Option<&SortBy>,
        window: PageWindow,
    ) -> Result<Vec<Contact>, AppError> {
        let data = self.data.read().await;
        let mut rows: Vec<Contact> = data.rows.iter().filter(|c| filter.matches(c)).cloned().collect();
        if let Some(s) = sort {
            rows.sort_by(|a, b| {
                let ord = compare(a, b, s.field);
                match s.order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
        }
        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Contact>, AppError> {
        let data = self.data.read().await;
        Ok(data.rows.iter().find(|c| c.id == id).cloned())
    }

    async fn update(&self, id: i32, changes: &ContactUpdate) -> Result<Option<Contact>, AppError> {
        let mut data = self.data.write().await;
        Ok(data.rows.iter_mut().find(|c| c.id == id).map(|c| {
            changes.apply_to(c);
            c.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<Option<Contact>, AppError> {
        let mut data = self.data.write().await;
        let pos = data.rows.iter().position(|c| c.id == id);
        Ok(pos.map(|i| data.rows.remove(i)))
    }
}
