//! PostgreSQL contact store.

use crate::error::AppError;
use crate::model::{Contact, ContactFilter, ContactUpdate, NewContact, PageWindow, SortBy};
use crate::repository::ContactRepository;
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgContactRepository {
    pool: PgPool,
}

impl PgContactRepository {
    pub fn new(pool: PgPool) -> Self {
        PgContactRepository { pool }
    }

    async fn fetch_optional(&self, q: QueryBuf) -> Result<Option<Contact>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, Contact>(&q.sql);
        for p in q.params {
            query = p.bind_to(query);
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn fetch_all(&self, q: QueryBuf) -> Result<Vec<Contact>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, Contact>(&q.sql);
        for p in q.params {
            query = p.bind_to(query);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, new: &NewContact) -> Result<Contact, AppError> {
        self.fetch_optional(sql::insert(new))
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn find(
        &self,
        filter: &ContactFilter,
        sort: Option<&SortBy>,
        window: PageWindow,
    ) -> Result<Vec<Contact>, AppError> {
        self.fetch_all(sql::select_list(filter, sort, window)).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Contact>, AppError> {
        self.fetch_optional(sql::select_by_id(id)).await
    }

    async fn update(&self, id: i32, changes: &ContactUpdate) -> Result<Option<Contact>, AppError> {
        match sql::update(id, changes) {
            Some(q) => self.fetch_optional(q).await,
            None => self.find_by_id(id).await,
        }
    }

    async fn delete(&self, id: i32) -> Result<Option<Contact>, AppError> {
        self.fetch_optional(sql::delete(id)).await
    }
}
