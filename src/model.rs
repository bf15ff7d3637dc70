//! Contact entity and the typed filter, sort, and update shapes used to query it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// One inbound contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub user_id: Option<i32>,
}

/// Fields for a new row. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub user_id: Option<i32>,
}

/// Partial update: `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.subject.is_none() && self.message.is_none()
    }

    pub fn apply_to(&self, contact: &mut Contact) {
        if let Some(v) = &self.name {
            contact.name = v.clone();
        }
        if let Some(v) = &self.email {
            contact.email = v.clone();
        }
        if let Some(v) = &self.subject {
            contact.subject = v.clone();
        }
        if let Some(v) = &self.message {
            contact.message = v.clone();
        }
    }
}

/// Exact-match filter; absent fields are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
}

impl ContactFilter {
    pub fn matches(&self, contact: &Contact) -> bool {
        self.name.as_ref().map_or(true, |v| *v == contact.name)
            && self.email.as_ref().map_or(true, |v| *v == contact.email)
            && self.subject.as_ref().map_or(true, |v| *v == contact.subject)
    }
}

/// Columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Email,
    Subject,
    Message,
    CreatedAt,
    UserId,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        SortField::Id,
        SortField::Name,
        SortField::Email,
        SortField::Subject,
        SortField::Message,
        SortField::CreatedAt,
        SortField::UserId,
    ];

    /// Name as it appears in requests.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::Subject => "subject",
            SortField::Message => "message",
            SortField::CreatedAt => "createdAt",
            SortField::UserId => "userId",
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::Subject => "subject",
            SortField::Message => "message",
            SortField::CreatedAt => "created_at",
            SortField::UserId => "user_id",
        }
    }
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL.into_iter().find(|f| f.as_str() == s).ok_or(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// `field:direction`, direction defaulting to descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortBy {
    pub field: SortField,
    pub order: SortOrder,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.order {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        };
        write!(f, "{}:{}", self.field.as_str(), dir)
    }
}

/// Error produced when a `sortBy` value cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortByError {
    UnknownField(String),
    UnknownOrder(String),
}

impl FromStr for SortBy {
    type Err = SortByError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, order) = match s.split_once(':') {
            Some((f, o)) => (f, Some(o)),
            None => (s, None),
        };
        let field = field
            .parse::<SortField>()
            .map_err(|_| SortByError::UnknownField(field.to_string()))?;
        let order = match order.map(str::to_ascii_lowercase).as_deref() {
            None => SortOrder::default(),
            Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            Some(other) => return Err(SortByError::UnknownOrder(other.to_string())),
        };
        Ok(SortBy { field, order })
    }
}

/// Sorting and pagination options of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub sort_by: Option<SortBy>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

/// Concrete LIMIT/OFFSET after defaults and offset policy are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}
