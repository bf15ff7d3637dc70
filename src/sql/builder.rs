//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for the contacts table.
//! Column names come only from fixed lists and `SortField`; user values are always bound.

use crate::model::{ContactFilter, ContactUpdate, NewContact, PageWindow, SortBy};
use crate::sql::BindValue;

pub const CONTACTS_TABLE: &str = "contacts";

const RETURNING: &str = "id, name, email, subject, message, created_at, user_id";

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

pub fn insert(new: &NewContact) -> QueryBuf {
    let mut q = QueryBuf::new();
    let name = q.push_param(BindValue::Text(new.name.clone()));
    let email = q.push_param(BindValue::Text(new.email.clone()));
    let subject = q.push_param(BindValue::Text(new.subject.clone()));
    let message = q.push_param(BindValue::Text(new.message.clone()));
    let user_id = q.push_param(BindValue::NullableInt(new.user_id));
    q.sql = format!(
        "INSERT INTO {} (name, email, subject, message, user_id) VALUES (${}, ${}, ${}, ${}, ${}) RETURNING {}",
        quoted(CONTACTS_TABLE),
        name,
        email,
        subject,
        message,
        user_id,
        RETURNING
    );
    q
}

pub fn select_by_id(id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Int(id));
    q.sql = format!("SELECT {} FROM {} WHERE id = ${}", RETURNING, quoted(CONTACTS_TABLE), n);
    q
}

/// SELECT with exact-match filters, optional ORDER BY, and LIMIT/OFFSET.
pub fn select_list(filter: &ContactFilter, sort: Option<&SortBy>, window: PageWindow) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for (col, val) in [
        ("name", &filter.name),
        ("email", &filter.email),
        ("subject", &filter.subject),
    ] {
        if let Some(v) = val {
            let n = q.push_param(BindValue::Text(v.clone()));
            where_parts.push(format!("{} = ${}", quoted(col), n));
        }
    }
    let mut sql = format!("SELECT {} FROM {}", RETURNING, quoted(CONTACTS_TABLE));
    if !where_parts.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_parts.join(" AND "));
    }
    if let Some(s) = sort {
        sql.push_str(&format!(" ORDER BY {} {}", quoted(s.field.column()), s.order.as_sql()));
    }
    let limit = q.push_param(BindValue::BigInt(window.limit));
    let offset = q.push_param(BindValue::BigInt(window.offset));
    sql.push_str(&format!(" LIMIT ${} OFFSET ${}", limit, offset));
    q.sql = sql;
    q
}

/// UPDATE only the columns present in `changes`. Returns `None` when there is nothing to set.
pub fn update(id: i32, changes: &ContactUpdate) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (col, val) in [
        ("name", &changes.name),
        ("email", &changes.email),
        ("subject", &changes.subject),
        ("message", &changes.message),
    ] {
        if let Some(v) = val {
            let n = q.push_param(BindValue::Text(v.clone()));
            sets.push(format!("{} = ${}", quoted(col), n));
        }
    }
    if sets.is_empty() {
        return None;
    }
    let id_n = q.push_param(BindValue::Int(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE id = ${} RETURNING {}",
        quoted(CONTACTS_TABLE),
        sets.join(", "),
        id_n,
        RETURNING
    );
    Some(q)
}

pub fn delete(id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Int(id));
    q.sql = format!("DELETE FROM {} WHERE id = ${} RETURNING {}", quoted(CONTACTS_TABLE), n, RETURNING);
    q
}
