//! Values bound to positional placeholders.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

/// A value bound to a `$n` placeholder of a contact query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Int(i32),
    NullableInt(Option<i32>),
    BigInt(i64),
}

impl BindValue {
    pub fn bind_to<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            BindValue::Text(s) => query.bind(s),
            BindValue::Int(n) => query.bind(n),
            BindValue::NullableInt(n) => query.bind(n),
            BindValue::BigInt(n) => query.bind(n),
        }
    }
}
